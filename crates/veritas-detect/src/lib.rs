//! # veritas-detect
//!
//! AI-vs-human image detection.
//!
//! A pretrained classifier (reached through [`ImageClassifier`]) emits raw
//! `(label, score)` pairs whose vocabulary varies by model. [`normalize`]
//! sorts those labels into an AI and a human bucket using a configurable
//! [`LabelVocabulary`] and derives a calibrated [`NormalizedVerdict`].
//! [`ModelHandle`] owns the process-wide classifier, loaded once on first use.

pub mod classifier;
pub mod detector;
pub mod http;
pub mod image_prep;
pub mod model;
pub mod normalizer;
pub mod verdict;
pub mod vocabulary;

pub use classifier::ImageClassifier;
pub use detector::ImageDetector;
pub use http::HttpModelLoader;
pub use image_prep::{prepare_image, PreparedImage};
pub use model::{ModelHandle, ModelLoader};
pub use normalizer::{normalize, LabelScore};
pub use verdict::{DetectionReport, NormalizedVerdict, Verdict};
pub use vocabulary::{BucketMatch, LabelVocabulary};
