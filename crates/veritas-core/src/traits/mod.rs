//! Storage trait module.

pub mod storage;

pub use storage::{IVeritasStorage, StorageHealth};
