//! Label normalization: raw classifier output → calibrated AI/human verdict.
//!
//! 1. Each label is bucketed by keyword (see [`LabelVocabulary::classify`]).
//!    A label carrying keywords of both buckets raises both.
//! 2. Each bucket keeps the maximum score among its labels, never the sum,
//!    so a model emitting several AI-flavored sub-labels is not double counted.
//! 3. If no label matched, the top score overall is taken as the AI
//!    probability. If one bucket matched, the other is its complement.
//! 4. Both values are clamped to `[0, 1]` and renormalized to sum to 1.

use serde::{Deserialize, Serialize};
use veritas_core::errors::{DetectionError, DetectionResult};

use crate::verdict::NormalizedVerdict;
use crate::vocabulary::LabelVocabulary;

/// One prediction as emitted by an image classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Convert classifier output into a [`NormalizedVerdict`].
///
/// Pure and deterministic. Fails only on empty input.
pub fn normalize(
    results: &[LabelScore],
    vocabulary: &LabelVocabulary,
) -> DetectionResult<NormalizedVerdict> {
    if results.is_empty() {
        return Err(DetectionError::InvalidInput(
            "classifier returned no predictions".to_string(),
        ));
    }

    let mut ai: Option<f64> = None;
    let mut human: Option<f64> = None;

    for item in results {
        let score = finite_or_zero(item.score);
        let hit = vocabulary.classify(&item.label);
        if hit.ai {
            raise(&mut ai, score);
        }
        if hit.human {
            raise(&mut human, score);
        }
    }

    let (ai, human) = match (ai, human) {
        (Some(ai), Some(human)) => (ai, human),
        (Some(ai), None) => (ai, 1.0 - ai),
        (None, Some(human)) => (1.0 - human, human),
        (None, None) => {
            let top = results
                .iter()
                .map(|r| finite_or_zero(r.score))
                .fold(f64::NEG_INFINITY, f64::max);
            (top, 1.0 - top)
        }
    };

    let ai = ai.clamp(0.0, 1.0);
    let human = human.clamp(0.0, 1.0);
    let total = ai + human;

    if total <= 0.0 {
        tracing::debug!("Both buckets scored zero; returning undecided verdict");
        return Ok(NormalizedVerdict::undecided());
    }

    Ok(NormalizedVerdict::from_probabilities(ai / total, human / total))
}

fn raise(slot: &mut Option<f64>, score: f64) {
    *slot = Some(slot.map_or(score, |best| best.max(score)));
}

fn finite_or_zero(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        0.0
    }
}
