//! Verdict types derived from normalized bucket probabilities.

use serde::{Deserialize, Serialize};
use veritas_core::constants::{LABEL_AI_GENERATED, LABEL_HUMAN};

/// Final categorical classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    AiGenerated,
    Human,
}

impl Verdict {
    /// Label stored in the `analysis` column and returned to clients.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AiGenerated => LABEL_AI_GENERATED,
            Self::Human => LABEL_HUMAN,
        }
    }
}

/// Calibrated two-class distribution plus the verdict it implies.
///
/// Invariants: both probabilities lie in `[0, 1]` and sum to 1;
/// `confidence` is the probability of the winning verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedVerdict {
    ai_probability: f64,
    human_probability: f64,
    verdict: Verdict,
    confidence: f64,
}

impl NormalizedVerdict {
    /// Build from a renormalized pair. Ties go to `AiGenerated`.
    pub(crate) fn from_probabilities(ai_probability: f64, human_probability: f64) -> Self {
        let (verdict, confidence) = if ai_probability >= human_probability {
            (Verdict::AiGenerated, ai_probability)
        } else {
            (Verdict::Human, human_probability)
        };
        Self {
            ai_probability,
            human_probability,
            verdict,
            confidence,
        }
    }

    /// Both buckets collapsed to zero: no evidence either way.
    pub(crate) fn undecided() -> Self {
        Self {
            ai_probability: 0.5,
            human_probability: 0.5,
            verdict: Verdict::Human,
            confidence: 0.5,
        }
    }

    pub fn ai_probability(&self) -> f64 {
        self.ai_probability
    }

    pub fn human_probability(&self) -> f64 {
        self.human_probability
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// `ai_probability` as a whole percentage, the stored history score.
    pub fn ai_percent(&self) -> u8 {
        to_percent(self.ai_probability)
    }

    pub fn human_percent(&self) -> u8 {
        to_percent(self.human_probability)
    }

    pub fn confidence_percent(&self) -> u8 {
        to_percent(self.confidence)
    }

    /// Confidence rounded to 4 decimal places for display.
    pub fn display_confidence(&self) -> f64 {
        (self.confidence * 10_000.0).round_ties_even() / 10_000.0
    }
}

fn to_percent(probability: f64) -> u8 {
    (probability * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

/// Outcome of one image detection, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub ai_percent: u8,
    pub human_percent: u8,
    /// "AI-generated" or "Human".
    pub label: String,
    /// Winning probability, 4 decimal places.
    pub confidence: f64,
    /// Id of the model that produced the raw scores.
    pub model: String,
    #[serde(skip)]
    pub verdict: NormalizedVerdict,
}

impl DetectionReport {
    pub fn new(verdict: NormalizedVerdict, model: impl Into<String>) -> Self {
        Self {
            ai_percent: verdict.ai_percent(),
            human_percent: verdict.human_percent(),
            label: verdict.verdict().label().to_string(),
            confidence: verdict.display_confidence(),
            model: model.into(),
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_favors_ai() {
        let v = NormalizedVerdict::from_probabilities(0.5, 0.5);
        assert_eq!(v.verdict(), Verdict::AiGenerated);
        assert_eq!(v.confidence(), 0.5);
    }

    #[test]
    fn percent_rounds_half_to_even() {
        let v = NormalizedVerdict::from_probabilities(0.125, 0.875);
        assert_eq!(v.ai_percent(), 12);
        assert_eq!(v.human_percent(), 88);
    }

    #[test]
    fn display_confidence_has_four_decimals() {
        let v = NormalizedVerdict::from_probabilities(0.876_543_21, 0.123_456_79);
        assert_eq!(v.display_confidence(), 0.8765);
    }

    #[test]
    fn report_carries_label_and_model() {
        let v = NormalizedVerdict::from_probabilities(0.13, 0.87);
        let report = DetectionReport::new(v, "acme/detector");
        assert_eq!(report.label, "Human");
        assert_eq!(report.ai_percent, 13);
        assert_eq!(report.human_percent, 87);
        assert_eq!(report.model, "acme/detector");
    }

    #[test]
    fn verdict_serializes_screaming_case() {
        assert_eq!(
            serde_json::to_string(&Verdict::AiGenerated).unwrap(),
            "\"AI_GENERATED\""
        );
    }
}
