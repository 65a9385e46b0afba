//! Keyword table mapping raw classifier labels to buckets.

use veritas_core::config::VocabularyConfig;

/// Which buckets a label's keywords hit. The two checks are independent:
/// "real-or-fake" hits both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BucketMatch {
    pub ai: bool,
    pub human: bool,
}

impl BucketMatch {
    pub const NONE: Self = Self {
        ai: false,
        human: false,
    };
    pub const AI: Self = Self {
        ai: true,
        human: false,
    };
    pub const HUMAN: Self = Self {
        ai: false,
        human: true,
    };
    pub const BOTH: Self = Self {
        ai: true,
        human: true,
    };

    pub fn is_none(&self) -> bool {
        !self.ai && !self.human
    }
}

/// Keyword sets for each bucket. Keywords are stored lower-cased and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    ai: Vec<String>,
    human: Vec<String>,
}

impl LabelVocabulary {
    pub fn new<I, J, S, T>(ai: I, human: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            ai: clean(ai),
            human: clean(human),
        }
    }

    pub fn from_config(config: &VocabularyConfig) -> Self {
        Self::new(&config.ai_keywords, &config.human_keywords)
    }

    /// Buckets whose keywords occur in `label`. An empty label matches nothing.
    pub fn classify(&self, label: &str) -> BucketMatch {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return BucketMatch::NONE;
        }
        BucketMatch {
            ai: self.ai.iter().any(|k| label.contains(k.as_str())),
            human: self.human.iter().any(|k| label.contains(k.as_str())),
        }
    }

    pub fn ai_keywords(&self) -> &[String] {
        &self.ai
    }

    pub fn human_keywords(&self) -> &[String] {
        &self.human
    }
}

impl Default for LabelVocabulary {
    fn default() -> Self {
        Self::from_config(&VocabularyConfig::default())
    }
}

fn clean<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_buckets_common_labels() {
        let vocab = LabelVocabulary::default();
        for label in ["FAKE", "AI-generated", " synthetic ", "ai_image"] {
            assert_eq!(vocab.classify(label), BucketMatch::AI, "{label}");
        }
        for label in ["Real", "human", "Authentic photo"] {
            assert_eq!(vocab.classify(label), BucketMatch::HUMAN, "{label}");
        }
        assert!(vocab.classify("label_0").is_none());
        assert!(vocab.classify("   ").is_none());
    }

    #[test]
    fn label_can_match_both_buckets() {
        let vocab = LabelVocabulary::default();
        assert_eq!(vocab.classify("real-or-fake"), BucketMatch::BOTH);
        assert_eq!(vocab.classify("Authentic-AI"), BucketMatch::BOTH);
    }

    #[test]
    fn custom_keywords_are_normalized() {
        let vocab = LabelVocabulary::new(["  DeepFake "], ["Camera", ""]);
        assert_eq!(vocab.ai_keywords(), ["deepfake"]);
        assert_eq!(vocab.human_keywords(), ["camera"]);
        assert_eq!(vocab.classify("deepfake_score"), BucketMatch::AI);
        assert_eq!(vocab.classify("camera-original"), BucketMatch::HUMAN);
        assert!(vocab.classify("fake").is_none());
    }
}
