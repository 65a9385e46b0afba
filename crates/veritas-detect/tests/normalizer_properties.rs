//! Property tests for label normalization.

use proptest::prelude::*;
use veritas_detect::{normalize, LabelScore, LabelVocabulary, Verdict};

fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("fake".to_string()),
        Just("Real".to_string()),
        Just("AI-generated".to_string()),
        Just("human".to_string()),
        Just("authentic".to_string()),
        Just("synthetic".to_string()),
        Just(String::new()),
        "label_[0-9]",
        "[a-z]{1,8}",
    ]
}

fn predictions(min_score: f64) -> impl Strategy<Value = Vec<LabelScore>> {
    prop::collection::vec(
        (label_strategy(), min_score..=1.0f64).prop_map(|(l, s)| LabelScore::new(l, s)),
        1..8,
    )
}

proptest! {
    #[test]
    fn probabilities_sum_to_one(input in predictions(0.0)) {
        let v = normalize(&input, &LabelVocabulary::default()).unwrap();
        prop_assert!((v.ai_probability() + v.human_probability() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn probabilities_stay_in_unit_interval(input in predictions(0.0)) {
        let v = normalize(&input, &LabelVocabulary::default()).unwrap();
        prop_assert!((0.0..=1.0).contains(&v.ai_probability()));
        prop_assert!((0.0..=1.0).contains(&v.human_probability()));
        prop_assert!(v.ai_percent() <= 100);
    }

    #[test]
    fn verdict_follows_larger_probability(input in predictions(0.001)) {
        let v = normalize(&input, &LabelVocabulary::default()).unwrap();
        let expect_ai = v.ai_probability() >= v.human_probability();
        prop_assert_eq!(v.verdict() == Verdict::AiGenerated, expect_ai);
        prop_assert_eq!(
            v.confidence(),
            v.ai_probability().max(v.human_probability())
        );
    }

    #[test]
    fn normalization_is_deterministic(input in predictions(0.0)) {
        let vocab = LabelVocabulary::default();
        let a = normalize(&input, &vocab).unwrap();
        let b = normalize(&input, &vocab).unwrap();
        prop_assert_eq!(a.ai_probability().to_bits(), b.ai_probability().to_bits());
        prop_assert_eq!(a.human_probability().to_bits(), b.human_probability().to_bits());
        prop_assert_eq!(a.verdict(), b.verdict());
    }

    #[test]
    fn ai_bucket_uses_max_not_sum(scores in prop::collection::vec(0.0..=1.0f64, 1..6)) {
        let input: Vec<LabelScore> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| LabelScore::new(format!("ai-variant-{i}"), *s))
            .collect();
        let max = scores.iter().cloned().fold(0.0, f64::max);
        let v = normalize(&input, &LabelVocabulary::default()).unwrap();
        prop_assert!((v.ai_probability() - max).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn lone_label_matching_both_buckets_is_a_tie(score in 0.001f64..=1.0) {
        let input = [LabelScore::new("real-or-fake", score)];
        let v = normalize(&input, &LabelVocabulary::default()).unwrap();
        prop_assert!((v.ai_probability() - 0.5).abs() < 1e-12);
        prop_assert_eq!(v.verdict(), Verdict::AiGenerated);
    }
}
