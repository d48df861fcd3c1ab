//! Learning regression tests for taalgrens-learn.
//!
//! These tests pin the end-to-end behavior of tree induction, the
//! subtree-vote fallback, weighted sampling, and boosting on small
//! deterministic datasets.

use std::collections::HashMap;

use taalgrens_learn::{
    BoostConfig, DecisionNode, FeatureValue, Instance, LearnError, WeightedSample, entropy, gain,
    induce,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn example(label: &str, values: &[(&str, &str)]) -> Instance {
    let features: HashMap<String, FeatureValue> = values
        .iter()
        .map(|(name, value)| (name.to_string(), FeatureValue::category(*value)))
        .collect();
    Instance::labeled(label, features)
}

fn probe(values: &[(&str, &str)]) -> Instance {
    let features: HashMap<String, FeatureValue> = values
        .iter()
        .map(|(name, value)| (name.to_string(), FeatureValue::category(*value)))
        .collect();
    Instance::unlabeled(features)
}

fn all(examples: &[Instance]) -> Vec<usize> {
    (0..examples.len()).collect()
}

// ---------------------------------------------------------------------------
// Entropy and gain properties
// ---------------------------------------------------------------------------

/// Entropy of a single-label set is exactly 0; a perfectly balanced
/// two-label set measures exactly 1 bit.
#[test]
fn entropy_reference_values() {
    let pure: Vec<Instance> = (0..6).map(|_| example("en", &[("f1", "A")])).collect();
    assert_eq!(entropy(&pure, &all(&pure)), 0.0);

    let balanced: Vec<Instance> = (0..6)
        .map(|i| example(if i % 2 == 0 { "en" } else { "nl" }, &[("f1", "A")]))
        .collect();
    assert!((entropy(&balanced, &all(&balanced)) - 1.0).abs() < 1e-12);
}

/// Information gain is never negative, even for a useless feature.
#[test]
fn gain_nonnegative_for_uninformative_feature() {
    // f1 is constant, so partitioning on it changes nothing.
    let examples = vec![
        example("en", &[("f1", "A")]),
        example("nl", &[("f1", "A")]),
        example("en", &[("f1", "A")]),
    ];
    let (gains, groups) = gain(&examples, &all(&examples), "f1").unwrap();
    assert!(gains.abs() < 1e-12);
    assert!(gains >= 0.0);
    assert_eq!(groups.len(), 1);
}

// ---------------------------------------------------------------------------
// End-to-end induction and classification
// ---------------------------------------------------------------------------

/// The worked example: three sentences, one feature, depth 5. The tree
/// must split on f1, classify seen values exactly, and answer an unseen
/// value with the subtree majority vote.
#[test]
fn end_to_end_single_feature_tree() {
    let examples = vec![
        example("en", &[("f1", "A")]),
        example("en", &[("f1", "A")]),
        example("nl", &[("f1", "B")]),
    ];
    let pool = vec!["f1".to_string()];
    let tree = induce(&examples, &pool, 5).unwrap();

    match &tree {
        DecisionNode::Branch { feature, .. } => assert_eq!(feature, "f1"),
        DecisionNode::Leaf { .. } => panic!("expected a split on f1"),
    }

    assert_eq!(tree.classify(&probe(&[("f1", "A")])).unwrap(), Some("en"));
    assert_eq!(tree.classify(&probe(&[("f1", "B")])).unwrap(), Some("nl"));
    // "C" was never seen during training: subtree majority vote.
    assert_eq!(tree.classify(&probe(&[("f1", "C")])).unwrap(), Some("en"));
}

/// A stump (depth 1) on a non-pure set is an internal node whose every
/// child is a leaf, no matter how large the dataset is.
#[test]
fn stump_children_are_all_leaves() {
    let examples: Vec<Instance> = (0..40)
        .map(|i| {
            let label = if i % 3 == 0 { "nl" } else { "en" };
            let f1 = if i % 2 == 0 { "A" } else { "B" };
            let f2 = match i % 4 {
                0 => "P",
                1 => "Q",
                2 => "R",
                _ => "S",
            };
            example(label, &[("f1", f1), ("f2", f2)])
        })
        .collect();
    let pool = vec!["f1".to_string(), "f2".to_string()];
    let stump = induce(&examples, &pool, 1).unwrap();

    match &stump {
        DecisionNode::Branch { children, .. } => {
            assert!(!children.is_empty());
            assert!(children.iter().all(|(_, child)| child.is_leaf()));
        }
        DecisionNode::Leaf { .. } => panic!("non-pure examples must produce a split"),
    }
    assert_eq!(stump.depth(), 1);
}

/// With unlimited depth and features that uniquely separate the classes,
/// the tree reproduces every training label.
#[test]
fn unlimited_depth_fits_training_data() {
    let mut examples = Vec::new();
    for (i, label) in ["en", "en", "nl", "nl", "en", "nl"].iter().enumerate() {
        let f1 = if i < 3 { "A" } else { "B" };
        let f2 = match i % 3 {
            0 => "P",
            1 => "Q",
            _ => "R",
        };
        examples.push(example(label, &[("f1", f1), ("f2", f2)]));
    }
    let pool = vec!["f1".to_string(), "f2".to_string()];
    let tree = induce(&examples, &pool, 100).unwrap();

    for ex in &examples {
        assert_eq!(tree.classify(ex).unwrap(), ex.label());
    }
}

// ---------------------------------------------------------------------------
// Weighted sample
// ---------------------------------------------------------------------------

/// normalize() restores the distribution total after arbitrary point
/// updates, within 1e-9.
#[test]
fn normalize_restores_dist_sum_after_updates() {
    let examples: Vec<Instance> = (0..10)
        .map(|i| example(if i < 5 { "en" } else { "nl" }, &[("f1", "A")]))
        .collect();
    let mut sample = WeightedSample::uniform(examples);

    for i in 0..10 {
        let w = sample.get(i).weight() * (0.1 + 0.07 * i as f64);
        sample.change_weight(i, w);
    }
    sample.normalize();

    assert!((sample.sum() - sample.dist_sum()).abs() < 1e-9);
    let total: f64 = sample.examples().iter().map(Instance::weight).sum();
    assert!((total - sample.dist_sum()).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Boosting
// ---------------------------------------------------------------------------

/// A dataset where no single stump is perfect, so every round has a
/// usable error strictly between 0 and dist_sum.
fn overlapping_examples() -> Vec<Instance> {
    vec![
        example("en", &[("f1", "A"), ("f2", "X")]),
        example("en", &[("f1", "A"), ("f2", "Y")]),
        example("en", &[("f1", "B"), ("f2", "X")]),
        example("nl", &[("f1", "B"), ("f2", "Y")]),
    ]
}

/// A one-member ensemble must agree with the stump it wraps on every
/// input: a single weighted vote is direct classification.
#[test]
fn singleton_ensemble_matches_direct_stump() {
    let pool = vec!["f1".to_string(), "f2".to_string()];
    let examples = overlapping_examples();

    let stump = induce(&examples, &pool, 1).unwrap();
    let ensemble = BoostConfig::new(1)
        .unwrap()
        .fit(examples.clone(), &pool)
        .unwrap();

    let probes = [
        probe(&[("f1", "A"), ("f2", "X")]),
        probe(&[("f1", "B"), ("f2", "Y")]),
        probe(&[("f1", "C"), ("f2", "Z")]),
    ];
    for p in &probes {
        assert_eq!(ensemble.vote(p).unwrap(), stump.classify(p).unwrap());
    }
}

/// A boosted ensemble reproduces the training labels on a dataset a
/// single stump cannot fit.
#[test]
fn ensemble_improves_on_single_stump() {
    let pool = vec!["f1".to_string(), "f2".to_string()];
    let examples = overlapping_examples();

    let stump = induce(&examples, &pool, 1).unwrap();
    let stump_correct = examples
        .iter()
        .filter(|ex| stump.classify(ex).unwrap() == ex.label())
        .count();
    assert!(stump_correct < examples.len(), "dataset must not be stump-separable");

    let ensemble = BoostConfig::new(5)
        .unwrap()
        .fit(examples.clone(), &pool)
        .unwrap();
    let boosted_correct = examples
        .iter()
        .filter(|ex| ensemble.vote(ex).unwrap() == ex.label())
        .count();
    assert!(
        boosted_correct >= stump_correct,
        "boosting regressed: {boosted_correct} < {stump_correct}"
    );
}

/// A separable dataset drives round 0 to zero error, which is fatal.
#[test]
fn boosting_separable_data_is_degenerate() {
    let pool = vec!["f1".to_string(), "f2".to_string()];
    let examples = vec![
        example("en", &[("f1", "A"), ("f2", "X")]),
        example("nl", &[("f1", "B"), ("f2", "X")]),
    ];
    let err = BoostConfig::new(3).unwrap().fit(examples, &pool).unwrap_err();
    assert!(matches!(err, LearnError::DegenerateRound { round: 0, .. }));
}

/// Classifying an instance that lacks a trained-on feature is a loud
/// error, not a silent default.
#[test]
fn missing_feature_at_vote_time_errors() {
    let pool = vec!["f1".to_string(), "f2".to_string()];
    let ensemble = BoostConfig::new(2)
        .unwrap()
        .fit(overlapping_examples(), &pool)
        .unwrap();

    let incomplete = probe(&[("f2", "X")]);
    let result = ensemble.vote(&incomplete);
    assert!(matches!(result, Err(LearnError::MissingFeature { .. })));
}
