//! Recursive decision-tree induction driven by information gain.

use tracing::{debug, instrument};

use crate::error::LearnError;
use crate::gain::{best_split, weighted_label_counts};
use crate::instance::Instance;
use crate::node::DecisionNode;

/// Configuration for inducing a single decision tree.
///
/// Construct via [`TreeConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter   | Default |
/// |-------------|---------|
/// | `max_depth` | 7       |
#[derive(Debug, Clone)]
pub struct TreeConfig {
    max_depth: usize,
}

impl TreeConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self { max_depth: 7 }
    }

    /// Set the maximum tree depth. Values below 1 are clamped to 1 at
    /// induction time; depth 1 yields a single-split stump.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Return the maximum depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Induce a decision tree over the given examples and feature pool.
    ///
    /// # Errors
    ///
    /// See [`induce`].
    pub fn fit(
        &self,
        examples: &[Instance],
        features: &[String],
    ) -> Result<DecisionNode, LearnError> {
        induce(examples, features, self.max_depth)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Induce a decision tree from weighted examples.
///
/// `features` is the candidate pool; its order is the tie-break order for
/// equal-gain splits. `max_depth` is a hard cap on tree height, clamped
/// to a minimum of 1 — a depth of 1 always yields a single-level stump.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`LearnError::EmptyTrainingSet`] | `examples` is empty |
/// | [`LearnError::UnlabeledExample`] | an example has no label |
/// | [`LearnError::MissingFeature`] | an example lacks a pool feature |
#[instrument(skip(examples, features), fields(n_examples = examples.len(), n_features = features.len(), max_depth))]
pub fn induce(
    examples: &[Instance],
    features: &[String],
    max_depth: usize,
) -> Result<DecisionNode, LearnError> {
    if examples.is_empty() {
        return Err(LearnError::EmptyTrainingSet);
    }
    for (index, example) in examples.iter().enumerate() {
        if example.label().is_none() {
            return Err(LearnError::UnlabeledExample { index });
        }
    }

    let members: Vec<usize> = (0..examples.len()).collect();
    let root = build(examples, &members, features, &[], max_depth)?;

    debug!(
        depth = root.depth(),
        n_leaves = root.n_leaves(),
        "decision tree built"
    );

    Ok(root)
}

/// Recursive builder. `parents` is the enclosing node's member list, used
/// as the plurality fallback for branches with no training coverage.
fn build(
    examples: &[Instance],
    members: &[usize],
    pool: &[String],
    parents: &[usize],
    depth: usize,
) -> Result<DecisionNode, LearnError> {
    if members.is_empty() {
        return Ok(DecisionNode::leaf(plurality(examples, parents)));
    }
    if let Some(label) = uniform_label(examples, members) {
        return Ok(DecisionNode::leaf(Some(label.to_string())));
    }
    if pool.is_empty() {
        return Ok(DecisionNode::leaf(plurality(examples, members)));
    }

    let (feature, groups) = best_split(examples, members, pool)?;
    let depth = depth.max(1);

    let rest: Vec<String> = pool.iter().filter(|f| **f != feature).cloned().collect();
    let mut children = Vec::with_capacity(groups.len());
    for (value, sub) in groups {
        let child = if depth == 1 {
            DecisionNode::leaf(plurality(examples, &sub))
        } else {
            build(examples, &sub, &rest, members, depth - 1)?
        };
        children.push((value, child));
    }

    Ok(DecisionNode::branch(feature, children))
}

/// The weighted-majority label among `members`.
///
/// Ties resolve to the first member (in list order) whose label holds the
/// current maximum weighted count. Returns `None` for an empty list.
#[must_use]
pub fn plurality(examples: &[Instance], members: &[usize]) -> Option<String> {
    let counts = weighted_label_counts(examples, members);
    let mut winner = None;
    let mut max_weight = f64::NEG_INFINITY;
    for &i in members {
        let Some(label) = examples[i].label() else {
            continue;
        };
        let weight = counts
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0.0, |(_, w)| *w);
        if weight > max_weight {
            max_weight = weight;
            winner = Some(label.to_string());
        }
    }
    winner
}

/// Return the shared label when every member carries the same one.
fn uniform_label<'a>(examples: &'a [Instance], members: &[usize]) -> Option<&'a str> {
    let first = examples[*members.first()?].label()?;
    members
        .iter()
        .all(|&i| examples[i].label() == Some(first))
        .then_some(first)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{TreeConfig, induce, plurality};
    use crate::error::LearnError;
    use crate::instance::Instance;
    use crate::node::DecisionNode;
    use crate::value::FeatureValue;

    fn example(label: &str, values: &[(&str, &str)]) -> Instance {
        let features: HashMap<String, FeatureValue> = values
            .iter()
            .map(|(name, value)| (name.to_string(), FeatureValue::category(*value)))
            .collect();
        Instance::labeled(label, features)
    }

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn pure_examples_collapse_to_leaf() {
        let examples = vec![
            example("en", &[("f1", "A")]),
            example("en", &[("f1", "B")]),
        ];
        let tree = induce(&examples, &pool(&["f1"]), 5).unwrap();
        assert!(matches!(tree, DecisionNode::Leaf { label: Some(ref l) } if l == "en"));
    }

    #[test]
    fn depth_one_yields_stump() {
        let examples = vec![
            example("en", &[("f1", "A"), ("f2", "X")]),
            example("nl", &[("f1", "B"), ("f2", "X")]),
        ];
        let tree = induce(&examples, &pool(&["f1", "f2"]), 1).unwrap();
        match &tree {
            DecisionNode::Branch { children, .. } => {
                assert!(children.iter().all(|(_, child)| child.is_leaf()));
            }
            DecisionNode::Leaf { .. } => panic!("expected a stump, got a leaf"),
        }
    }

    #[test]
    fn zero_depth_is_clamped_to_stump() {
        let examples = vec![
            example("en", &[("f1", "A")]),
            example("nl", &[("f1", "B")]),
        ];
        let tree = induce(&examples, &pool(&["f1"]), 0).unwrap();
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn empty_pool_yields_plurality_leaf() {
        let examples = vec![
            example("en", &[("f1", "A")]),
            example("en", &[("f1", "B")]),
            example("nl", &[("f1", "C")]),
        ];
        let tree = induce(&examples, &[], 5).unwrap();
        assert!(matches!(tree, DecisionNode::Leaf { label: Some(ref l) } if l == "en"));
    }

    #[test]
    fn exhausted_pool_stops_recursion() {
        // f1 cannot separate the labels, so after splitting on it the
        // recursion runs out of features and falls back to plurality.
        let examples = vec![
            example("en", &[("f1", "A")]),
            example("en", &[("f1", "A")]),
            example("nl", &[("f1", "A")]),
        ];
        let tree = induce(&examples, &pool(&["f1"]), 5).unwrap();
        let probe = example("nl", &[("f1", "A")]);
        assert_eq!(tree.classify(&probe).unwrap(), Some("en"));
    }

    #[test]
    fn fits_training_data_with_unlimited_depth() {
        let examples = vec![
            example("en", &[("f1", "A"), ("f2", "X")]),
            example("en", &[("f1", "A"), ("f2", "Y")]),
            example("nl", &[("f1", "B"), ("f2", "X")]),
            example("nl", &[("f1", "B"), ("f2", "Y")]),
        ];
        let tree = TreeConfig::new()
            .with_max_depth(100)
            .fit(&examples, &pool(&["f1", "f2"]))
            .unwrap();
        for ex in &examples {
            assert_eq!(tree.classify(ex).unwrap(), ex.label());
        }
    }

    #[test]
    fn empty_training_set_error() {
        let err = induce(&[], &pool(&["f1"]), 5).unwrap_err();
        assert!(matches!(err, LearnError::EmptyTrainingSet));
    }

    #[test]
    fn unlabeled_example_error() {
        let mut features = HashMap::new();
        features.insert("f1".to_string(), FeatureValue::category("A"));
        let examples = vec![Instance::unlabeled(features)];
        let err = induce(&examples, &pool(&["f1"]), 5).unwrap_err();
        assert!(matches!(err, LearnError::UnlabeledExample { index: 0 }));
    }

    #[test]
    fn plurality_is_weight_aware() {
        let mut examples = vec![
            example("en", &[("f1", "A")]),
            example("nl", &[("f1", "A")]),
            example("nl", &[("f1", "A")]),
        ];
        // One heavy "en" outweighs two light "nl".
        examples[0].set_weight(0.8);
        examples[1].set_weight(0.1);
        examples[2].set_weight(0.1);
        assert_eq!(plurality(&examples, &[0, 1, 2]), Some("en".to_string()));
    }

    #[test]
    fn plurality_tie_goes_to_first_member() {
        let examples = vec![
            example("nl", &[("f1", "A")]),
            example("en", &[("f1", "A")]),
        ];
        assert_eq!(plurality(&examples, &[0, 1]), Some("nl".to_string()));
        assert_eq!(plurality(&examples, &[1, 0]), Some("en".to_string()));
    }

    #[test]
    fn plurality_of_empty_is_absent() {
        let examples = vec![example("en", &[("f1", "A")])];
        assert_eq!(plurality(&examples, &[]), None);
    }
}
