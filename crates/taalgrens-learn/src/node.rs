use crate::error::LearnError;
use crate::instance::Instance;
use crate::value::FeatureValue;

/// A node in an induced decision tree.
///
/// Trees are owned recursive structures: a `Branch` exclusively owns its
/// children, keyed by the feature value observed during training. Child
/// order is the first-encounter order of values in the training
/// partition, which fixes the tie-break order for subtree voting.
///
/// A `Leaf` label of `None` records that the branch's fallback plurality
/// was computed over an empty set; classification reports it as an absent
/// decision rather than inventing a label.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum DecisionNode {
    /// A terminal node carrying the predicted label.
    Leaf {
        /// Predicted label, absent when no training example reached here.
        label: Option<String>,
    },
    /// An interior node splitting on one feature.
    Branch {
        /// Feature the node splits on.
        feature: String,
        /// Children keyed by observed feature value, in first-encounter order.
        children: Vec<(FeatureValue, DecisionNode)>,
    },
}

impl DecisionNode {
    /// Create a leaf with the given predicted label.
    #[must_use]
    pub fn leaf(label: Option<String>) -> Self {
        Self::Leaf { label }
    }

    pub(crate) fn branch(feature: String, children: Vec<(FeatureValue, DecisionNode)>) -> Self {
        Self::Branch { feature, children }
    }

    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Return the child reached through `value`, if that value was seen
    /// during training.
    #[must_use]
    pub fn child(&self, value: &FeatureValue) -> Option<&DecisionNode> {
        match self {
            Self::Leaf { .. } => None,
            Self::Branch { children, .. } => children
                .iter()
                .find(|(v, _)| v == value)
                .map(|(_, child)| child),
        }
    }

    /// Height of the tree below this node. A leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Branch { children, .. } => {
                1 + children
                    .iter()
                    .map(|(_, child)| child.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Number of leaves in the subtree rooted here.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Branch { children, .. } => {
                children.iter().map(|(_, child)| child.n_leaves()).sum()
            }
        }
    }

    /// Classify one instance by descending from this node.
    ///
    /// At a branch whose feature value was never seen during training,
    /// descent stops and the subtree's majority vote is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::MissingFeature`] when the instance lacks a
    /// feature some branch splits on.
    pub fn classify<'a>(&'a self, instance: &Instance) -> Result<Option<&'a str>, LearnError> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { label } => return Ok(label.as_deref()),
                Self::Branch { feature, .. } => {
                    let value = instance.value(feature)?;
                    match node.child(value) {
                        Some(child) => node = child,
                        None => return Ok(node.subtree_vote()),
                    }
                }
            }
        }
    }

    /// Majority vote over the leaves of the subtree rooted here.
    ///
    /// A leaf votes its own label; a branch tallies each child's vote and
    /// picks the label with the highest tally, first-seen-wins on ties
    /// (child order). A childless branch, or one whose every child votes
    /// absent, votes `None`.
    #[must_use]
    pub fn subtree_vote(&self) -> Option<&str> {
        match self {
            Self::Leaf { label } => label.as_deref(),
            Self::Branch { children, .. } => {
                let mut tally: Vec<(&str, usize)> = Vec::new();
                let mut winner = None;
                let mut max_count = 0;
                for (_, child) in children {
                    let Some(vote) = child.subtree_vote() else {
                        continue;
                    };
                    let count = match tally.iter_mut().find(|(l, _)| *l == vote) {
                        Some((_, c)) => {
                            *c += 1;
                            *c
                        }
                        None => {
                            tally.push((vote, 1));
                            1
                        }
                    };
                    if count > max_count {
                        max_count = count;
                        winner = Some(vote);
                    }
                }
                winner
            }
        }
    }
}
