//! Decision-tree and AdaBoost learning for short-text language classification.
//!
//! Provides information-gain tree induction over discrete feature
//! vectors, deterministic tree evaluation with a subtree-vote fallback
//! for unseen branch values, a weighted sample distribution, AdaBoost
//! ensemble training over depth-limited stumps, and model serialization.

mod boost;
mod error;
mod gain;
mod instance;
mod node;
mod sample;
mod serialize;
mod tree;
mod value;

pub use boost::{BoostConfig, Ensemble, WeightedStump};
pub use error::LearnError;
pub use gain::{Partition, best_split, entropy, gain, partition, weighted_label_counts};
pub use instance::Instance;
pub use node::DecisionNode;
pub use sample::WeightedSample;
pub use serialize::Model;
pub use tree::{TreeConfig, induce, plurality};
pub use value::FeatureValue;
