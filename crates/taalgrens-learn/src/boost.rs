//! AdaBoost over depth-limited stumps.
//!
//! Each round trains a stump on the current weight distribution, then
//! DOWN-weights the correctly classified examples by
//! `error / (dist_sum - error)`. This is the inverse of the textbook
//! up-weighting of errors and is the system's defined behavior; it shifts
//! the distribution toward hard examples all the same.

use tracing::{debug, info, instrument};

use crate::error::LearnError;
use crate::instance::Instance;
use crate::node::DecisionNode;
use crate::sample::WeightedSample;
use crate::tree::induce;

/// Configuration for AdaBoost ensemble training.
///
/// Construct via [`BoostConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter     | Default |
/// |---------------|---------|
/// | `stump_depth` | 1       |
#[derive(Debug, Clone)]
pub struct BoostConfig {
    ensemble_size: usize,
    stump_depth: usize,
}

impl BoostConfig {
    /// Create a new config with the given number of boosting rounds.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::InvalidEnsembleSize`] if `ensemble_size` is zero.
    pub fn new(ensemble_size: usize) -> Result<Self, LearnError> {
        if ensemble_size == 0 {
            return Err(LearnError::InvalidEnsembleSize { ensemble_size });
        }
        Ok(Self {
            ensemble_size,
            stump_depth: 1,
        })
    }

    /// Set the depth budget of each ensemble member. Depth 1 (the
    /// default) trains single-split stumps.
    #[must_use]
    pub fn with_stump_depth(mut self, stump_depth: usize) -> Self {
        self.stump_depth = stump_depth;
        self
    }

    /// Return the number of boosting rounds.
    #[must_use]
    pub fn ensemble_size(&self) -> usize {
        self.ensemble_size
    }

    /// Return the per-member depth budget.
    #[must_use]
    pub fn stump_depth(&self) -> usize {
        self.stump_depth
    }

    /// Train an ensemble, consuming `examples` into the weighted sample.
    ///
    /// One round per ensemble member: induce a stump over the weighted
    /// examples, compute the weighted error, down-weight the correctly
    /// classified examples, normalize, and append the stump with weight
    /// `ln((dist_sum - error) / error)`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`LearnError::EmptyTrainingSet`] | `examples` is empty |
    /// | [`LearnError::UnlabeledExample`] | an example has no label |
    /// | [`LearnError::MissingFeature`] | an example lacks a pool feature |
    /// | [`LearnError::DegenerateRound`] | a round's error is 0 or `dist_sum` |
    #[instrument(skip(self, examples, features), fields(n_examples = examples.len(), ensemble_size = self.ensemble_size))]
    pub fn fit(
        &self,
        examples: Vec<Instance>,
        features: &[String],
    ) -> Result<Ensemble, LearnError> {
        if examples.is_empty() {
            return Err(LearnError::EmptyTrainingSet);
        }

        let mut sample = WeightedSample::uniform(examples);
        let mut members = Vec::with_capacity(self.ensemble_size);

        for round in 0..self.ensemble_size {
            let stump = induce(sample.examples(), features, self.stump_depth)?;

            let mut error = 0.0;
            let mut correct = Vec::with_capacity(sample.len());
            for example in sample.examples() {
                let decision = stump.classify(example)?;
                let hit = decision == example.label();
                if !hit {
                    error += example.weight();
                }
                correct.push(hit);
            }

            let dist_sum = sample.dist_sum();
            check_round_error(round, error, dist_sum)?;

            let factor = error / (dist_sum - error);
            for (index, &hit) in correct.iter().enumerate() {
                if hit {
                    let weight = sample.get(index).weight() * factor;
                    sample.change_weight(index, weight);
                }
            }
            sample.normalize();

            let weight = ((dist_sum - error) / error).ln();
            debug!(round, error, stump_weight = weight, "boosting round complete");
            members.push(WeightedStump { stump, weight });
        }

        info!(n_members = members.len(), "ensemble trained");
        Ok(Ensemble { members })
    }
}

/// Reject the two degenerate error values that would divide by zero or
/// leave the logarithm undefined. Neither direction is recovered; the
/// caller must treat the ensemble as unusable.
fn check_round_error(round: usize, error: f64, dist_sum: f64) -> Result<(), LearnError> {
    if error <= 0.0 || error >= dist_sum {
        return Err(LearnError::DegenerateRound {
            round,
            error,
            dist_sum,
        });
    }
    Ok(())
}

/// One ensemble member: a stump and its vote weight.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WeightedStump {
    pub(crate) stump: DecisionNode,
    pub(crate) weight: f64,
}

impl WeightedStump {
    /// Return the member's decision stump.
    #[must_use]
    pub fn stump(&self) -> &DecisionNode {
        &self.stump
    }

    /// Return the member's vote weight.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// An ordered sequence of weighted stumps combined by weighted-majority
/// vote. Member order is boosting round order; the ensemble is immutable
/// once training completes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Ensemble {
    pub(crate) members: Vec<WeightedStump>,
}

impl Ensemble {
    /// Return the members in round order.
    #[must_use]
    pub fn members(&self) -> &[WeightedStump] {
        &self.members
    }

    /// Return the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Return `true` when the ensemble has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Classify one instance by weighted-majority vote.
    ///
    /// Each member's vote weight accumulates into a tally keyed by its
    /// decision; the label with the highest running total wins, and on
    /// ties the first label to reach the current maximum (in round
    /// order) keeps it. Members whose stump decides absent are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::MissingFeature`] when the instance lacks a
    /// feature some stump splits on.
    pub fn vote<'a>(&'a self, instance: &Instance) -> Result<Option<&'a str>, LearnError> {
        let mut tally: Vec<(&str, f64)> = Vec::new();
        let mut winner = None;
        let mut max_weight = 0.0;

        for member in &self.members {
            let Some(decision) = member.stump.classify(instance)? else {
                continue;
            };
            let total = match tally.iter_mut().find(|(l, _)| *l == decision) {
                Some((_, t)) => {
                    *t += member.weight;
                    *t
                }
                None => {
                    tally.push((decision, member.weight));
                    member.weight
                }
            };
            if total > max_weight {
                max_weight = total;
                winner = Some(decision);
            }
        }

        Ok(winner)
    }
}
