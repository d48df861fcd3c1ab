//! Entropy and information-gain computation over weighted examples.
//!
//! Example subsets are addressed as index lists into a shared `&[Instance]`
//! slice, so partitioning never copies instances. All tallies preserve
//! first-encounter order, which is what makes tie-breaking deterministic
//! and reproducible.

use crate::error::LearnError;
use crate::instance::Instance;
use crate::value::FeatureValue;

/// A partition of example indices keyed by the feature value each example
/// takes, in first-encounter order.
pub type Partition = Vec<(FeatureValue, Vec<usize>)>;

/// Sum each member's weight into its label bucket.
///
/// Buckets appear in first-encounter order over `members`. Unlabeled
/// examples are skipped; training entry points reject them up front.
#[must_use]
pub fn weighted_label_counts<'a>(
    examples: &'a [Instance],
    members: &[usize],
) -> Vec<(&'a str, f64)> {
    let mut counts: Vec<(&str, f64)> = Vec::new();
    for &i in members {
        let Some(label) = examples[i].label() else {
            continue;
        };
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, w)) => *w += examples[i].weight(),
            None => counts.push((label, examples[i].weight())),
        }
    }
    counts
}

/// Entropy of the weighted label distribution, in bits.
///
/// `Σ -p log2(p)` where `p` is a label's weighted count over the weighted
/// total. Zero for an empty or single-label member list.
#[must_use]
pub fn entropy(examples: &[Instance], members: &[usize]) -> f64 {
    let counts = weighted_label_counts(examples, members);
    let total: f64 = counts.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return 0.0;
    }
    counts
        .iter()
        .filter(|(_, w)| *w > 0.0)
        .map(|(_, w)| {
            let p = w / total;
            -p * p.log2()
        })
        .sum()
}

/// Partition `members` by the value each example takes for `feature`.
///
/// Groups appear in first-encounter order.
///
/// # Errors
///
/// Returns [`LearnError::MissingFeature`] when any member lacks `feature`.
pub fn partition(
    examples: &[Instance],
    members: &[usize],
    feature: &str,
) -> Result<Partition, LearnError> {
    let mut groups: Partition = Vec::new();
    for &i in members {
        let value = examples[i].value(feature)?;
        match groups.iter_mut().find(|(v, _)| v == value) {
            Some((_, sub)) => sub.push(i),
            None => groups.push((value.clone(), vec![i])),
        }
    }
    Ok(groups)
}

/// Information gain of splitting `members` on `feature`, plus the
/// partition table the gain was computed from.
///
/// The remainder term weighs each group's entropy by its share of the
/// member count (not of the weight total).
///
/// # Errors
///
/// Returns [`LearnError::MissingFeature`] when any member lacks `feature`.
pub fn gain(
    examples: &[Instance],
    members: &[usize],
    feature: &str,
) -> Result<(f64, Partition), LearnError> {
    gain_with_parent(examples, members, feature, entropy(examples, members))
}

fn gain_with_parent(
    examples: &[Instance],
    members: &[usize],
    feature: &str,
    parent_entropy: f64,
) -> Result<(f64, Partition), LearnError> {
    let groups = partition(examples, members, feature)?;
    let n = members.len() as f64;
    let remainder: f64 = groups
        .iter()
        .map(|(_, sub)| (sub.len() as f64 / n) * entropy(examples, sub))
        .sum();
    Ok((parent_entropy - remainder, groups))
}

/// Evaluate the gain of every feature in `pool` and return the argmax.
///
/// Comparison is strictly-greater, so under equal gain the first feature
/// in pool order retains the maximum. The pool order is therefore the
/// tie-break policy; callers supply it in a stable order.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`LearnError::EmptyFeaturePool`] | `pool` is empty |
/// | [`LearnError::MissingFeature`] | a member lacks a pool feature |
pub fn best_split(
    examples: &[Instance],
    members: &[usize],
    pool: &[String],
) -> Result<(String, Partition), LearnError> {
    if pool.is_empty() {
        return Err(LearnError::EmptyFeaturePool);
    }

    let parent_entropy = entropy(examples, members);
    let mut best: Option<(f64, String, Partition)> = None;

    for feature in pool {
        let (gains, groups) = gain_with_parent(examples, members, feature, parent_entropy)?;
        let improves = match &best {
            Some((best_gain, _, _)) => gains > *best_gain,
            None => true,
        };
        if improves {
            best = Some((gains, feature.clone(), groups));
        }
    }

    // pool is non-empty, so best is always set.
    let (_, feature, groups) = best.ok_or(LearnError::EmptyFeaturePool)?;
    Ok((feature, groups))
}
