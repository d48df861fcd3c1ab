use crate::instance::Instance;

/// A fixed, ordered example set with a mutable weight distribution.
///
/// `dist_sum` is the distribution total recorded at construction and
/// never changes; `sum` tracks the current total across point updates.
/// The invariant `sum == Σ weights` holds after every operation, and
/// [`normalize`](WeightedSample::normalize) restores `sum ≈ dist_sum`.
#[derive(Debug)]
pub struct WeightedSample {
    examples: Vec<Instance>,
    sum: f64,
    dist_sum: f64,
}

impl WeightedSample {
    /// Take ownership of `examples` and set every weight to `1/N`.
    #[must_use]
    pub fn uniform(mut examples: Vec<Instance>) -> Self {
        let n = examples.len();
        if n > 0 {
            let weight = 1.0 / n as f64;
            for example in &mut examples {
                example.set_weight(weight);
            }
        }
        let sum: f64 = examples.iter().map(Instance::weight).sum();
        Self {
            examples,
            sum,
            dist_sum: sum,
        }
    }

    /// Take ownership of `examples`, preserving the weights they carry.
    #[must_use]
    pub fn from_weights(examples: Vec<Instance>) -> Self {
        let sum: f64 = examples.iter().map(Instance::weight).sum();
        Self {
            examples,
            sum,
            dist_sum: sum,
        }
    }

    /// Return the member examples in their fixed order.
    #[must_use]
    pub fn examples(&self) -> &[Instance] {
        &self.examples
    }

    /// Return the member at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> &Instance {
        &self.examples[index]
    }

    /// Return the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Return `true` when the sample has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Return the current total weight.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Return the distribution total fixed at construction.
    #[must_use]
    pub fn dist_sum(&self) -> f64 {
        self.dist_sum
    }

    /// Replace one member's weight, adjusting the running total by the
    /// delta in O(1).
    pub fn change_weight(&mut self, index: usize, new_weight: f64) {
        let old = self.examples[index].weight();
        self.examples[index].set_weight(new_weight);
        self.sum += new_weight - old;
    }

    /// Rescale every weight by `dist_sum / sum` so the total returns to
    /// `dist_sum`, then recompute `sum` from the rescaled values rather
    /// than assuming exact equality under floating point.
    pub fn normalize(&mut self) {
        let scale = self.dist_sum / self.sum;
        let mut total = 0.0;
        for example in &mut self.examples {
            let weight = example.weight() * scale;
            example.set_weight(weight);
            total += weight;
        }
        self.sum = total;
    }

    /// Consume the sample and return the examples with their final weights.
    #[must_use]
    pub fn into_examples(self) -> Vec<Instance> {
        self.examples
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::WeightedSample;
    use crate::instance::Instance;
    use crate::value::FeatureValue;

    fn examples(n: usize) -> Vec<Instance> {
        (0..n)
            .map(|i| {
                let mut features = HashMap::new();
                features.insert("f1".to_string(), FeatureValue::category(format!("v{i}")));
                Instance::labeled(if i % 2 == 0 { "en" } else { "nl" }, features)
            })
            .collect()
    }

    #[test]
    fn uniform_initialises_to_one_over_n() {
        let sample = WeightedSample::uniform(examples(4));
        for example in sample.examples() {
            assert!((example.weight() - 0.25).abs() < 1e-12);
        }
        assert!((sample.sum() - 1.0).abs() < 1e-12);
        assert!((sample.dist_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn from_weights_preserves_existing_weights() {
        let sample = WeightedSample::from_weights(examples(3));
        assert!((sample.sum() - 3.0).abs() < 1e-12);
        assert!((sample.get(0).weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn change_weight_updates_sum_by_delta() {
        let mut sample = WeightedSample::uniform(examples(4));
        sample.change_weight(2, 0.05);
        assert!((sample.get(2).weight() - 0.05).abs() < 1e-12);
        assert!((sample.sum() - 0.85).abs() < 1e-12);
        // dist_sum is fixed at construction.
        assert!((sample.dist_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_restores_dist_sum() {
        let mut sample = WeightedSample::uniform(examples(8));
        for i in 0..4 {
            sample.change_weight(i, sample.get(i).weight() * 0.3);
        }
        sample.normalize();
        assert!((sample.sum() - sample.dist_sum()).abs() < 1e-9);
        let total: f64 = sample.examples().iter().map(Instance::weight).sum();
        assert!((total - sample.dist_sum()).abs() < 1e-9);
    }

    #[test]
    fn normalize_preserves_relative_weights() {
        let mut sample = WeightedSample::uniform(examples(2));
        sample.change_weight(0, 0.3);
        sample.change_weight(1, 0.1);
        sample.normalize();
        let ratio = sample.get(0).weight() / sample.get(1).weight();
        assert!((ratio - 3.0).abs() < 1e-9);
    }
}
