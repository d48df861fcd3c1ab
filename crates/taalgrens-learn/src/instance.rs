use std::collections::HashMap;

use crate::error::LearnError;
use crate::value::FeatureValue;

/// A single example: a fixed feature mapping, an optional ground-truth
/// label, and a training weight.
///
/// All instances passed into one induction call must carry exactly the
/// same feature-name set; a lookup of a name an instance does not have is
/// a loud [`LearnError::MissingFeature`], never a silent default.
///
/// The weight defaults to `1.0` and is mutated only by
/// [`WeightedSample`](crate::WeightedSample) during boosting.
#[derive(Debug, Clone)]
pub struct Instance {
    label: Option<String>,
    features: HashMap<String, FeatureValue>,
    weight: f64,
}

impl Instance {
    /// Create a labeled training instance with unit weight.
    pub fn labeled(label: impl Into<String>, features: HashMap<String, FeatureValue>) -> Self {
        Self {
            label: Some(label.into()),
            features,
            weight: 1.0,
        }
    }

    /// Create an unlabeled instance for prediction.
    #[must_use]
    pub fn unlabeled(features: HashMap<String, FeatureValue>) -> Self {
        Self {
            label: None,
            features,
            weight: 1.0,
        }
    }

    /// Return the ground-truth label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Return the feature mapping.
    #[must_use]
    pub fn features(&self) -> &HashMap<String, FeatureValue> {
        &self.features
    }

    /// Look up the value this instance takes for `feature`.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::MissingFeature`] when the instance has no
    /// value under that name.
    pub fn value(&self, feature: &str) -> Result<&FeatureValue, LearnError> {
        self.features
            .get(feature)
            .ok_or_else(|| LearnError::MissingFeature {
                feature: feature.to_string(),
            })
    }

    /// Return the current training weight.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub(crate) fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Instance;
    use crate::error::LearnError;
    use crate::value::FeatureValue;

    fn one_feature(name: &str, value: FeatureValue) -> HashMap<String, FeatureValue> {
        let mut map = HashMap::new();
        map.insert(name.to_string(), value);
        map
    }

    #[test]
    fn labeled_instance_has_label_and_unit_weight() {
        let ex = Instance::labeled("en", one_feature("f1", FeatureValue::flag(true)));
        assert_eq!(ex.label(), Some("en"));
        assert!((ex.weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unlabeled_instance_has_no_label() {
        let ex = Instance::unlabeled(one_feature("f1", FeatureValue::flag(true)));
        assert_eq!(ex.label(), None);
    }

    #[test]
    fn value_lookup() {
        let ex = Instance::labeled("en", one_feature("f1", FeatureValue::category("A")));
        assert_eq!(ex.value("f1").unwrap(), &FeatureValue::category("A"));
    }

    #[test]
    fn missing_feature_is_loud() {
        let ex = Instance::labeled("en", one_feature("f1", FeatureValue::category("A")));
        let err = ex.value("f2").unwrap_err();
        assert!(matches!(err, LearnError::MissingFeature { feature } if feature == "f2"));
    }
}
