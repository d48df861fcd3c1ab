use std::fmt;

use ordered_float::OrderedFloat;

/// A discrete feature value: either a categorical token or a bucketed
/// numeric range.
///
/// Buckets are half-open intervals `[low, high)`; `high = None` means the
/// bucket is unbounded above. Range bounds are stored as
/// [`OrderedFloat`] so that values can be compared, hashed, and used as
/// partition keys structurally — a `Range` equals another `Range` exactly
/// when both bounds match bit-for-bit.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum FeatureValue {
    /// A categorical token, e.g. `"true"` for a lexical flag.
    Category(String),
    /// A half-open numeric bucket `[low, high)`.
    Range {
        /// Inclusive lower bound.
        low: OrderedFloat<f64>,
        /// Exclusive upper bound; `None` means unbounded.
        high: Option<OrderedFloat<f64>>,
    },
}

impl FeatureValue {
    /// Create a categorical value from a token.
    pub fn category(token: impl Into<String>) -> Self {
        Self::Category(token.into())
    }

    /// Create a categorical value from a boolean flag.
    #[must_use]
    pub fn flag(value: bool) -> Self {
        Self::Category(if value { "true" } else { "false" }.to_string())
    }

    /// Create a bucket value `[low, high)`; `None` means unbounded above.
    #[must_use]
    pub fn range(low: f64, high: Option<f64>) -> Self {
        Self::Range {
            low: OrderedFloat(low),
            high: high.map(OrderedFloat),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Category(token) => f.write_str(token),
            FeatureValue::Range { low, high: Some(high) } => {
                write!(f, "[{low}, {high})")
            }
            FeatureValue::Range { low, high: None } => write!(f, "[{low}, inf)"),
        }
    }
}
