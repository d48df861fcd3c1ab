use std::path::PathBuf;

/// Errors from tree induction, boosting, and model persistence.
#[derive(Debug, thiserror::Error)]
pub enum LearnError {
    /// Returned when an instance has no value for a requested feature.
    #[error("instance has no value for feature \"{feature}\"")]
    MissingFeature {
        /// The feature name that was looked up.
        feature: String,
    },

    /// Returned when a training example carries no ground-truth label.
    #[error("training example {index} has no label")]
    UnlabeledExample {
        /// Zero-based index of the offending example.
        index: usize,
    },

    /// Returned when training is attempted on zero examples.
    #[error("training requires at least one example")]
    EmptyTrainingSet,

    /// Returned when a split is requested over an empty feature pool.
    #[error("split selection requires a non-empty feature pool")]
    EmptyFeaturePool,

    /// Returned when ensemble_size is zero.
    #[error("ensemble_size must be at least 1, got {ensemble_size}")]
    InvalidEnsembleSize {
        /// The invalid ensemble_size value provided.
        ensemble_size: usize,
    },

    /// Returned when a boosting round produces a weighted error of zero
    /// or of the full distribution total. Both directions make the
    /// reweighting factor and the stump weight undefined; the round is
    /// not recovered and the ensemble is unusable.
    #[error(
        "boosting round {round} degenerated: weighted error {error} of total {dist_sum} \
         admits no reweighting"
    )]
    DegenerateRound {
        /// Zero-based boosting round.
        round: usize,
        /// The weighted error of the round's stump.
        error: f64,
        /// The sample's distribution total.
        dist_sum: f64,
    },

    /// Returned when model serialization fails.
    #[error("failed to serialize model")]
    SerializeModel {
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when model deserialization fails.
    #[error("failed to deserialize model from {path}")]
    DeserializeModel {
        /// Path to the model file that could not be deserialized.
        path: PathBuf,
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when writing the model file fails.
    #[error("failed to write model to {path}")]
    WriteModel {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading the model file fails.
    #[error("failed to read model from {path}")]
    ReadModel {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when loading a model with an incompatible format version.
    #[error("incompatible model version in {path}: expected {expected}, found {found}")]
    IncompatibleModelVersion {
        /// The model format version this build expects.
        expected: u32,
        /// The model format version found in the file.
        found: u32,
        /// Path to the model file with the incompatible version.
        path: PathBuf,
    },
}
