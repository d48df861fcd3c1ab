//! Model persistence via bincode.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::boost::Ensemble;
use crate::error::LearnError;
use crate::instance::Instance;
use crate::node::DecisionNode;

/// Current binary format version.
const FORMAT_VERSION: u32 = 1;

/// A trained predictor: a single decision tree or a boosted ensemble.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Model {
    /// A single decision tree classified by traversal.
    Tree(DecisionNode),
    /// A boosted ensemble classified by weighted-majority vote.
    Ensemble(Ensemble),
}

/// Versioned envelope for the serialized model.
#[derive(serde::Serialize, serde::Deserialize)]
struct ModelEnvelope {
    /// Format version for compatibility checking.
    format_version: u32,
    /// The serialized model.
    model: Model,
}

impl Model {
    /// Classify one instance with whichever predictor this model wraps.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::MissingFeature`] when the instance lacks a
    /// feature the model splits on.
    pub fn classify<'a>(&'a self, instance: &Instance) -> Result<Option<&'a str>, LearnError> {
        match self {
            Model::Tree(tree) => tree.classify(instance),
            Model::Ensemble(ensemble) => ensemble.vote(instance),
        }
    }

    /// Save the model to a binary file.
    ///
    /// Uses bincode encoding wrapped in a versioned envelope for
    /// forward-compatibility checking.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`LearnError::SerializeModel`] | bincode encoding failed |
    /// | [`LearnError::WriteModel`] | file write failed |
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LearnError> {
        let path = path.as_ref();

        let envelope = ModelEnvelope {
            format_version: FORMAT_VERSION,
            model: self.clone(),
        };

        let bytes =
            bincode::serialize(&envelope).map_err(|e| LearnError::SerializeModel { source: e })?;

        std::fs::write(path, &bytes).map_err(|e| LearnError::WriteModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(size_bytes = bytes.len(), "model saved");

        Ok(())
    }

    /// Load a model from a binary file.
    ///
    /// Checks the format version and returns an error on mismatch.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`LearnError::ReadModel`] | file read failed |
    /// | [`LearnError::DeserializeModel`] | bincode decoding failed |
    /// | [`LearnError::IncompatibleModelVersion`] | format version mismatch |
    #[instrument(fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LearnError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| LearnError::ReadModel {
            path: path.to_path_buf(),
            source: e,
        })?;

        let envelope: ModelEnvelope =
            bincode::deserialize(&bytes).map_err(|e| LearnError::DeserializeModel {
                path: path.to_path_buf(),
                source: e,
            })?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(LearnError::IncompatibleModelVersion {
                expected: FORMAT_VERSION,
                found: envelope.format_version,
                path: path.to_path_buf(),
            });
        }

        debug!("model loaded");

        Ok(envelope.model)
    }
}
