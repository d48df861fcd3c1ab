use std::path::PathBuf;

/// Errors from corpus file reading.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Returned when the corpus file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a labeled line has no `label|sentence` separator.
    #[error("missing label separator in {path} at line {line_number}")]
    MissingLabel {
        /// Path to the corpus file.
        path: PathBuf,
        /// One-based line number of the offending line.
        line_number: usize,
    },

    /// Returned when a labeled line has an empty label.
    #[error("empty label in {path} at line {line_number}")]
    EmptyLabel {
        /// Path to the corpus file.
        path: PathBuf,
        /// One-based line number of the offending line.
        line_number: usize,
    },

    /// Returned when the corpus contains no usable lines.
    #[error("empty corpus (no usable lines) in {path}")]
    EmptyCorpus {
        /// Path to the corpus file.
        path: PathBuf,
    },
}
