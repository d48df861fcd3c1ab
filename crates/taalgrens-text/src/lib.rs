//! Corpus reading and feature extraction for the taalgrens classifier.

mod error;
mod reader;

pub mod features;

pub use error::TextError;
pub use reader::CorpusReader;
