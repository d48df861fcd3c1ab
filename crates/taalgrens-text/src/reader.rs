//! Line-oriented corpus reader with input validation.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use taalgrens_learn::Instance;
use tracing::{debug, info, instrument};

use crate::TextError;
use crate::features::extract;

/// Lines at or below this trimmed length are discarded as noise.
const MIN_LINE_LEN: usize = 4;

/// Reads sentences from a text corpus, one per line.
///
/// Labeled corpora use the `label|sentence` format. Unlabeled corpora
/// are bare sentences. Lines whose trimmed sentence text is shorter
/// than four characters are skipped in both modes.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`TextError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`TextError::MissingLabel`] | Labeled line without a `\|` separator |
/// | [`TextError::EmptyLabel`] | Labeled line with a blank label |
/// | [`TextError::EmptyCorpus`] | No usable lines after skipping |
pub struct CorpusReader {
    path: PathBuf,
}

impl CorpusReader {
    /// Create a new reader for the given corpus file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read a labeled corpus, extracting features from every sentence.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read_labeled(&self) -> Result<Vec<Instance>, TextError> {
        let mut instances = Vec::new();
        for (line_number, line) in self.lines()?.into_iter().enumerate() {
            let line_number = line_number + 1;
            let Some((label, sentence)) = line.split_once('|') else {
                return Err(TextError::MissingLabel {
                    path: self.path.clone(),
                    line_number,
                });
            };
            let label = label.trim();
            if label.is_empty() {
                return Err(TextError::EmptyLabel {
                    path: self.path.clone(),
                    line_number,
                });
            }
            let sentence = sentence.trim();
            if sentence.len() < MIN_LINE_LEN {
                debug!(line_number, "skipping short line");
                continue;
            }
            instances.push(Instance::labeled(label, extract(sentence)));
        }
        if instances.is_empty() {
            return Err(TextError::EmptyCorpus {
                path: self.path.clone(),
            });
        }
        info!(n_examples = instances.len(), "labeled corpus loaded");
        Ok(instances)
    }

    /// Read an unlabeled corpus, pairing each usable sentence with its
    /// extracted features.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read_unlabeled(&self) -> Result<Vec<(String, Instance)>, TextError> {
        let mut instances = Vec::new();
        for line in self.lines()? {
            let sentence = line.trim();
            if sentence.len() < MIN_LINE_LEN {
                continue;
            }
            instances.push((sentence.to_string(), Instance::unlabeled(extract(sentence))));
        }
        if instances.is_empty() {
            return Err(TextError::EmptyCorpus {
                path: self.path.clone(),
            });
        }
        info!(n_sentences = instances.len(), "unlabeled corpus loaded");
        Ok(instances)
    }

    fn lines(&self) -> Result<Vec<String>, TextError> {
        let file = std::fs::File::open(&self.path).map_err(|e| TextError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TextError::FileNotFound {
                path: self.path.clone(),
                source: e,
            })
    }
}
