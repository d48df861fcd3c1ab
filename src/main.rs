use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use taalgrens_learn::{BoostConfig, Model, TreeConfig};
use taalgrens_text::features::{extract, feature_names};
use taalgrens_text::CorpusReader;

#[derive(Parser)]
#[command(name = "taalgrens")]
#[command(about = "English/Dutch sentence classification with decision trees and boosting")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Learner {
    /// A single information-gain decision tree
    Tree,
    /// A boosted ensemble of decision stumps
    Boost,
}

#[derive(Subcommand)]
enum Command {
    /// Train a classifier on a labeled corpus and save the model
    Train {
        /// Path to the labeled corpus (`label|sentence` per line)
        #[arg(long)]
        data: PathBuf,

        /// Output path for the trained model binary
        #[arg(long)]
        model: PathBuf,

        /// Which learner to train
        #[arg(long, value_enum, default_value_t = Learner::Tree)]
        learner: Learner,

        /// Number of boosting rounds (boost learner only)
        #[arg(long, default_value_t = 5)]
        rounds: usize,

        /// Maximum tree depth (tree learner only)
        #[arg(long, default_value_t = 7)]
        depth: usize,
    },

    /// Score a saved model against a labeled corpus
    Evaluate {
        /// Path to the trained model binary
        #[arg(long)]
        model: PathBuf,

        /// Path to the labeled corpus (`label|sentence` per line)
        #[arg(long)]
        data: PathBuf,
    },

    /// Classify sentences with a saved model
    Predict {
        /// Path to the trained model binary
        #[arg(long)]
        model: PathBuf,

        /// A single sentence to classify
        #[arg(long, conflicts_with = "data")]
        sentence: Option<String>,

        /// Path to an unlabeled corpus (one sentence per line)
        #[arg(long, required_unless_present = "sentence")]
        data: Option<PathBuf>,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct TrainOutput {
    learner: String,
    n_examples: usize,
    n_features: usize,
    model_path: String,
    tree_depth: Option<usize>,
    n_leaves: Option<usize>,
    ensemble_size: Option<usize>,
}

#[derive(Serialize)]
struct EvaluateOutput {
    n_examples: usize,
    n_correct: usize,
    accuracy: f64,
    per_label: HashMap<String, LabelCounts>,
}

#[derive(Serialize)]
struct LabelCounts {
    total: usize,
    correct: usize,
}

#[derive(Serialize)]
struct PredictOutput {
    predictions: Vec<Prediction>,
}

#[derive(Serialize)]
struct Prediction {
    sentence: String,
    label: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Train {
            data,
            model,
            learner,
            rounds,
            depth,
        } => {
            let examples = CorpusReader::new(&data)
                .read_labeled()
                .context("failed to read training corpus")?;
            let pool = feature_names();
            info!(
                n_examples = examples.len(),
                n_features = pool.len(),
                "training data loaded"
            );

            let n_examples = examples.len();
            let (trained, tree_depth, n_leaves, ensemble_size) = match learner {
                Learner::Tree => {
                    let tree = TreeConfig::new()
                        .with_max_depth(depth)
                        .fit(&examples, &pool)
                        .context("tree induction failed")?;
                    info!(depth = tree.depth(), n_leaves = tree.n_leaves(), "tree trained");
                    let (d, l) = (tree.depth(), tree.n_leaves());
                    (Model::Tree(tree), Some(d), Some(l), None)
                }
                Learner::Boost => {
                    let ensemble = BoostConfig::new(rounds)?
                        .fit(examples, &pool)
                        .context("boosting failed")?;
                    info!(n_stumps = ensemble.len(), "ensemble trained");
                    let size = ensemble.len();
                    (Model::Ensemble(ensemble), None, None, Some(size))
                }
            };

            trained.save(&model).context("failed to save model")?;
            info!(path = %model.display(), "model saved");

            let output = TrainOutput {
                learner: format!("{learner:?}").to_lowercase(),
                n_examples,
                n_features: pool.len(),
                model_path: model.display().to_string(),
                tree_depth,
                n_leaves,
                ensemble_size,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Evaluate { model, data } => {
            let trained = Model::load(&model).context("failed to load model")?;
            let examples = CorpusReader::new(&data)
                .read_labeled()
                .context("failed to read evaluation corpus")?;
            info!(n_examples = examples.len(), "evaluation data loaded");

            let mut n_correct = 0usize;
            let mut per_label: HashMap<String, LabelCounts> = HashMap::new();
            for ex in &examples {
                let Some(actual) = ex.label() else { continue };
                let predicted = trained.classify(ex).context("classification failed")?;
                let counts = per_label.entry(actual.to_string()).or_insert(LabelCounts {
                    total: 0,
                    correct: 0,
                });
                counts.total += 1;
                if predicted == Some(actual) {
                    counts.correct += 1;
                    n_correct += 1;
                }
            }

            let accuracy = n_correct as f64 / examples.len() as f64;
            info!(accuracy, n_correct, n_examples = examples.len(), "evaluation complete");

            let output = EvaluateOutput {
                n_examples: examples.len(),
                n_correct,
                accuracy,
                per_label,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Predict {
            model,
            sentence,
            data,
        } => {
            let trained = Model::load(&model).context("failed to load model")?;

            let inputs = if let Some(sentence) = sentence {
                let instance = taalgrens_learn::Instance::unlabeled(extract(&sentence));
                vec![(sentence, instance)]
            } else {
                let data = data.context("either --sentence or --data is required")?;
                CorpusReader::new(&data)
                    .read_unlabeled()
                    .context("failed to read prediction corpus")?
            };
            info!(n_sentences = inputs.len(), "prediction inputs loaded");

            let mut predictions = Vec::with_capacity(inputs.len());
            for (text, instance) in &inputs {
                let label = trained
                    .classify(instance)
                    .context("classification failed")?;
                predictions.push(Prediction {
                    sentence: text.clone(),
                    label: label.map(str::to_string),
                });
            }

            let output = PredictOutput { predictions };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
