//! Gesture classification command.

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;
use wiigee_recognizer::{Classifier, GestureModel, Match};

use super::{get_output, load_gesture, print_info, InputFormat};
use crate::Cli;

/// Classify a recording against trained models.
#[derive(Args)]
pub struct ClassifyCommand {
    /// Trained model files (repeatable)
    #[arg(short = 'm', long = "model", required = true)]
    models: Vec<String>,

    /// Recording to classify (`-` for stdin)
    gesture: String,

    /// Input layout
    #[arg(long, value_enum, default_value_t = InputFormat::Triples)]
    input_format: InputFormat,
}

#[derive(Serialize)]
struct Score {
    id: u32,
    default_probability: f64,
    matches: f64,
}

#[derive(Serialize)]
struct Report {
    #[serde(rename = "match")]
    matched: Option<Match>,
    scores: Vec<Score>,
}

impl ClassifyCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut classifier = Classifier::new();
        for path in &self.models {
            let model = GestureModel::load(path)
                .with_context(|| format!("failed to load model {path}"))?;
            classifier.add(model);
        }

        let gesture = load_gesture(&self.gesture, self.input_format)?;
        let matched = classifier.classify(&gesture)?;
        if matched.is_none() {
            print_info("no model matches the gesture");
        }

        let scores = classifier
            .models()
            .iter()
            .map(|m| -> anyhow::Result<Score> {
                Ok(Score {
                    id: m.id(),
                    default_probability: m.default_probability(),
                    matches: m.matches(&gesture)?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        get_output(cli).write(&Report { matched, scores })
    }
}
