//! Gesture model training command.

use clap::Args;
use wiigee_recognizer::GestureModel;

use super::{get_config, get_output, load_gesture, print_success, InputFormat};
use crate::Cli;

/// Train a gesture model from example recordings.
///
/// With -o the model is saved as JSON to that path; otherwise it is
/// printed.
#[derive(Args)]
pub struct TrainCommand {
    /// Model id reported by `classify`
    #[arg(long)]
    id: u32,

    /// Example recordings of the gesture
    #[arg(required = true)]
    gestures: Vec<String>,

    /// HMM state count
    #[arg(long)]
    states: Option<usize>,

    /// Input layout
    #[arg(long, value_enum, default_value_t = InputFormat::Triples)]
    input_format: InputFormat,
}

impl TrainCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let states = match self.states {
            Some(n) => n,
            None => get_config(cli)?.states,
        };
        let gestures = self
            .gestures
            .iter()
            .map(|p| load_gesture(p, self.input_format))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut model = GestureModel::with_states(self.id, states);
        model.train(&gestures)?;
        tracing::debug!(
            id = self.id,
            default_probability = model.default_probability(),
            "trained model"
        );

        match &cli.output {
            Some(path) => {
                model.save(path)?;
                print_success(&format!(
                    "Model {} trained on {} gestures, saved to {}",
                    self.id,
                    gestures.len(),
                    path
                ));
                Ok(())
            }
            None => get_output(cli).write(&model),
        }
    }
}
