//! Gesture quantization command.

use std::fmt::Write as _;

use clap::Args;
use serde::Serialize;
use wiigee_quantizer::Quantizer;

use super::{get_config, get_output, load_gesture, InputFormat};
use crate::Cli;

/// Quantize one gesture into an observation sequence.
///
/// Trains a fresh quantizer on the gesture and prints the gesture's
/// observation sequence, one symbol per line.
#[derive(Args)]
pub struct QuantizeCommand {
    /// Gesture file (`-` for stdin)
    input: String,

    /// HMM state count; the minimum sequence length
    #[arg(long)]
    states: Option<usize>,

    /// Also print the trained centroids
    #[arg(long)]
    centroids: bool,

    /// Input layout
    #[arg(long, value_enum, default_value_t = InputFormat::Triples)]
    input_format: InputFormat,
}

#[derive(Serialize)]
struct Report<'a> {
    rounds: usize,
    radius: f64,
    centroids: &'a [[f64; 3]],
    sequence: Vec<usize>,
}

impl QuantizeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let states = match self.states {
            Some(n) => n,
            None => get_config(cli)?.states,
        };
        let gesture = load_gesture(&self.input, self.input_format)?;

        let mut quantizer = Quantizer::new(states);
        let rounds = quantizer.train(&gesture)?;
        let sequence = quantizer.observation_sequence(&gesture)?;

        let output = get_output(cli);
        if cli.json {
            return output.write(&Report {
                rounds,
                radius: quantizer.radius(),
                centroids: quantizer.centroids(),
                sequence,
            });
        }

        let mut text = String::new();
        if self.centroids {
            write!(text, "{quantizer}")?;
        }
        for symbol in sequence {
            writeln!(text, "{symbol}")?;
        }
        output.write_text(&text)
    }
}
