//! HMM scoring command.

use std::fmt::Write as _;

use clap::Args;
use serde::Serialize;
use wiigee_hmm::{Hmm, Topology};

use super::get_output;
use crate::Cli;

/// Score an observation sequence with a fresh HMM.
///
/// Builds an untrained left-to-right model, prints the backward table of
/// the sequence, its probability and the model tables.
#[derive(Args)]
pub struct HmmCommand {
    /// Number of hidden states
    #[arg(long, default_value_t = 5)]
    states: usize,

    /// Size of the observation alphabet
    #[arg(long, default_value_t = 10)]
    observations: usize,

    /// Comma-separated observation sequence
    #[arg(long, value_delimiter = ',', default_values_t = [0, 1, 1, 0, 0])]
    sequence: Vec<usize>,

    /// Initial transitions: banded, banded:<jump limit> or left-right
    #[arg(long, default_value = "banded")]
    topology: Topology,

    /// Run one training step on the sequence before scoring it
    #[arg(long)]
    train: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    backward: Vec<Vec<f64>>,
    probability: f64,
    model: &'a Hmm,
}

impl HmmCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut hmm = Hmm::with_topology(self.states, self.observations, self.topology)?;
        if self.train {
            hmm.train(&[self.sequence.as_slice()])?;
        }
        let backward = hmm.backward(&self.sequence)?;
        let probability = hmm.probability(&self.sequence)?;

        let output = get_output(cli);
        if cli.json {
            return output.write(&Report {
                backward,
                probability,
                model: &hmm,
            });
        }

        let mut text = String::from("Backward:\n");
        for (i, row) in backward.iter().enumerate() {
            write!(text, "state{i}:")?;
            for b in row {
                write!(text, "\t{b:e}")?;
            }
            writeln!(text)?;
        }
        writeln!(text, "Probability: {probability:e}")?;
        writeln!(text)?;
        write!(text, "{hmm}")?;
        output.write_text(&text)
    }
}
