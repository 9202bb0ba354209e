//! Acceleration extraction from wmdump logs.

use std::fmt::Write as _;

use clap::Args;
use wiigee_wmdump::extract_accelerations;

use super::{get_output, open_input};
use crate::Cli;

/// Print the acceleration triples of wmdump logs.
///
/// Every `Acc Report` line becomes one `x y z` line, in log order, which
/// is the input format of `kmeans` and `quantize`. With --json the
/// samples are printed as a JSON array of points.
#[derive(Args)]
pub struct ExtractCommand {
    /// wmdump log files (`-` for stdin)
    #[arg(required = true)]
    logs: Vec<String>,
}

impl ExtractCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut points = Vec::new();
        for path in &self.logs {
            let accs = extract_accelerations(open_input(path)?)?;
            tracing::debug!(path = %path, samples = accs.len(), "extracted");
            points.extend(accs.iter().map(|a| a.to_array()));
        }

        let output = get_output(cli);
        if cli.json {
            return output.write(&points);
        }

        let mut text = String::new();
        for [x, y, z] in &points {
            writeln!(text, "{x} {y} {z}")?;
        }
        output.write_text(&text)
    }
}
