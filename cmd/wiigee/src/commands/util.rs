//! Shared helpers for commands.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::Context as _;
use clap::ValueEnum;
use wiigee_cli::{load_config, Config, Output};
use wiigee_gesture::{parse_triples, Gesture};
use wiigee_wmdump::extract_accelerations;

use crate::Cli;

/// Loads the configuration named by `--config`, or the default one.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref())
}

/// Output selected by the global `--json` and `-o` flags.
pub fn get_output(cli: &Cli) -> Output {
    Output::from_flags(cli.json, cli.output.as_deref())
}

/// Layout of an input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One whitespace-separated `x y z` sample per line
    #[default]
    Triples,
    /// A JSON array of points, e.g. `[[1, 2, 3], [4, 5, 6]]`
    Json,
    /// A wmdump capture log; every acc report is a sample
    Wmdump,
}

/// Opens `path` for reading; `-` is stdin.
pub fn open_input(path: &str) -> anyhow::Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Reads the points of an input file.
pub fn load_points(path: &str, format: InputFormat) -> anyhow::Result<Vec<Vec<f64>>> {
    let reader = open_input(path)?;
    let points = match format {
        InputFormat::Triples => parse_triples(reader)
            .with_context(|| format!("failed to parse {path}"))?
            .samples()
            .iter()
            .map(|a| a.to_array().to_vec())
            .collect(),
        InputFormat::Json => serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse {path}"))?,
        InputFormat::Wmdump => extract_accelerations(reader)
            .with_context(|| format!("failed to parse {path}"))?
            .iter()
            .map(|a| a.to_array().to_vec())
            .collect(),
    };
    Ok(points)
}

/// Reads one gesture; every point must be three-dimensional.
pub fn load_gesture(path: &str, format: InputFormat) -> anyhow::Result<Gesture> {
    let points = load_points(path, format)?;
    if points.is_empty() {
        anyhow::bail!("{path}: no samples");
    }
    let mut samples = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        match p.as_slice() {
            &[x, y, z] => samples.push([x, y, z]),
            _ => anyhow::bail!("{path}: point {i} has {} values, expected 3", p.len()),
        }
    }
    Ok(Gesture::from_samples(samples))
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints info message.
pub fn print_info(msg: &str) {
    eprintln!("\x1b[34mℹ\x1b[0m {}", msg);
}
