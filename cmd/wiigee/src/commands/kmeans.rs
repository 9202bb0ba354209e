//! k-means clustering command.

use clap::Args;
use serde::Serialize;
use wiigee_kmeans::{kmeans, Clustering, Config, Init, Missing};

use super::{get_config, get_output, load_points, InputFormat};
use crate::Cli;

/// Cluster acceleration samples with k-means.
///
/// Prints the centroids ("points") and the cluster index of every input
/// sample ("results"). Unset options fall back to the configuration.
#[derive(Args)]
pub struct KmeansCommand {
    /// Input file (`-` for stdin)
    input: String,

    /// Number of clusters
    #[arg(short = 'k', long)]
    k: Option<usize>,

    /// Maximum assignment/update rounds
    #[arg(long)]
    iterations: Option<usize>,

    /// Seeding method: random, points or ++
    #[arg(long)]
    init: Option<Init>,

    /// PRNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Fail instead of warning when a cluster empties
    #[arg(long)]
    strict: bool,

    /// Input layout
    #[arg(long, value_enum, default_value_t = InputFormat::Triples)]
    input_format: InputFormat,

    /// Print YAML instead of the plain text report
    #[arg(long)]
    yaml: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    points: &'a [Vec<f64>],
    results: &'a [usize],
    counts: Vec<usize>,
    inertia: f64,
    rounds: usize,
}

impl KmeansCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let init = match self.init {
            Some(init) => init,
            None => cfg.init.parse().map_err(anyhow::Error::msg)?,
        };
        let params = Config {
            k: self.k.unwrap_or(cfg.clusters),
            iterations: self.iterations.unwrap_or(cfg.iterations),
            init,
            missing: if self.strict { Missing::Error } else { Missing::Warn },
            seed: self.seed.unwrap_or(cfg.seed),
        };

        let data = load_points(&self.input, self.input_format)?;
        tracing::debug!(points = data.len(), k = params.k, init = %params.init, "clustering");
        let clustering = kmeans(&data, &params)?;

        let output = get_output(cli);
        if cli.json || self.yaml {
            return output.write(&Report {
                points: &clustering.centroids,
                results: &clustering.labels,
                counts: clustering.counts(),
                inertia: clustering.inertia(&data),
                rounds: clustering.rounds,
            });
        }
        output.write_text(&text_report(&clustering))
    }
}

/// `points: [[..] [..]]`, two blank lines, then `results: [..]`.
fn text_report(c: &Clustering) -> String {
    let rows: Vec<String> = c
        .centroids
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:.8}")).collect();
            format!("[{}]", cells.join(" "))
        })
        .collect();
    let labels: Vec<String> = c.labels.iter().map(|l| l.to_string()).collect();

    format!("points: [{}]\n\n\nresults: [{}]\n", rows.join("\n "), labels.join(" "))
}
