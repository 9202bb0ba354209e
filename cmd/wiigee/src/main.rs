//! wiigee CLI - accelerometer gesture toolkit.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    ClassifyCommand, ConfigCommand, ExtractCommand, HmmCommand, KmeansCommand, QuantizeCommand,
    SegmentCommand, TrainCommand,
};

/// wiigee CLI - accelerometer gesture toolkit.
///
/// Reads wmdump capture logs or plain `x y z` sample files and runs them
/// through the gesture pipeline:
///   - k-means clustering of raw samples
///   - vector quantization into observation sequences
///   - hidden Markov model training and scoring
///   - gesture model training and Bayes classification
///
/// Defaults are stored in ~/.wiigee/config.yaml.
#[derive(Parser)]
#[command(name = "wiigee")]
#[command(about = "Accelerometer gesture toolkit")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.wiigee/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage CLI configuration
    Config(ConfigCommand),
    /// Print the acceleration triples of wmdump logs
    Extract(ExtractCommand),
    /// Cluster acceleration samples with k-means
    Kmeans(KmeansCommand),
    /// Quantize one gesture into an observation sequence
    Quantize(QuantizeCommand),
    /// Score an observation sequence with a fresh HMM
    Hmm(HmmCommand),
    /// Train a gesture model from example recordings
    Train(TrainCommand),
    /// Classify a recording against trained models
    Classify(ClassifyCommand),
    /// Split a wmdump log into trigger-held recordings
    Segment(SegmentCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli),
        Commands::Extract(cmd) => cmd.run(&cli),
        Commands::Kmeans(cmd) => cmd.run(&cli),
        Commands::Quantize(cmd) => cmd.run(&cli),
        Commands::Hmm(cmd) => cmd.run(&cli),
        Commands::Train(cmd) => cmd.run(&cli),
        Commands::Classify(cmd) => cmd.run(&cli),
        Commands::Segment(cmd) => cmd.run(&cli),
    }
}
