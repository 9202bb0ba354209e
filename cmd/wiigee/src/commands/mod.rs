//! CLI commands module.

mod classify;
mod config;
mod extract;
mod hmm;
mod kmeans;
mod quantize;
mod segment;
mod train;
mod util;

pub use classify::ClassifyCommand;
pub use config::ConfigCommand;
pub use extract::ExtractCommand;
pub use hmm::HmmCommand;
pub use kmeans::KmeansCommand;
pub use quantize::QuantizeCommand;
pub use segment::SegmentCommand;
pub use train::TrainCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
