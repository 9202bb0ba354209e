//! CLI utilities for wiigee.
//!
//! Persisted defaults live in `~/.wiigee/config.yaml`; results are printed
//! as YAML or JSON, to stdout or a file.

pub mod config;
pub mod output;

pub use config::{load_config, Config};
pub use output::{Output, OutputFormat};
