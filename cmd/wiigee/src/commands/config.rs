//! Configuration management commands.

use clap::{Args, Subcommand};
use wiigee_cli::config::KEYS;

use super::{get_config, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Configuration is stored in ~/.wiigee/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// View the current configuration
    View,
    /// Print one value
    Get {
        /// Key name
        key: String,
    },
    /// Set and save one value
    Set {
        /// Key name
        key: String,
        /// New value
        value: String,
    },
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;
                println!("Config file: {}", cfg.path().display());
                for key in KEYS {
                    if let Some(value) = cfg.get(key) {
                        println!("  {:<12} {}", key, value);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Get { key } => {
                let cfg = get_config(cli)?;
                match cfg.get(key) {
                    Some(value) => {
                        println!("{}", value);
                        Ok(())
                    }
                    None => anyhow::bail!("unknown key '{}'", key),
                }
            }

            ConfigSubcommand::Set { key, value } => {
                let mut cfg = get_config(cli)?;
                cfg.set(key, value)?;
                cfg.save()?;
                print_success(&format!("Set {} = {}", key, value));
                Ok(())
            }
        }
    }
}
