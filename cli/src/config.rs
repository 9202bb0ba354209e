//! Configuration management for the wiigee CLI.
//!
//! Configuration is stored in ~/.wiigee/config.yaml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".wiigee";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Keys accepted by [`Config::set`] and [`Config::get`].
pub const KEYS: &[&str] = &["states", "clusters", "iterations", "init", "seed", "period_ms"];

/// Defaults applied when a command does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HMM states of newly trained gesture models.
    pub states: usize,

    /// k of the `kmeans` command.
    pub clusters: usize,

    /// Iteration limit of the `kmeans` command.
    pub iterations: usize,

    /// Seeding of the `kmeans` command (`random`, `points` or `++`).
    pub init: String,

    /// Seed of the k-means PRNG.
    pub seed: u64,

    /// Downsampling period of recorded gestures, in milliseconds.
    pub period_ms: u64,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            states: 8,
            clusters: 3,
            iterations: 10,
            init: "random".to_string(),
            seed: 0,
            period_ms: 100,
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the configuration to disk, creating its directory.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Returns a value by key, formatted for display.
    pub fn get(&self, key: &str) -> Option<String> {
        Some(match key {
            "states" => self.states.to_string(),
            "clusters" => self.clusters.to_string(),
            "iterations" => self.iterations.to_string(),
            "init" => self.init.clone(),
            "seed" => self.seed.to_string(),
            "period_ms" => self.period_ms.to_string(),
            _ => return None,
        })
    }

    /// Sets a value by key, parsing it to the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        fn positive(key: &str, value: &str) -> anyhow::Result<usize> {
            match value.parse::<usize>()? {
                0 => anyhow::bail!("{key} must be positive"),
                n => Ok(n),
            }
        }

        match key {
            "states" => self.states = positive(key, value)?,
            "clusters" => self.clusters = positive(key, value)?,
            "iterations" => self.iterations = positive(key, value)?,
            "init" => match value {
                "random" | "points" | "++" | "plusplus" => self.init = value.to_string(),
                _ => anyhow::bail!("init must be one of random, points, ++"),
            },
            "seed" => self.seed = value.parse()?,
            "period_ms" => self.period_ms = positive(key, value)? as u64,
            _ => anyhow::bail!("unknown key '{}' (expected one of {})", key, KEYS.join(", ")),
        }
        Ok(())
    }
}

/// Loads configuration from `custom_path` or the default location.
///
/// A missing file gives the defaults; nothing is written until
/// [`Config::save`].
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    let mut cfg: Config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        Config::default()
    };

    cfg.config_path = config_path;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let cfg = load_config(path.to_str()).unwrap();
        assert_eq!(cfg.states, 8);
        assert_eq!(cfg.clusters, 3);
        assert_eq!(cfg.period_ms, 100);
        assert_eq!(cfg.path(), path.as_path());
        assert!(!path.exists());
    }

    #[test]
    fn set_save_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut cfg = load_config(path.to_str()).unwrap();
        cfg.set("clusters", "5").unwrap();
        cfg.set("init", "++").unwrap();
        cfg.set("seed", "42").unwrap();
        cfg.save().unwrap();

        let back = load_config(path.to_str()).unwrap();
        assert_eq!(back.clusters, 5);
        assert_eq!(back.init, "++");
        assert_eq!(back.get("seed").as_deref(), Some("42"));
        assert_eq!(back.states, 8);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "iterations: 25\n").unwrap();
        let cfg = load_config(path.to_str()).unwrap();
        assert_eq!(cfg.iterations, 25);
        assert_eq!(cfg.clusters, 3);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("states", "0").is_err());
        assert!(cfg.set("states", "many").is_err());
        assert!(cfg.set("init", "kmeans").is_err());
        assert!(cfg.set("color", "red").is_err());
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.get("color"), None);
    }
}
