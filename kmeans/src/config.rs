use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the initial centroids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Init {
    /// Gaussian draws with the data's mean and covariance.
    #[default]
    Random,
    /// `k` distinct observations picked at random.
    Points,
    /// k-means++ seeding.
    #[serde(rename = "++")]
    PlusPlus,
}

impl fmt::Display for Init {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Init::Random => write!(f, "random"),
            Init::Points => write!(f, "points"),
            Init::PlusPlus => write!(f, "++"),
        }
    }
}

impl FromStr for Init {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Init::Random),
            "points" => Ok(Init::Points),
            "++" | "plusplus" => Ok(Init::PlusPlus),
            _ => Err(format!("unknown init method: {s}")),
        }
    }
}

/// What to do when a cluster ends a round with no members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Missing {
    /// Log a warning and keep the cluster's previous centroid.
    #[default]
    Warn,
    /// Fail with [`crate::KMeansError::EmptyCluster`].
    Error,
}

/// Controls a k-means run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of clusters. Default: 3.
    pub k: usize,

    /// Maximum assignment/update rounds. Default: 10.
    pub iterations: usize,

    pub init: Init,

    pub missing: Missing,

    /// PRNG seed for initialization.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: 3,
            iterations: 10,
            init: Init::default(),
            missing: Missing::default(),
            seed: 0,
        }
    }
}

impl Config {
    pub(crate) fn with_defaults(mut self) -> Self {
        if self.iterations == 0 {
            self.iterations = 10;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_round_trips_through_str() {
        for init in [Init::Random, Init::Points, Init::PlusPlus] {
            assert_eq!(init.to_string().parse::<Init>().unwrap(), init);
        }
        assert!("kmeans".parse::<Init>().is_err());
    }

    #[test]
    fn config_json_round_trip() {
        let cfg = Config {
            k: 14,
            iterations: 25,
            init: Init::PlusPlus,
            missing: Missing::Error,
            seed: 42,
        };
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["init"], "++");
        assert_eq!(json["missing"], "error");

        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back.k, 14);
        assert_eq!(back.iterations, 25);
        assert_eq!(back.init, Init::PlusPlus);
        assert_eq!(back.missing, Missing::Error);
        assert_eq!(back.seed, 42);

        let points: Init = serde_json::from_str("\"points\"").unwrap();
        assert_eq!(points, Init::Points);
        assert!(serde_json::from_str::<Init>("\"plusplus\"").is_err());
    }

    #[test]
    fn zero_iterations_defaults() {
        let cfg = Config { iterations: 0, ..Config::default() }.with_defaults();
        assert_eq!(cfg.iterations, 10);
    }
}
