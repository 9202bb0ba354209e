use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shape of the initial transition matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topology {
    /// Each state may stay or jump up to `jump_limit` states ahead, with
    /// equal probability. The next-to-last state splits evenly between
    /// itself and the last; the last state is absorbing.
    Banded { jump_limit: usize },

    /// Each state spreads equally over itself and every later state.
    LeftRight,
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Banded { jump_limit: 2 }
    }
}

impl Topology {
    /// Builds the `states x states` transition matrix. Every row sums to 1.
    pub(crate) fn transitions(self, states: usize) -> Vec<Vec<f64>> {
        let n = states;
        let mut a = vec![vec![0.0; n]; n];

        match self {
            Topology::Banded { jump_limit } => {
                // A jump past the last state adds nothing.
                let jump_limit = jump_limit.min(n.saturating_sub(1));
                let p = 1.0 / (jump_limit + 1) as f64;
                for (i, row) in a.iter_mut().enumerate() {
                    for (j, cell) in row.iter_mut().enumerate() {
                        *cell = if i == n - 1 && j == n - 1 {
                            1.0
                        } else if n >= 2 && i == n - 2 && (j == n - 2 || j == n - 1) {
                            0.5
                        } else if i <= j && j <= i + jump_limit {
                            p
                        } else {
                            0.0
                        };
                    }
                    // Rows within `jump_limit` of the end lose part of their band.
                    let sum: f64 = row.iter().sum();
                    if sum > 0.0 && (sum - 1.0).abs() > 1e-12 {
                        row.iter_mut().for_each(|v| *v /= sum);
                    }
                }
            }
            Topology::LeftRight => {
                for (i, row) in a.iter_mut().enumerate() {
                    let p = 1.0 / (n - i) as f64;
                    for cell in &mut row[i..] {
                        *cell = p;
                    }
                }
            }
        }
        a
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Banded { jump_limit } => write!(f, "banded({jump_limit})"),
            Topology::LeftRight => write!(f, "left-right"),
        }
    }
}

impl FromStr for Topology {
    type Err = String;

    /// Accepts `banded`, `banded:<jump_limit>` and `left-right`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "banded" => Ok(Topology::default()),
            "left-right" | "leftright" => Ok(Topology::LeftRight),
            _ => match s.strip_prefix("banded:") {
                Some(n) => n
                    .parse::<usize>()
                    .map(|jump_limit| Topology::Banded { jump_limit })
                    .map_err(|e| format!("invalid jump limit {n:?}: {e}")),
                None => Err(format!("unknown topology: {s}")),
            },
        }
    }
}
