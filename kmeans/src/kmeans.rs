use serde::Serialize;
use tracing::{debug, warn};

use crate::distance::{nearest, squared};
use crate::init::initial_centroids;
use crate::rng::Xoshiro256ss;
use crate::{Config, KMeansError, Missing, Result};

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clustering {
    /// One centroid per cluster.
    pub centroids: Vec<Vec<f64>>,

    /// Cluster index of every input point, consistent with `centroids`.
    pub labels: Vec<usize>,

    /// Number of update rounds performed.
    pub rounds: usize,
}

impl Clustering {
    /// Returns the number of points assigned to each cluster.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.centroids.len()];
        for &l in &self.labels {
            counts[l] += 1;
        }
        counts
    }

    /// Sum of squared distances from each point to its centroid.
    pub fn inertia<P: AsRef<[f64]>>(&self, data: &[P]) -> f64 {
        data.iter()
            .zip(&self.labels)
            .map(|(p, &l)| squared(p.as_ref(), &self.centroids[l]))
            .sum()
    }

    /// Assigns new points to the nearest existing centroid.
    pub fn predict<P: AsRef<[f64]>>(&self, data: &[P]) -> Vec<usize> {
        assign(data, &self.centroids)
    }
}

/// Clusters `data` into `cfg.k` groups.
///
/// Runs at most `cfg.iterations` rounds of "move every centroid to the mean
/// of its members, then reassign", stopping early once no label changes.
pub fn kmeans<P: AsRef<[f64]>>(data: &[P], cfg: &Config) -> Result<Clustering> {
    let cfg = cfg.clone().with_defaults();
    validate(data)?;
    if cfg.k == 0 {
        return Err(KMeansError::ZeroClusters);
    }

    let mut rng = Xoshiro256ss::new(cfg.seed);
    let mut centroids = initial_centroids(data, cfg.k, cfg.init, &mut rng)?;
    debug!(k = cfg.k, init = %cfg.init, n = data.len(), "kmeans start");

    let mut labels = assign(data, &centroids);
    let mut rounds = 0;
    while rounds < cfg.iterations {
        update(data, &labels, &mut centroids, cfg.missing)?;
        rounds += 1;

        let next = assign(data, &centroids);
        let changed = next.iter().zip(&labels).filter(|(a, b)| a != b).count();
        labels = next;
        debug!(round = rounds, changed, "kmeans round");
        if changed == 0 {
            break;
        }
    }

    Ok(Clustering {
        centroids,
        labels,
        rounds,
    })
}

fn validate<P: AsRef<[f64]>>(data: &[P]) -> Result<()> {
    let first = data.first().ok_or(KMeansError::Empty)?;
    let dim = first.as_ref().len();
    if dim == 0 {
        return Err(KMeansError::DimensionMismatch {
            index: 0,
            expected: 1,
            got: 0,
        });
    }
    for (index, p) in data.iter().enumerate() {
        let p = p.as_ref();
        if p.len() != dim {
            return Err(KMeansError::DimensionMismatch {
                index,
                expected: dim,
                got: p.len(),
            });
        }
        if p.iter().any(|v| !v.is_finite()) {
            return Err(KMeansError::NonFinite { index });
        }
    }
    Ok(())
}

fn assign<P: AsRef<[f64]>>(data: &[P], centroids: &[Vec<f64>]) -> Vec<usize> {
    data.iter()
        .map(|p| nearest(p.as_ref(), centroids).map_or(0, |(i, _)| i))
        .collect()
}

fn update<P: AsRef<[f64]>>(
    data: &[P],
    labels: &[usize],
    centroids: &mut [Vec<f64>],
    missing: Missing,
) -> Result<()> {
    let dim = centroids[0].len();
    let mut sums = vec![vec![0.0; dim]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (p, &l) in data.iter().zip(labels) {
        for (acc, v) in sums[l].iter_mut().zip(p.as_ref()) {
            *acc += v;
        }
        counts[l] += 1;
    }

    for (cluster, (sum, count)) in sums.into_iter().zip(counts).enumerate() {
        if count == 0 {
            match missing {
                Missing::Warn => {
                    warn!(cluster, "kmeans: cluster is empty, keeping previous centroid");
                    continue;
                }
                Missing::Error => return Err(KMeansError::EmptyCluster { cluster }),
            }
        }
        let n = count as f64;
        centroids[cluster] = sum.into_iter().map(|v| v / n).collect();
    }
    Ok(())
}
