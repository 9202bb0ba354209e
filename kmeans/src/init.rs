use tracing::debug;

use crate::distance::squared;
use crate::rng::Xoshiro256ss;
use crate::{Init, KMeansError, Result};

/// Picks `k` starting centroids for `data` (validated, non-empty, `dim > 0`).
pub(crate) fn initial_centroids<P: AsRef<[f64]>>(
    data: &[P],
    k: usize,
    init: Init,
    rng: &mut Xoshiro256ss,
) -> Result<Vec<Vec<f64>>> {
    match init {
        Init::Random => Ok(gaussian(data, k, rng)),
        Init::Points => points(data, k, rng),
        Init::PlusPlus => Ok(plus_plus(data, k, rng)),
    }
}

fn points<P: AsRef<[f64]>>(data: &[P], k: usize, rng: &mut Xoshiro256ss) -> Result<Vec<Vec<f64>>> {
    let n = data.len();
    if k > n {
        return Err(KMeansError::TooFewPoints { k, n });
    }

    // Partial Fisher-Yates over the indices.
    let mut idx: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = i + rng.below(n - i);
        idx.swap(i, j);
    }
    Ok(idx[..k].iter().map(|&i| data[i].as_ref().to_vec()).collect())
}

fn plus_plus<P: AsRef<[f64]>>(data: &[P], k: usize, rng: &mut Xoshiro256ss) -> Vec<Vec<f64>> {
    let n = data.len();
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);
    centroids.push(data[rng.below(n)].as_ref().to_vec());

    // Squared distance from each point to its closest chosen centroid.
    let mut d2: Vec<f64> = data
        .iter()
        .map(|p| squared(p.as_ref(), &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = d2.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.float64() * total;
            let mut chosen = n - 1;
            for (i, &d) in d2.iter().enumerate() {
                if target < d {
                    chosen = i;
                    break;
                }
                target -= d;
            }
            chosen
        } else {
            // Every point sits on a centroid already.
            rng.below(n)
        };

        let c = data[next].as_ref().to_vec();
        for (i, p) in data.iter().enumerate() {
            d2[i] = d2[i].min(squared(p.as_ref(), &c));
        }
        centroids.push(c);
    }
    centroids
}

fn gaussian<P: AsRef<[f64]>>(data: &[P], k: usize, rng: &mut Xoshiro256ss) -> Vec<Vec<f64>> {
    let dim = data[0].as_ref().len();
    let mean = mean(data, dim);
    let cov = covariance(data, &mean);

    let factor = match cholesky(&cov) {
        Some(l) => l,
        None => {
            debug!("covariance not positive definite, using per-dimension deviation");
            let mut l = vec![vec![0.0; dim]; dim];
            for (d, row) in l.iter_mut().enumerate() {
                row[d] = cov[d][d].max(0.0).sqrt();
            }
            l
        }
    };

    (0..k)
        .map(|_| {
            let z: Vec<f64> = (0..dim).map(|_| rng.norm_float64()).collect();
            (0..dim)
                .map(|r| mean[r] + (0..=r).map(|c| factor[r][c] * z[c]).sum::<f64>())
                .collect()
        })
        .collect()
}

fn mean<P: AsRef<[f64]>>(data: &[P], dim: usize) -> Vec<f64> {
    let mut m = vec![0.0; dim];
    for p in data {
        for (acc, v) in m.iter_mut().zip(p.as_ref()) {
            *acc += v;
        }
    }
    let n = data.len() as f64;
    m.iter_mut().for_each(|v| *v /= n);
    m
}

/// Sample covariance (n - 1 denominator); all zeros for a single point.
fn covariance<P: AsRef<[f64]>>(data: &[P], mean: &[f64]) -> Vec<Vec<f64>> {
    let dim = mean.len();
    let mut cov = vec![vec![0.0; dim]; dim];
    if data.len() < 2 {
        return cov;
    }
    for p in data {
        let p = p.as_ref();
        for r in 0..dim {
            for c in 0..=r {
                cov[r][c] += (p[r] - mean[r]) * (p[c] - mean[c]);
            }
        }
    }
    let denom = (data.len() - 1) as f64;
    for r in 0..dim {
        for c in 0..=r {
            cov[r][c] /= denom;
            cov[c][r] = cov[r][c];
        }
    }
    cov
}

/// Lower-triangular Cholesky factor, or `None` if `a` is not positive definite.
fn cholesky(a: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = a.len();
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let sum = a[i][j] - (0..j).map(|k| l[i][k] * l[j][k]).sum::<f64>();
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][i] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }
    Some(l)
}
