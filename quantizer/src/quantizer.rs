use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wiigee_gesture::Gesture;
use wiigee_kmeans::nearest;

use crate::{QuantizerError, Result};

/// Number of centroids (observation symbols) of the quantizer.
pub const CENTROIDS: usize = 14;

const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Returns the 14 starting centroids for a globe of the given radius.
///
/// Indices 0-7 walk the x/z circle in steps of π/4 starting at `(r, 0, 0)`.
/// Indices 8-13 walk the y/z circle, skipping the two poles the x/z circle
/// already covers.
pub fn globe(radius: f64) -> Vec<[f64; 3]> {
    let r = radius;
    let xz = |a: f64| [a.cos() * r, 0.0, a.sin() * r];
    let yz = |a: f64| [0.0, a.cos() * r, a.sin() * r];
    vec![
        [r, 0.0, 0.0],
        xz(PI / 4.0),
        [0.0, 0.0, r],
        xz(PI * 3.0 / 4.0),
        [-r, 0.0, 0.0],
        xz(PI * 5.0 / 4.0),
        [0.0, 0.0, -r],
        xz(PI * 7.0 / 4.0),
        [0.0, r, 0.0],
        yz(PI / 4.0),
        yz(PI * 3.0 / 4.0),
        [0.0, -r, 0.0],
        yz(PI * 5.0 / 4.0),
        yz(PI * 7.0 / 4.0),
    ]
}

/// k-means vector quantizer with [`CENTROIDS`] clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantizer {
    /// State count of the downstream HMM; minimum sequence length.
    states: usize,

    radius: f64,

    /// Empty until the first [`Quantizer::train`].
    centroids: Vec<[f64; 3]>,

    #[serde(default = "default_max_iterations")]
    max_iterations: usize,
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Quantizer {
    /// Creates an untrained quantizer for a model with `states` HMM states.
    pub fn new(states: usize) -> Self {
        Self {
            states,
            radius: 0.0,
            centroids: Vec::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Caps the number of training rounds (default 1000).
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n.max(1);
        self
    }

    /// Adapts the centroids to a training gesture.
    ///
    /// The first call seeds the globe with radius
    /// `(max_acc + min_acc) / 2`; later calls continue from the current
    /// centroids. Training stops once the sample-to-centroid assignment no
    /// longer changes. Returns the number of rounds run.
    pub fn train(&mut self, gesture: &Gesture) -> Result<usize> {
        if gesture.is_empty() {
            return Err(QuantizerError::EmptyGesture);
        }

        self.radius = (gesture.max_acc() + gesture.min_acc()) / 2.0;
        debug!(radius = self.radius, "quantizer: using radius");

        if self.centroids.is_empty() {
            self.centroids = globe(self.radius);
            for (i, c) in self.centroids.iter().enumerate() {
                debug!("initial centroid {i:2}: {:9.5} {:9.5} {:9.5}", c[0], c[1], c[2]);
            }
        }

        let mut previous: Option<Vec<usize>> = None;
        for round in 1..=self.max_iterations {
            let groups = self.derive_groups(gesture);
            self.update_centroids(gesture, &groups);

            if previous.as_ref() == Some(&groups) {
                debug!(rounds = round, "quantizer: converged");
                return Ok(round);
            }
            previous = Some(groups);
        }

        warn!(
            max_iterations = self.max_iterations,
            "quantizer: assignment still changing at iteration cap"
        );
        Ok(self.max_iterations)
    }

    /// Maps every sample of `gesture` to its nearest centroid index.
    ///
    /// Sequences shorter than the HMM state count are padded by repeating
    /// the last symbol.
    pub fn observation_sequence(&self, gesture: &Gesture) -> Result<Vec<usize>> {
        if !self.is_trained() {
            return Err(QuantizerError::NotTrained);
        }
        if gesture.is_empty() {
            return Err(QuantizerError::EmptyGesture);
        }

        let mut seq = self.derive_groups(gesture);
        while seq.len() < self.states {
            let last = seq[seq.len() - 1];
            seq.push(last);
        }
        Ok(seq)
    }

    /// Index of the nearest centroid for every sample.
    fn derive_groups(&self, gesture: &Gesture) -> Vec<usize> {
        gesture
            .samples()
            .iter()
            .map(|s| nearest(&s.to_array(), &self.centroids).map_or(0, |(i, _)| i))
            .collect()
    }

    /// Moves each centroid that has members to the mean of its members.
    fn update_centroids(&mut self, gesture: &Gesture, groups: &[usize]) {
        let mut sums = [[0.0f64; 3]; CENTROIDS];
        let mut counts = [0usize; CENTROIDS];
        for (s, &g) in gesture.samples().iter().zip(groups) {
            sums[g][0] += s.x;
            sums[g][1] += s.y;
            sums[g][2] += s.z;
            counts[g] += 1;
        }
        for (i, c) in self.centroids.iter_mut().enumerate() {
            if counts[i] > 0 {
                let n = counts[i] as f64;
                *c = [sums[i][0] / n, sums[i][1] / n, sums[i][2] / n];
            }
        }
    }

    /// Checks a deserialized quantizer: either untrained or holding
    /// exactly [`CENTROIDS`] finite centroids.
    pub fn validate(&self) -> Result<()> {
        if !self.centroids.is_empty() && self.centroids.len() != CENTROIDS {
            return Err(QuantizerError::CentroidCount {
                expected: CENTROIDS,
                got: self.centroids.len(),
            });
        }
        if let Some(index) = self.centroids.iter().position(|c| !c.iter().all(|v| v.is_finite())) {
            return Err(QuantizerError::NonFiniteCentroid { index });
        }
        Ok(())
    }

    pub fn is_trained(&self) -> bool {
        !self.centroids.is_empty()
    }

    pub fn centroids(&self) -> &[[f64; 3]] {
        &self.centroids
    }

    /// Radius used by the most recent training.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn states(&self) -> usize {
        self.states
    }
}

impl fmt::Display for Quantizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Centroids (radius {:.5}):", self.radius)?;
        for (i, c) in self.centroids.iter().enumerate() {
            writeln!(f, "   {i:2}:  {:9.5}  {:9.5}  {:9.5}", c[0], c[1], c[2])?;
        }
        Ok(())
    }
}
