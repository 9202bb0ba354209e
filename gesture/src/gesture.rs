use std::fmt;

use serde::{Deserialize, Serialize};

/// One accelerometer sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Acceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Acceleration {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the sample as an `[x, y, z]` array.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Largest absolute component.
    pub fn max_abs(&self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Smallest absolute component.
    pub fn min_abs(&self) -> f64 {
        self.x.abs().min(self.y.abs()).min(self.z.abs())
    }
}

impl From<[f64; 3]> for Acceleration {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Acceleration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// One movement trajectory, in the order the samples were recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    data: Vec<Acceleration>,
    min_acc: f64,
    max_acc: f64,
}

impl Gesture {
    /// Creates an empty gesture.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            min_acc: f64::MAX,
            max_acc: 0.0,
        }
    }

    /// Builds a gesture from samples, computing its acceleration bounds.
    pub fn from_samples<I, A>(samples: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Acceleration>,
    {
        let mut g = Self::new();
        for s in samples {
            g.push(s.into());
        }
        g
    }

    /// Appends a sample and widens the bounds to include it.
    pub fn push(&mut self, sample: Acceleration) {
        self.max_acc = self.max_acc.max(sample.max_abs());
        self.min_acc = self.min_acc.min(sample.min_abs());
        self.data.push(sample);
    }

    /// Overrides the acceleration bounds.
    ///
    /// A summary of several gestures carries the averaged bounds of its
    /// members rather than the bounds of the concatenated samples.
    pub fn set_bounds(&mut self, min_acc: f64, max_acc: f64) {
        self.min_acc = min_acc;
        self.max_acc = max_acc;
    }

    /// Smallest absolute component of any sample (`f64::MAX` when empty).
    pub fn min_acc(&self) -> f64 {
        self.min_acc
    }

    /// Largest absolute component of any sample (0 when empty).
    pub fn max_acc(&self) -> f64 {
        self.max_acc
    }

    pub fn samples(&self) -> &[Acceleration] {
        &self.data
    }

    /// Returns the most recently added sample.
    pub fn last(&self) -> Option<&Acceleration> {
        self.data.last()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Acceleration> for Gesture {
    fn extend<T: IntoIterator<Item = Acceleration>>(&mut self, iter: T) {
        for s in iter {
            self.push(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_gesture_bounds() {
        let g = Gesture::new();
        assert!(g.is_empty());
        assert_eq!(g.min_acc(), f64::MAX);
        assert_eq!(g.max_acc(), 0.0);
        assert!(g.last().is_none());
    }

    #[test]
    fn push_tracks_absolute_bounds() {
        let mut g = Gesture::new();
        g.push(Acceleration::new(-4.0, 2.0, 1.5));
        g.push(Acceleration::new(0.5, -1.0, 3.0));

        assert_eq!(g.len(), 2);
        assert_eq!(g.max_acc(), 4.0);
        assert_eq!(g.min_acc(), 0.5);
        assert_eq!(g.last(), Some(&Acceleration::new(0.5, -1.0, 3.0)));
    }

    #[test]
    fn from_samples_accepts_arrays() {
        let g = Gesture::from_samples([[1.0, 2.0, 3.0], [-7.0, 0.25, 1.0]]);
        assert_eq!(g.len(), 2);
        assert_eq!(g.max_acc(), 7.0);
        assert_eq!(g.min_acc(), 0.25);
        assert_eq!(g.samples()[1].to_array(), [-7.0, 0.25, 1.0]);
    }

    #[test]
    fn set_bounds_overrides() {
        let mut g = Gesture::from_samples([[1.0, 1.0, 1.0]]);
        g.set_bounds(0.5, 10.0);
        assert_eq!(g.min_acc(), 0.5);
        assert_eq!(g.max_acc(), 10.0);
    }

    #[test]
    fn extend_updates_bounds() {
        let mut g = Gesture::new();
        g.extend([Acceleration::new(2.0, 0.0, 0.0), Acceleration::new(0.0, -9.0, 0.0)]);
        assert_eq!(g.max_acc(), 9.0);
        assert_eq!(g.min_acc(), 0.0);
    }

    #[test]
    fn serde_keeps_bounds() {
        let mut g = Gesture::from_samples([[1.0, 2.0, 3.0]]);
        g.set_bounds(0.1, 0.2);
        let json = serde_json::to_string(&g).unwrap();
        let back: Gesture = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
