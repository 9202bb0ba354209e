//! Vector quantizer turning acceleration gestures into symbol sequences.
//!
//! The quantizer is a k-means with [`CENTROIDS`] (14) clusters. Its
//! starting centroids lie on two intersecting circles, an abstract globe
//! whose radius is derived from the training gesture's acceleration
//! bounds. After training, every sample of a gesture maps to the index of
//! its nearest centroid, giving the discrete observation sequence a hidden
//! Markov model consumes.
//!
//! # Usage
//!
//! ```
//! use wiigee_gesture::Gesture;
//! use wiigee_quantizer::Quantizer;
//!
//! let g = Gesture::from_samples([[10.0, 0.0, 0.0], [0.0, 0.0, 10.0], [-10.0, 0.0, 0.0]]);
//! let mut q = Quantizer::new(8);
//! q.train(&g).unwrap();
//!
//! let seq = q.observation_sequence(&g).unwrap();
//! assert_eq!(seq.len(), 8); // padded up to the state count
//! ```

mod error;
mod quantizer;

pub use error::{QuantizerError, Result};
pub use quantizer::{globe, Quantizer, CENTROIDS};
