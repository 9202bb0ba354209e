//! Discrete left-to-right hidden Markov model.
//!
//! The model starts in state 0 and may only move to the same or a later
//! state. Emission probabilities start uniform; [`Hmm::train`] re-estimates
//! transitions and emissions from a set of observation sequences.
//!
//! # Usage
//!
//! ```
//! use wiigee_hmm::Hmm;
//!
//! let mut hmm = Hmm::new(4, 3).unwrap();
//! let before = hmm.probability(&[0, 0, 1, 2]).unwrap();
//!
//! hmm.train(&[vec![0, 0, 1, 2]]).unwrap();
//! let after = hmm.probability(&[0, 0, 1, 2]).unwrap();
//! assert!(after > before);
//! ```

mod error;
mod hmm;
mod topology;

pub use error::{HmmError, Result};
pub use hmm::Hmm;
pub use topology::Topology;
