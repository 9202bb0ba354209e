//! Accelerometer samples and recorded gesture trajectories.
//!
//! A [`Gesture`] is one movement in chronological order. Besides the raw
//! samples it tracks the smallest and largest absolute acceleration
//! component seen, which the quantizer uses to size its initial centroids.
//!
//! # Usage
//!
//! ```
//! use wiigee_gesture::{Acceleration, Gesture};
//!
//! let mut g = Gesture::new();
//! g.push(Acceleration::new(1.0, -3.0, 0.5));
//! g.push(Acceleration::new(0.2, 2.0, 0.0));
//!
//! assert_eq!(g.len(), 2);
//! assert_eq!(g.max_acc(), 3.0);
//! assert_eq!(g.min_acc(), 0.0);
//! ```

mod error;
mod gesture;
mod parse;

pub use error::{GestureError, Result};
pub use gesture::{Acceleration, Gesture};
pub use parse::parse_triples;
