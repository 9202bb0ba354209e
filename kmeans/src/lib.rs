//! Seeded Lloyd k-means clustering over fixed-dimension points.
//!
//! Behaves like the usual scientific-library `kmeans2` routine: a fixed
//! number of assignment/update rounds starting from random centroids,
//! with a configurable policy for clusters that lose all their members.
//!
//! # Usage
//!
//! ```
//! use wiigee_kmeans::{kmeans, Config, Init};
//!
//! let data = vec![
//!     [0.0, 0.0, 0.0], [0.1, 0.0, 0.1],
//!     [9.0, 9.0, 9.0], [9.1, 8.9, 9.0],
//! ];
//! let cfg = Config { k: 2, init: Init::Points, seed: 7, ..Config::default() };
//! let result = kmeans(&data, &cfg).unwrap();
//!
//! assert_eq!(result.labels[0], result.labels[1]);
//! assert_ne!(result.labels[0], result.labels[2]);
//! ```
//!
//! # Seeding
//!
//! All randomness comes from a xoshiro256** generator seeded from
//! [`Config::seed`], so a run is reproducible for a given seed.

mod config;
mod distance;
mod error;
mod init;
mod kmeans;
mod rng;

pub use config::{Config, Init, Missing};
pub use distance::{euclidean, nearest};
pub use error::{KMeansError, Result};
pub use kmeans::{kmeans, Clustering};
