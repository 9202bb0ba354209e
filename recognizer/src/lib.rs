//! Gesture recognition on top of the quantizer and the hidden Markov model.
//!
//! A [`GestureModel`] learns one gesture class from a handful of recorded
//! examples. A [`Classifier`] holds several trained models and picks the
//! most probable one for a new recording, using each model's default
//! probability as its prior.
//!
//! # Usage
//!
//! ```
//! use wiigee_gesture::Gesture;
//! use wiigee_recognizer::{Classifier, GestureModel};
//!
//! let circle = Gesture::from_samples([[10.0, 0.0, 0.0], [0.0, 0.0, 10.0], [-10.0, 0.0, 0.0]]);
//!
//! let mut model = GestureModel::new(0);
//! model.train(&[circle.clone()]).unwrap();
//!
//! let mut classifier = Classifier::new();
//! classifier.add(model);
//! let m = classifier.classify(&circle).unwrap().unwrap();
//! assert_eq!(m.id, 0);
//! ```

mod classifier;
mod error;
mod model;

pub use classifier::{Classifier, Match};
pub use error::{RecognizerError, Result};
pub use model::{GestureModel, DEFAULT_OBSERVATIONS, DEFAULT_STATES};
