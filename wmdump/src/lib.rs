//! Reader for the text logs written by the `wmdump` capture tool.
//!
//! A log is one report per line:
//!
//! ```text
//! Status Report: battery=112 extension=none
//! Button Report: 0004
//! Acc Report: x=130, y=131, z=155   1244671200 250000
//! Button Report: 0000
//! ```
//!
//! Acceleration reports may carry a trailing `<seconds> <microseconds>`
//! timestamp. [`Segmenter`] splits a report stream into recordings at
//! trigger releases and [`downsample`] resamples a recording to a fixed
//! period.
//!
//! # Usage
//!
//! ```
//! use wiigee_wmdump::extract_accelerations;
//!
//! let log = "Button Report: 0004\nAcc Report: x=1, y=2, z=3\nButton Report: 0000\n";
//! let samples = extract_accelerations(log.as_bytes()).unwrap();
//! assert_eq!(samples.len(), 1);
//! assert_eq!(samples[0].to_array(), [1.0, 2.0, 3.0]);
//! ```

mod error;
mod report;
mod segment;

pub use error::{Result, WmdumpError};
pub use report::{extract_accelerations, parse_line, read_reports, Report};
pub use segment::{downsample, segment, Segmenter, TimedSample, DEFAULT_PERIOD, TRIGGER};
