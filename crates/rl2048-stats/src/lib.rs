//! Small statistics toolkit for score histories.
//!
//! - [`descriptive`]: min, max, mean, median and standard deviation
//! - [`percentiles`]: nearest-rank percentiles
//! - [`rolling`]: rolling (moving) averages, centred on their window
//!
//! # Example
//!
//! ```
//! use rl2048_stats::{descriptive::DescriptiveStats, rolling::rolling_mean};
//!
//! let scores = [100.0, 300.0, 200.0, 400.0];
//! let stats = DescriptiveStats::new(scores).unwrap();
//! assert_eq!(stats.mean, 250.0);
//!
//! let curve = rolling_mean(&scores, 2);
//! assert_eq!(curve[0].mean, 200.0);
//! ```

pub mod descriptive;
pub mod percentiles;
pub mod rolling;
