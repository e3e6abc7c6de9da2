//! Statistical building blocks for A/B experiment reports.
//!
//! - [`mean`]: order-deterministic running mean used for grouped aggregation
//! - [`descriptive`]: min, max, mean, median, variance and standard deviation
//! - [`percentiles`]: linearly interpolated percentiles and quartiles
//! - [`box_plot`]: Tukey box-plot summaries of a sample's distribution
//!
//! # Examples
//!
//! ```
//! use abreport_stats::{box_plot::DistributionSummary, mean::MeanAccumulator};
//!
//! let rounds = [3.0, 17.0, 8.0, 52.0, 1.0];
//!
//! let acc: MeanAccumulator = rounds.iter().copied().collect();
//! assert_eq!(acc.mean(), Some(16.2));
//!
//! let summary = DistributionSummary::new(rounds).unwrap();
//! assert_eq!(summary.stats.median, 8.0);
//! assert_eq!(summary.box_plot.outlier_count, 1);
//! ```

pub mod box_plot;
pub mod descriptive;
pub mod mean;
pub mod percentiles;
