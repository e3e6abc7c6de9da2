//! Experiment analysis for the Cookie Cats gate placement A/B test
//!
//! This crate turns one table of per-user results into every figure the
//! experiment report needs: sample sizes, per-arm retention and play
//! volume, arm-to-arm deltas, distributions of play rounds, and verdicts
//! against configurable success criteria.
//!
//! # Workflow
//!
//! 1. **Load** ([`loader::load_csv`]): parse and validate the CSV into a [`observation::Dataset`]
//! 2. **Slice** ([`subset::Subset`], [`summary::filter_subset`]): restrict to e.g. retained users
//! 3. **Aggregate** ([`summary::group_mean`]): mean of a metric per arm
//! 4. **Compare** ([`summary::compare_arms`]): absolute and relative deltas
//! 5. **Report** ([`report::ExperimentReport`]): all of the above plus verdicts
//!
//! The dataset is loaded once by the caller and passed by reference to
//! every step; nothing here caches or mutates it.
//!
//! # Examples
//!
//! ```
//! use abreport_analysis::{
//!     loader::{LoadOptions, read_csv},
//!     observation::Metric,
//!     subset::Subset,
//!     summary::{compare_arms, group_mean},
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let input = "\
//! user_id,version,retention_1,retention_7,sum_gamerounds_capped
//! 1,gate_30,True,True,52
//! 2,gate_30,True,False,12
//! 3,gate_40,True,True,61
//! 4,gate_40,False,False,1
//! ";
//! let dataset = read_csv(input.as_bytes(), &LoadOptions::default())?;
//!
//! let retention = group_mean(&dataset, Metric::Retention7);
//! let comparison = compare_arms(&retention, "gate_30", "gate_40")?;
//! assert_eq!(comparison.absolute_delta, 0.0);
//!
//! let retained = Subset::Retained7.apply(&dataset);
//! let intensity = group_mean(&retained, Metric::GameRounds);
//! assert_eq!(intensity.get("gate_40"), Some(61.0));
//! # Ok(())
//! # }
//! ```

pub mod criteria;
pub mod distribution;
pub mod error;
pub mod loader;
pub mod observation;
pub mod report;
pub mod sample;
pub mod subset;
pub mod summary;
