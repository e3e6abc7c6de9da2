//! Per-arm aggregation and arm-to-arm comparison
//!
//! These are the three operations every report is built from:
//!
//! - [`group_mean`]: mean of one metric per arm
//! - [`compare_arms`]: absolute and relative delta between two arms
//! - [`filter_subset`]: restrict a dataset to the rows matching a predicate
//!
//! All of them are pure. Arms appear in the order they are first seen in the
//! dataset and rows are summed in dataset order, so repeated calls on the
//! same input give bit-identical results.
//!
//! # Examples
//!
//! ```
//! use abreport_analysis::{
//!     observation::{Dataset, Metric, Observation},
//!     summary::{compare_arms, filter_subset, group_mean},
//! };
//!
//! let dataset: Dataset = [
//!     Observation::new("1", "gate_30", true, true, 40.0),
//!     Observation::new("2", "gate_30", true, false, 10.0),
//!     Observation::new("3", "gate_40", false, true, 55.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let means = group_mean(&dataset, Metric::Retention7);
//! assert_eq!(means.get("gate_30"), Some(0.5));
//! assert_eq!(means.get("gate_40"), Some(1.0));
//!
//! let comparison = compare_arms(&means, "gate_30", "gate_40").unwrap();
//! assert_eq!(comparison.absolute_delta, 0.5);
//! assert_eq!(comparison.relative_delta, Some(1.0));
//!
//! let retained = filter_subset(&dataset, |obs| obs.retention_7);
//! assert_eq!(retained.len(), 2);
//! ```

use std::collections::HashMap;

use abreport_stats::mean::MeanAccumulator;
use serde::Serialize;

use crate::{
    error::{SchemaError, UnknownArmError},
    observation::{Arm, Dataset, Metric, Observation},
};

/// Mean of a metric over one arm's observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmMean {
    pub arm: Arm,
    /// Number of observations averaged
    pub count: usize,
    pub mean: f64,
}

/// Per-arm means, keyed by the arms present in the data.
///
/// Arms without observations are absent rather than present with an
/// undefined value; an empty dataset yields an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupMeans {
    entries: Vec<ArmMean>,
}

impl GroupMeans {
    /// Builds the mapping from precomputed entries.
    ///
    /// A repeated arm replaces the earlier entry but keeps its position.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ArmMean>,
    {
        let mut means = Self::default();
        for entry in entries {
            match means.entries.iter_mut().find(|e| e.arm == entry.arm) {
                Some(existing) => *existing = entry,
                None => means.entries.push(entry),
            }
        }
        means
    }

    /// Mean for `arm`, or `None` if the arm has no observations.
    #[must_use]
    pub fn get(&self, arm: &str) -> Option<f64> {
        self.entry(arm).map(|entry| entry.mean)
    }

    #[must_use]
    pub fn entry(&self, arm: &str) -> Option<&ArmMean> {
        self.entries.iter().find(|entry| entry.arm == *arm)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArmMean> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupMeans {
    type Item = &'a ArmMean;
    type IntoIter = std::slice::Iter<'a, ArmMean>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mean of `metric` per arm, arms in first-seen order.
#[must_use]
pub fn group_mean(dataset: &Dataset, metric: Metric) -> GroupMeans {
    let mut index: HashMap<&Arm, usize> = HashMap::new();
    let mut groups: Vec<(&Arm, MeanAccumulator)> = Vec::new();

    for obs in dataset {
        let slot = *index.entry(&obs.version).or_insert_with(|| {
            groups.push((&obs.version, MeanAccumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.push(metric.value(obs));
    }

    GroupMeans {
        entries: groups
            .into_iter()
            .filter_map(|(arm, acc)| {
                Some(ArmMean {
                    arm: arm.clone(),
                    count: acc.count(),
                    mean: acc.mean()?,
                })
            })
            .collect(),
    }
}

/// [`group_mean`] addressed by column name.
pub fn group_mean_by_name(dataset: &Dataset, column: &str) -> Result<GroupMeans, SchemaError> {
    let metric = column.parse::<Metric>()?;
    Ok(group_mean(dataset, metric))
}

/// Difference between a treatment arm and a baseline arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmComparison {
    pub baseline: Arm,
    pub treatment: Arm,
    pub baseline_mean: f64,
    pub treatment_mean: f64,
    /// `treatment_mean - baseline_mean`
    pub absolute_delta: f64,
    /// `absolute_delta / baseline_mean`; `None` when the baseline mean is zero
    pub relative_delta: Option<f64>,
}

/// Compares `treatment` against `baseline`.
///
/// Both arms must be present in `means`; a missing arm is an error rather
/// than an implicit zero.
pub fn compare_arms(
    means: &GroupMeans,
    baseline: &str,
    treatment: &str,
) -> Result<ArmComparison, UnknownArmError> {
    let lookup = |arm: &str| {
        means.get(arm).ok_or_else(|| UnknownArmError {
            arm: arm.to_owned(),
        })
    };
    let baseline_mean = lookup(baseline)?;
    let treatment_mean = lookup(treatment)?;
    let absolute_delta = treatment_mean - baseline_mean;
    let relative_delta = (baseline_mean != 0.0).then(|| absolute_delta / baseline_mean);

    Ok(ArmComparison {
        baseline: Arm::new(baseline),
        treatment: Arm::new(treatment),
        baseline_mean,
        treatment_mean,
        absolute_delta,
        relative_delta,
    })
}

/// Rows matching `predicate`, in their original relative order.
///
/// The input dataset is left untouched.
#[must_use]
pub fn filter_subset<P>(dataset: &Dataset, mut predicate: P) -> Dataset
where
    P: FnMut(&Observation) -> bool,
{
    dataset.iter().filter(|obs| predicate(obs)).cloned().collect()
}
