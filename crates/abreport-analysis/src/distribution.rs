//! Per-arm distributions of a metric (the data behind the box plots)

use abreport_stats::box_plot::DistributionSummary;
use serde::Serialize;

use crate::observation::{Arm, Dataset, Metric};

/// Distribution of one metric within one arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmDistribution {
    pub arm: Arm,
    #[serde(flatten)]
    pub summary: DistributionSummary,
}

impl ArmDistribution {
    /// Summarizes `metric` for every arm present in `dataset`.
    ///
    /// Arms come back in first-seen order; an empty dataset yields no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use abreport_analysis::{
    ///     distribution::ArmDistribution,
    ///     observation::{Dataset, Metric, Observation},
    /// };
    ///
    /// let dataset: Dataset = [
    ///     Observation::new("1", "gate_30", false, false, 4.0),
    ///     Observation::new("2", "gate_30", false, false, 8.0),
    ///     Observation::new("3", "gate_40", false, false, 30.0),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let dists = ArmDistribution::collect(&dataset, Metric::GameRounds);
    /// assert_eq!(dists.len(), 2);
    /// assert_eq!(dists[0].summary.stats.median, 6.0);
    /// assert_eq!(dists[1].summary.stats.max, 30.0);
    /// ```
    #[must_use]
    pub fn collect(dataset: &Dataset, metric: Metric) -> Vec<Self> {
        dataset
            .arms()
            .into_iter()
            .filter_map(|arm| {
                let values = dataset
                    .iter()
                    .filter(|obs| obs.version == arm)
                    .map(|obs| metric.value(obs));
                let summary = DistributionSummary::new(values)?;
                Some(Self { arm, summary })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        assert!(ArmDistribution::collect(&Dataset::default(), Metric::GameRounds).is_empty());
    }

    #[test]
    fn test_counts_match_arm_sizes() {
        let dataset: Dataset = (0..10u32)
            .map(|i| {
                let arm = if i < 4 { "gate_30" } else { "gate_40" };
                crate::observation::Observation::new(i.to_string(), arm, false, false, f64::from(i))
            })
            .collect();
        let dists = ArmDistribution::collect(&dataset, Metric::GameRounds);
        assert_eq!(dists[0].arm, "gate_30");
        assert_eq!(dists[0].summary.stats.count, 4);
        assert_eq!(dists[1].summary.stats.count, 6);
        assert_eq!(dists[1].summary.stats.min, 4.0);
    }
}
