//! Full experiment report
//!
//! [`ExperimentReport::build`] computes every figure the dashboards showed
//! from one loaded dataset:
//!
//! ```text
//! ExperimentReport
//! ├─ sample_sizes          users per arm and their share
//! ├─ metrics[]             one per criterion
//! │   ├─ means             group_mean over the criterion's subset
//! │   ├─ comparison        compare_arms(baseline, treatment)
//! │   └─ verdict           rule applied to the absolute delta
//! ├─ distributions[]       capped rounds per arm, all users and 7-day retained
//! └─ decision              from the primary verdicts
//! ```
//!
//! Building fails as a whole if either arm is missing; no partial report is
//! ever returned.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    criteria::{Criterion, Decision, ExperimentConfig, Role, Rule, Verdict},
    distribution::ArmDistribution,
    error::UnknownArmError,
    observation::{Dataset, Metric},
    sample::SampleSizes,
    subset::Subset,
    summary::{self, ArmComparison, GroupMeans},
};

/// Subsets whose capped-rounds distributions are always reported.
pub const DISTRIBUTION_SUBSETS: [Subset; 2] = [Subset::All, Subset::Retained7];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub name: String,
    pub role: Role,
    pub metric: Metric,
    pub subset: Subset,
    pub rule: Rule,
    pub means: GroupMeans,
    pub comparison: ArmComparison,
    pub verdict: Verdict,
}

impl MetricReport {
    /// Evaluates one criterion against `dataset`.
    pub fn evaluate(
        dataset: &Dataset,
        criterion: &Criterion,
        baseline: &str,
        treatment: &str,
    ) -> Result<Self, UnknownArmError> {
        let rows = criterion.subset.apply(dataset);
        let means = summary::group_mean(&rows, criterion.metric);
        let comparison = summary::compare_arms(&means, baseline, treatment)?;
        let verdict = criterion.rule.evaluate(comparison.absolute_delta);
        debug!(
            criterion = %criterion.name,
            subset = %criterion.subset,
            rows = rows.len(),
            delta = comparison.absolute_delta,
            %verdict,
            "criterion evaluated"
        );
        Ok(Self {
            name: criterion.name.clone(),
            role: criterion.role,
            metric: criterion.metric,
            subset: criterion.subset,
            rule: criterion.rule,
            means,
            comparison,
            verdict,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetDistribution {
    pub subset: Subset,
    pub metric: Metric,
    pub arms: Vec<ArmDistribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub generated_at: DateTime<Utc>,
    pub baseline: String,
    pub treatment: String,
    pub sample_sizes: SampleSizes,
    pub metrics: Vec<MetricReport>,
    pub distributions: Vec<SubsetDistribution>,
    pub decision: Decision,
}

impl ExperimentReport {
    /// Builds the report for `config` over `dataset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use abreport_analysis::{
    ///     criteria::{Decision, ExperimentConfig},
    ///     observation::{Dataset, Observation},
    ///     report::ExperimentReport,
    /// };
    ///
    /// let dataset: Dataset = [
    ///     Observation::new("1", "gate_30", true, true, 60.0),
    ///     Observation::new("2", "gate_30", true, false, 20.0),
    ///     Observation::new("3", "gate_40", true, true, 25.0),
    ///     Observation::new("4", "gate_40", false, false, 2.0),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let report = ExperimentReport::build(&dataset, &ExperimentConfig::default()).unwrap();
    /// assert_eq!(report.sample_sizes.total, 4);
    /// assert_eq!(report.decision, Decision::Failure);
    /// ```
    pub fn build(dataset: &Dataset, config: &ExperimentConfig) -> Result<Self, UnknownArmError> {
        let ExperimentConfig {
            baseline,
            treatment,
            criteria,
        } = config;
        debug!(rows = dataset.len(), %baseline, %treatment, "building experiment report");

        let sample_sizes = SampleSizes::from_dataset(dataset);
        let metrics = criteria
            .iter()
            .map(|criterion| MetricReport::evaluate(dataset, criterion, baseline, treatment))
            .collect::<Result<Vec<_>, _>>()?;
        let distributions = DISTRIBUTION_SUBSETS
            .into_iter()
            .map(|subset| SubsetDistribution {
                subset,
                metric: Metric::GameRounds,
                arms: ArmDistribution::collect(&subset.apply(dataset), Metric::GameRounds),
            })
            .collect();
        let decision = Decision::from_verdicts(metrics.iter().map(|m| (m.role, m.verdict)));

        Ok(Self {
            generated_at: Utc::now(),
            baseline: baseline.clone(),
            treatment: treatment.clone(),
            sample_sizes,
            metrics,
            distributions,
            decision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Observation;

    /// 7-day retention drops for gate_40 while retained users play more.
    fn gate_dataset() -> Dataset {
        let mut rows = Vec::new();
        for i in 0..10 {
            rows.push(Observation::new(
                format!("a{i}"),
                "gate_30",
                i < 5,
                i < 2,
                if i < 2 { 40.0 } else { 10.0 },
            ));
            rows.push(Observation::new(
                format!("b{i}"),
                "gate_40",
                i < 5,
                i < 1,
                if i < 1 { 60.0 } else { 10.0 },
            ));
        }
        rows.into_iter().collect()
    }

    #[test]
    fn test_default_report() {
        let report =
            ExperimentReport::build(&gate_dataset(), &ExperimentConfig::default()).unwrap();

        assert_eq!(report.sample_sizes.total, 20);
        assert_eq!(report.metrics.len(), 4);

        let retention_7 = &report.metrics[0];
        assert_eq!(retention_7.means.get("gate_30"), Some(0.2));
        assert_eq!(retention_7.means.get("gate_40"), Some(0.1));
        assert_eq!(retention_7.verdict, Verdict::Fail);

        let retention_1 = &report.metrics[1];
        assert_eq!(retention_1.comparison.absolute_delta, 0.0);
        assert_eq!(retention_1.verdict, Verdict::Pass);

        let play_volume = &report.metrics[2];
        assert_eq!(play_volume.means.get("gate_30"), Some(16.0));
        assert_eq!(play_volume.means.get("gate_40"), Some(15.0));
        assert_eq!(play_volume.verdict, Verdict::Fail);

        let intensity = &report.metrics[3];
        assert_eq!(intensity.means.get("gate_30"), Some(40.0));
        assert_eq!(intensity.means.get("gate_40"), Some(60.0));
        assert_eq!(intensity.verdict, Verdict::Pass);

        assert_eq!(report.decision, Decision::Failure);

        assert_eq!(report.distributions.len(), 2);
        assert_eq!(report.distributions[1].subset, Subset::Retained7);
        assert_eq!(report.distributions[1].arms[0].summary.stats.count, 2);
    }

    #[test]
    fn test_missing_arm_fails_whole_report() {
        let config = ExperimentConfig {
            treatment: "gate_50".to_owned(),
            ..ExperimentConfig::default()
        };
        assert_eq!(
            ExperimentReport::build(&gate_dataset(), &config),
            Err(UnknownArmError {
                arm: "gate_50".to_owned()
            })
        );
    }

    #[test]
    fn test_empty_dataset_reports_unknown_arm() {
        let result = ExperimentReport::build(&Dataset::default(), &ExperimentConfig::default());
        assert_eq!(
            result,
            Err(UnknownArmError {
                arm: "gate_30".to_owned()
            })
        );
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report =
            ExperimentReport::build(&gate_dataset(), &ExperimentConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["decision"], "failure");
        assert_eq!(json["metrics"][0]["metric"], "retention_7");
        assert_eq!(json["metrics"][3]["subset"], "retained_7");
        assert_eq!(json["metrics"][0]["means"][0]["arm"], "gate_30");
        assert_eq!(json["sample_sizes"]["arms"][1]["count"], 10);
    }
}
