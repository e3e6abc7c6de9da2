//! Sample-size check: how many users landed in each arm

use serde::Serialize;

use crate::observation::{Arm, Dataset};

/// Observation count and share of one arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmCount {
    pub arm: Arm,
    pub count: usize,
    /// `count / total`, in `[0, 1]`
    pub share: f64,
}

/// Per-arm sample sizes of a dataset.
///
/// # Examples
///
/// ```
/// use abreport_analysis::{
///     observation::{Dataset, Observation},
///     sample::SampleSizes,
/// };
///
/// let dataset: Dataset = [
///     Observation::new("1", "gate_30", false, false, 1.0),
///     Observation::new("2", "gate_40", false, false, 2.0),
///     Observation::new("3", "gate_40", true, false, 7.0),
///     Observation::new("4", "gate_30", true, true, 9.0),
/// ]
/// .into_iter()
/// .collect();
///
/// let sizes = SampleSizes::from_dataset(&dataset);
/// assert_eq!(sizes.total, 4);
/// assert_eq!(sizes.get("gate_40").map(|c| c.share), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSizes {
    pub total: usize,
    /// Arms in first-seen order
    pub arms: Vec<ArmCount>,
}

impl SampleSizes {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let total = dataset.len();
        let arms = dataset
            .arms()
            .into_iter()
            .map(|arm| {
                let count = dataset.iter().filter(|obs| obs.version == arm).count();
                ArmCount {
                    share: count as f64 / total as f64,
                    arm,
                    count,
                }
            })
            .collect();
        Self { total, arms }
    }

    #[must_use]
    pub fn get(&self, arm: &str) -> Option<&ArmCount> {
        self.arms.iter().find(|count| count.arm == *arm)
    }
}
