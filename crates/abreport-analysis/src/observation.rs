//! Observation and dataset types
//!
//! One [`Observation`] is one user of the experiment: the arm they were
//! assigned to and the outcomes recorded for them. A [`Dataset`] is the
//! immutable, ordered table of observations loaded for a single run.
//!
//! ```text
//! Dataset
//! └─ observations: Vec<Observation>
//!     ├─ user_id                 (row identity only)
//!     ├─ version: Arm            (gate_30 / gate_40)
//!     ├─ retention_1: bool
//!     ├─ retention_7: bool
//!     └─ sum_gamerounds_capped   (outliers clamped upstream)
//! ```
//!
//! # Examples
//!
//! ```
//! use abreport_analysis::observation::{Dataset, Metric, Observation};
//!
//! let dataset: Dataset = [
//!     Observation::new("1", "gate_30", true, false, 12.0),
//!     Observation::new("2", "gate_40", false, false, 3.0),
//!     Observation::new("3", "gate_30", true, true, 80.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(dataset.len(), 3);
//! assert_eq!(dataset.arms(), ["gate_30", "gate_40"]);
//! assert_eq!(Metric::Retention1.value(&dataset.observations()[0]), 1.0);
//! ```

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Label of one experiment arm (e.g. `gate_30`).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Arm(String);

impl Arm {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Arm {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Arm {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl PartialEq<str> for Arm {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Arm {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single user's experiment assignment and outcomes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Observation {
    /// Opaque user identifier, never aggregated
    pub user_id: String,
    /// Experiment arm the user was assigned to
    pub version: Arm,
    /// Whether the user came back one day after install
    pub retention_1: bool,
    /// Whether the user came back seven days after install
    pub retention_7: bool,
    /// Game rounds played in the first two weeks, outlier-capped upstream
    pub sum_gamerounds_capped: f64,
}

impl Observation {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        version: impl Into<Arm>,
        retention_1: bool,
        retention_7: bool,
        sum_gamerounds_capped: f64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            version: version.into(),
            retention_1,
            retention_7,
            sum_gamerounds_capped,
        }
    }
}

/// Columns that can be averaged per arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Metric {
    #[serde(rename = "retention_1")]
    Retention1,
    #[serde(rename = "retention_7")]
    Retention7,
    #[serde(rename = "sum_gamerounds_capped")]
    GameRounds,
}

impl Metric {
    pub const ALL: [Self; 3] = [Self::Retention1, Self::Retention7, Self::GameRounds];

    /// Column name in the input table.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Retention1 => "retention_1",
            Self::Retention7 => "retention_7",
            Self::GameRounds => "sum_gamerounds_capped",
        }
    }

    /// Whether the column is boolean, so its mean is a rate in `[0, 1]`.
    #[must_use]
    pub fn is_rate(self) -> bool {
        matches!(self, Self::Retention1 | Self::Retention7)
    }

    /// Numeric value of this column for one observation (booleans as 1/0).
    #[must_use]
    pub fn value(self, observation: &Observation) -> f64 {
        let as_number = |flag: bool| if flag { 1.0 } else { 0.0 };
        match self {
            Self::Retention1 => as_number(observation.retention_1),
            Self::Retention7 => as_number(observation.retention_7),
            Self::GameRounds => observation.sum_gamerounds_capped,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.column_name(), f)
    }
}

impl FromStr for Metric {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.column_name() == s)
            .ok_or_else(|| SchemaError::UnknownColumn {
                column: s.to_owned(),
            })
    }
}

/// Immutable, ordered table of observations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    #[must_use]
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Distinct arms in the order they first appear.
    #[must_use]
    pub fn arms(&self) -> Vec<Arm> {
        let mut seen = HashSet::new();
        self.observations
            .iter()
            .filter(|obs| seen.insert(&obs.version))
            .map(|obs| obs.version.clone())
            .collect()
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
