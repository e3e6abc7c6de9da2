//! Success criteria and verdicts
//!
//! An [`ExperimentConfig`] names the baseline and treatment arms and the
//! criteria the treatment is judged by. Each [`Criterion`] compares one metric
//! on one subset and turns the absolute delta into a [`Verdict`] through its
//! [`Rule`]. The primary criteria decide the overall [`Decision`].
//!
//! The configuration is plain serde data, so it can be read from JSON:
//!
//! ```json
//! {
//!   "baseline": "gate_30",
//!   "treatment": "gate_40",
//!   "criteria": [
//!     {
//!       "name": "7-day retention",
//!       "role": "primary",
//!       "metric": "retention_7",
//!       "rule": { "min_lift": { "threshold": 0.005 } }
//!     },
//!     {
//!       "name": "Retained play intensity",
//!       "role": "secondary",
//!       "metric": "sum_gamerounds_capped",
//!       "subset": "retained_7",
//!       "rule": "informational"
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{observation::Metric, subset::Subset};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExperimentConfig {
    pub baseline: String,
    pub treatment: String,
    pub criteria: Vec<Criterion>,
}

impl Default for ExperimentConfig {
    /// The gate placement experiment: gate 30 is the control, gate 40 the change.
    fn default() -> Self {
        Self {
            baseline: "gate_30".to_owned(),
            treatment: "gate_40".to_owned(),
            criteria: vec![
                Criterion {
                    name: "7-day retention".to_owned(),
                    role: Role::Primary,
                    metric: Metric::Retention7,
                    subset: Subset::All,
                    rule: Rule::MinLift { threshold: 0.005 },
                },
                Criterion {
                    name: "1-day retention".to_owned(),
                    role: Role::Secondary,
                    metric: Metric::Retention1,
                    subset: Subset::All,
                    rule: Rule::NonInferior { margin: 0.0 },
                },
                Criterion {
                    name: "Play volume".to_owned(),
                    role: Role::Secondary,
                    metric: Metric::GameRounds,
                    subset: Subset::All,
                    rule: Rule::Increase { tolerance: 0.5 },
                },
                Criterion {
                    name: "Retained play intensity".to_owned(),
                    role: Role::Secondary,
                    metric: Metric::GameRounds,
                    subset: Subset::Retained7,
                    rule: Rule::Informational,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Criterion {
    pub name: String,
    pub role: Role,
    pub metric: Metric,
    #[serde(default)]
    pub subset: Subset,
    pub rule: Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[display("primary")]
    Primary,
    #[display("secondary")]
    Secondary,
}

/// How an absolute delta (treatment minus baseline) is judged.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Pass at or above `threshold`, fail below.
    MinLift { threshold: f64 },
    /// Pass unless the metric drops by more than `margin`; a larger drop warns.
    NonInferior { margin: f64 },
    /// Pass above `tolerance`, neutral within it, fail below `-tolerance`.
    Increase { tolerance: f64 },
    /// Post-hoc figure: positive passes, zero is neutral, negative warns.
    Informational,
}

impl Rule {
    #[must_use]
    pub fn evaluate(self, absolute_delta: f64) -> Verdict {
        match self {
            Self::MinLift { threshold } => {
                if absolute_delta >= threshold {
                    Verdict::Pass
                } else {
                    Verdict::Fail
                }
            }
            Self::NonInferior { margin } => {
                if absolute_delta >= -margin {
                    Verdict::Pass
                } else {
                    Verdict::Warning
                }
            }
            Self::Increase { tolerance } => {
                if absolute_delta > tolerance {
                    Verdict::Pass
                } else if absolute_delta >= -tolerance {
                    Verdict::Neutral
                } else {
                    Verdict::Fail
                }
            }
            Self::Informational => {
                if absolute_delta > 0.0 {
                    Verdict::Pass
                } else if absolute_delta < 0.0 {
                    Verdict::Warning
                } else {
                    Verdict::Neutral
                }
            }
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    #[display("pass")]
    Pass,
    #[display("warning")]
    Warning,
    #[display("neutral")]
    Neutral,
    #[display("fail")]
    Fail,
}

/// Overall outcome of the experiment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Every primary criterion passed.
    #[display("success")]
    Success,
    /// At least one primary criterion did not pass.
    #[display("failure")]
    Failure,
    /// No primary criterion was configured.
    #[display("inconclusive")]
    Inconclusive,
}

impl Decision {
    /// Decides from `(role, verdict)` pairs; only primary criteria count.
    #[must_use]
    pub fn from_verdicts<I>(verdicts: I) -> Self
    where
        I: IntoIterator<Item = (Role, Verdict)>,
    {
        let mut any_primary = false;
        for (role, verdict) in verdicts {
            if role != Role::Primary {
                continue;
            }
            any_primary = true;
            if verdict != Verdict::Pass {
                return Self::Failure;
            }
        }
        if any_primary {
            Self::Success
        } else {
            Self::Inconclusive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_lift() {
        let rule = Rule::MinLift { threshold: 0.005 };
        assert_eq!(rule.evaluate(0.006), Verdict::Pass);
        assert_eq!(rule.evaluate(0.005), Verdict::Pass);
        assert_eq!(rule.evaluate(0.001), Verdict::Fail);
        assert_eq!(rule.evaluate(-0.0082), Verdict::Fail);
    }

    #[test]
    fn test_non_inferior() {
        let rule = Rule::NonInferior { margin: 0.0 };
        assert_eq!(rule.evaluate(0.0), Verdict::Pass);
        assert_eq!(rule.evaluate(-0.0059), Verdict::Warning);
        let lenient = Rule::NonInferior { margin: 0.01 };
        assert_eq!(lenient.evaluate(-0.0059), Verdict::Pass);
    }

    #[test]
    fn test_increase() {
        let rule = Rule::Increase { tolerance: 0.5 };
        assert_eq!(rule.evaluate(1.2), Verdict::Pass);
        assert_eq!(rule.evaluate(0.3), Verdict::Neutral);
        assert_eq!(rule.evaluate(-0.5), Verdict::Neutral);
        assert_eq!(rule.evaluate(-2.0), Verdict::Fail);
    }

    #[test]
    fn test_informational() {
        assert_eq!(Rule::Informational.evaluate(7.6), Verdict::Pass);
        assert_eq!(Rule::Informational.evaluate(0.0), Verdict::Neutral);
        assert_eq!(Rule::Informational.evaluate(-1.0), Verdict::Warning);
    }

    #[test]
    fn test_decision() {
        use Role::{Primary, Secondary};
        assert_eq!(
            Decision::from_verdicts([(Primary, Verdict::Pass), (Secondary, Verdict::Fail)]),
            Decision::Success
        );
        assert_eq!(
            Decision::from_verdicts([(Primary, Verdict::Fail), (Secondary, Verdict::Pass)]),
            Decision::Failure
        );
        assert_eq!(
            Decision::from_verdicts([(Secondary, Verdict::Pass)]),
            Decision::Inconclusive
        );
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "baseline": "gate_30",
            "treatment": "gate_40",
            "criteria": [
                {
                    "name": "7-day retention",
                    "role": "primary",
                    "metric": "retention_7",
                    "rule": { "min_lift": { "threshold": 0.005 } }
                },
                {
                    "name": "Mid-range players",
                    "role": "secondary",
                    "metric": "sum_gamerounds_capped",
                    "subset": { "rounds_between": { "min": 30.0, "max": 45.0 } },
                    "rule": "informational"
                }
            ]
        }"#;
        let config: ExperimentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.criteria.len(), 2);
        assert_eq!(config.criteria[0].subset, Subset::All);
        assert_eq!(
            config.criteria[1].subset,
            Subset::RoundsBetween {
                min: 30.0,
                max: 45.0
            }
        );
        assert_eq!(config.criteria[1].rule, Rule::Informational);
    }

    #[test]
    fn test_default_config_round_trips_through_json() {
        let config = ExperimentConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ExperimentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
