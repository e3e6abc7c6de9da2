//! Named row predicates for the views the reports slice by

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    observation::{Dataset, Observation},
    summary,
};

/// A named subset of observations.
///
/// Parsed from the command line as `all`, `retained_1`, `retained_7` or
/// `rounds:<min>-<max>` (inclusive bounds on capped game rounds).
///
/// # Examples
///
/// ```
/// use abreport_analysis::{observation::Observation, subset::Subset};
///
/// let subset: Subset = "rounds:30-45".parse().unwrap();
/// assert!(subset.matches(&Observation::new("1", "gate_30", true, false, 30.0)));
/// assert!(!subset.matches(&Observation::new("2", "gate_30", true, false, 46.0)));
/// assert_eq!(subset.to_string(), "rounds:30-45");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum Subset {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "retained_1")]
    Retained1,
    #[serde(rename = "retained_7")]
    Retained7,
    #[serde(rename = "rounds_between")]
    RoundsBetween { min: f64, max: f64 },
}

impl Subset {
    #[must_use]
    pub fn matches(&self, observation: &Observation) -> bool {
        match *self {
            Self::All => true,
            Self::Retained1 => observation.retention_1,
            Self::Retained7 => observation.retention_7,
            Self::RoundsBetween { min, max } => {
                (min..=max).contains(&observation.sum_gamerounds_capped)
            }
        }
    }

    /// Rows of `dataset` in this subset, in their original order.
    #[must_use]
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        summary::filter_subset(dataset, |obs| self.matches(obs))
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Retained1 => f.write_str("retained_1"),
            Self::Retained7 => f.write_str("retained_7"),
            Self::RoundsBetween { min, max } => write!(f, "rounds:{min}-{max}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "invalid subset '{input}' (expected all, retained_1, retained_7 or rounds:<min>-<max>)"
)]
pub struct ParseSubsetError {
    pub input: String,
}

impl FromStr for Subset {
    type Err = ParseSubsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSubsetError {
            input: s.to_owned(),
        };
        match s {
            "all" => Ok(Self::All),
            "retained_1" => Ok(Self::Retained1),
            "retained_7" => Ok(Self::Retained7),
            _ => {
                let range = s.strip_prefix("rounds:").ok_or_else(err)?;
                let (min, max) = range.split_once('-').ok_or_else(err)?;
                let min = min.trim().parse::<f64>().map_err(|_| err())?;
                let max = max.trim().parse::<f64>().map_err(|_| err())?;
                if !(min.is_finite() && max.is_finite()) || min > max {
                    return Err(err());
                }
                Ok(Self::RoundsBetween { min, max })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_subsets() {
        assert_eq!("all".parse(), Ok(Subset::All));
        assert_eq!("retained_1".parse(), Ok(Subset::Retained1));
        assert_eq!("retained_7".parse(), Ok(Subset::Retained7));
        assert_eq!(
            "rounds:30-45".parse(),
            Ok(Subset::RoundsBetween {
                min: 30.0,
                max: 45.0
            })
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in ["", "retained", "rounds:", "rounds:45-30", "rounds:a-b", "30-45"] {
            assert!(input.parse::<Subset>().is_err(), "{input} should fail");
        }
    }

    #[test]
    fn test_display_round_trips() {
        for subset in [
            Subset::All,
            Subset::Retained1,
            Subset::Retained7,
            Subset::RoundsBetween {
                min: 30.0,
                max: 45.0,
            },
        ] {
            assert_eq!(subset.to_string().parse(), Ok(subset));
        }
    }

    #[test]
    fn test_retained_subsets() {
        let obs = Observation::new("1", "gate_30", true, false, 10.0);
        assert!(Subset::All.matches(&obs));
        assert!(Subset::Retained1.matches(&obs));
        assert!(!Subset::Retained7.matches(&obs));
    }
}
