//! CSV loader for experiment results
//!
//! Reads a delimited file with a header row into a [`Dataset`]. The
//! columns `user_id`, `version`, `retention_1`, `retention_7` and
//! `sum_gamerounds_capped` are required (`userid` is accepted for
//! `user_id`, but not both at once); any other columns are ignored.
//!
//! Retention columns accept `true`/`false` in any case and `1`/`0`.
//! Every schema problem is reported with the line it occurred on; nothing
//! is silently coerced to a default.
//!
//! # Examples
//!
//! ```
//! use abreport_analysis::loader::{LoadOptions, read_csv};
//!
//! let input = "\
//! user_id,version,sum_gamerounds,retention_1,retention_7,sum_gamerounds_capped
//! 116,gate_30,3,False,False,3
//! 337,gate_30,38,True,False,38
//! 377,gate_40,165,True,False,165
//! ";
//! let dataset = read_csv(input.as_bytes(), &LoadOptions::default()).unwrap();
//! assert_eq!(dataset.len(), 3);
//! assert!(dataset.observations()[1].retention_1);
//! ```

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    error::SchemaError,
    observation::{Arm, Dataset, Observation},
};

/// Required columns, each with the header names accepted for it.
const REQUIRED_COLUMNS: [(&str, &[&str]); 5] = [
    ("user_id", &["user_id", "userid"]),
    ("version", &["version"]),
    ("retention_1", &["retention_1"]),
    ("retention_7", &["retention_7"]),
    ("sum_gamerounds_capped", &["sum_gamerounds_capped"]),
];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("malformed CSV input")]
    Csv(#[error(source)] csv::Error),
    #[display("input does not match the observation schema")]
    Schema(#[error(source)] SchemaError),
}

impl From<SchemaError> for LoadError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Arms a row may belong to; empty accepts any label.
    pub known_arms: Vec<Arm>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "userid")]
    user_id: String,
    version: String,
    retention_1: String,
    retention_7: String,
    sum_gamerounds_capped: String,
}

impl RawRow {
    fn into_observation(
        self,
        line: u64,
        options: &LoadOptions,
    ) -> Result<Observation, SchemaError> {
        let user_id = non_empty(line, "user_id", self.user_id)?;
        let version = Arm::from(non_empty(line, "version", self.version)?);
        if !options.known_arms.is_empty() && !options.known_arms.contains(&version) {
            return Err(SchemaError::UnexpectedArm {
                line,
                arm: version.to_string(),
            });
        }
        Ok(Observation {
            user_id,
            version,
            retention_1: parse_bool(line, "retention_1", &self.retention_1)?,
            retention_7: parse_bool(line, "retention_7", &self.retention_7)?,
            sum_gamerounds_capped: parse_rounds(line, &self.sum_gamerounds_capped)?,
        })
    }
}

fn non_empty(line: u64, column: &'static str, value: String) -> Result<String, SchemaError> {
    if value.is_empty() {
        Err(SchemaError::MissingValue { line, column })
    } else {
        Ok(value)
    }
}

fn parse_bool(line: u64, column: &'static str, value: &str) -> Result<bool, SchemaError> {
    if value.is_empty() {
        return Err(SchemaError::MissingValue { line, column });
    }
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Ok(false)
    } else {
        Err(SchemaError::InvalidValue {
            line,
            column,
            value: value.to_owned(),
            expected: "a boolean",
        })
    }
}

fn parse_rounds(line: u64, value: &str) -> Result<f64, SchemaError> {
    const COLUMN: &str = "sum_gamerounds_capped";
    if value.is_empty() {
        return Err(SchemaError::MissingValue {
            line,
            column: COLUMN,
        });
    }
    match value.parse::<f64>() {
        Ok(rounds) if rounds.is_finite() && rounds >= 0.0 => Ok(rounds),
        _ => Err(SchemaError::InvalidValue {
            line,
            column: COLUMN,
            value: value.to_owned(),
            expected: "a non-negative number",
        }),
    }
}

/// Parses CSV data from any reader.
pub fn read_csv<R>(reader: R, options: &LoadOptions) -> Result<Dataset, LoadError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    for (column, accepted) in REQUIRED_COLUMNS {
        let column = column.to_owned();
        match headers.iter().filter(|header| accepted.contains(header)).count() {
            0 => return Err(SchemaError::MissingColumn { column }.into()),
            1 => {}
            _ => return Err(SchemaError::DuplicateColumn { column }.into()),
        }
    }

    let mut observations = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let raw: RawRow = record.deserialize(Some(&headers))?;
        observations.push(raw.into_observation(line, options)?);
    }

    debug!(rows = observations.len(), "parsed observations");
    Ok(Dataset::new(observations))
}

/// Loads a CSV file from disk.
pub fn load_csv<P>(path: P, options: &LoadOptions) -> Result<Dataset, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "loading experiment data");
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_csv(BufReader::new(file), options)
}
