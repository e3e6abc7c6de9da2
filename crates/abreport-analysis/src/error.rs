//! Error types shared by the loader and the summary operations

/// The input table does not match the expected observation schema.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("missing required column '{column}'")]
    MissingColumn { column: String },
    #[display("column '{column}' appears more than once in the header")]
    DuplicateColumn { column: String },
    #[display("unknown column '{column}'")]
    UnknownColumn { column: String },
    #[display("line {line}: missing value in column '{column}'")]
    MissingValue { line: u64, column: &'static str },
    #[display("line {line}: invalid value '{value}' in column '{column}' (expected {expected})")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
    #[display("line {line}: arm '{arm}' is not one of the configured arms")]
    UnexpectedArm { line: u64, arm: String },
}

/// A comparison referenced an arm that has no entry in the group means.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("arm '{arm}' is not present in the group means")]
pub struct UnknownArmError {
    pub arm: String,
}
