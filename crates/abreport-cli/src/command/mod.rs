use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use self::{
    compare::CompareArg, distribution::DistributionArg, group_mean::GroupMeanArg,
    summary::SummaryArg,
};
use crate::logging;

mod compare;
mod distribution;
mod group_mean;
mod summary;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Full experiment report with success criteria and decision
    Summary(#[clap(flatten)] SummaryArg),
    /// Mean of one metric per arm
    GroupMean(#[clap(flatten)] GroupMeanArg),
    /// Difference of one metric between two arms
    Compare(#[clap(flatten)] CompareArg),
    /// Distribution of one metric per arm
    Distribution(#[clap(flatten)] DistributionArg),
}

/// Input data shared by every subcommand
#[derive(Debug, Clone, Args)]
pub(crate) struct DataArg {
    /// Path to the experiment results CSV file
    pub csv: PathBuf,

    /// Arm labels the data may contain (comma-separated); others are rejected
    #[arg(long, value_delimiter = ',')]
    pub arms: Vec<String>,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose);
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::GroupMean(arg) => group_mean::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Distribution(arg) => distribution::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_compare_defaults() {
        let args = CommandArgs::try_parse_from([
            "abreport",
            "-vv",
            "compare",
            "data.csv",
            "--metric",
            "retention_7",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::Compare(_)));
    }

    #[test]
    fn test_rejects_unknown_subset() {
        let result = CommandArgs::try_parse_from([
            "abreport",
            "distribution",
            "data.csv",
            "--subset",
            "retained_30",
        ]);
        assert!(result.is_err());
    }
}
