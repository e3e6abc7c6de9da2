//! Full experiment report command
//!
//! Loads the CSV once, evaluates every configured criterion and prints the
//! sample sizes, per-criterion figures, play-round distributions and the
//! overall decision.

use std::path::PathBuf;

use abreport_analysis::report::ExperimentReport;
use clap::Args;
use tracing::info;

use crate::{
    command::{DataArg, table},
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    data: DataArg,

    /// Path to an experiment config JSON file (defaults to the gate 30/40 criteria)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text tables
    #[arg(long)]
    json: bool,

    /// Write JSON to this file instead of stdout (implies --json)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let config = util::read_experiment_config(arg.config.as_deref())?;
    let dataset = util::load_dataset(&arg.data)?;
    let report = ExperimentReport::build(&dataset, &config)?;
    info!(decision = %report.decision, "report built");

    if arg.json || arg.output.is_some() {
        return Output::save_json(&report, arg.output.as_deref());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ExperimentReport) {
    println!(
        "A/B Test Report: {} (baseline) vs {} (treatment)",
        report.baseline, report.treatment
    );
    println!("==========================================\n");

    println!("Sample sizes:");
    table::print_sample_sizes(&report.sample_sizes);
    println!();

    println!("Success criteria:");
    table::print_metric_reports(&report.metrics);
    println!();

    for distribution in &report.distributions {
        println!(
            "Distribution of {} (subset: {}):",
            distribution.metric, distribution.subset
        );
        table::print_distributions(&distribution.arms);
        println!();
    }

    println!("Decision: {}", report.decision.to_string().to_uppercase());
}
