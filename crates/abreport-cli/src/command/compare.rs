use std::path::PathBuf;

use abreport_analysis::{observation::Metric, subset::Subset, summary};
use clap::Args;

use crate::{
    command::{DataArg, table},
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    data: DataArg,

    /// Column to compare (retention_1, retention_7, sum_gamerounds_capped)
    #[arg(long)]
    metric: Metric,

    /// Rows to include (all, retained_1, retained_7, rounds:<min>-<max>)
    #[arg(long, default_value = "all")]
    subset: Subset,

    /// Control arm
    #[arg(long, default_value = "gate_30")]
    baseline: String,

    /// Arm compared against the control
    #[arg(long, default_value = "gate_40")]
    treatment: String,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write JSON to this file instead of stdout (implies --json)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let dataset = util::load_dataset(&arg.data)?;
    let rows = arg.subset.apply(&dataset);
    let means = summary::group_mean(&rows, arg.metric);
    let comparison = summary::compare_arms(&means, &arg.baseline, &arg.treatment)?;

    if arg.json || arg.output.is_some() {
        return Output::save_json(&comparison, arg.output.as_deref());
    }

    println!(
        "{} {} vs {} (subset: {})",
        arg.metric, comparison.treatment, comparison.baseline, arg.subset
    );
    println!();
    table::print_comparison(arg.metric, &comparison);
    Ok(())
}
