use std::path::PathBuf;

use abreport_analysis::{distribution::ArmDistribution, observation::Metric, subset::Subset};
use clap::Args;

use crate::{
    command::{DataArg, table},
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct DistributionArg {
    #[clap(flatten)]
    data: DataArg,

    /// Column to summarize
    #[arg(long, default_value = "sum_gamerounds_capped")]
    metric: Metric,

    /// Rows to include (all, retained_1, retained_7, rounds:<min>-<max>)
    #[arg(long, default_value = "all")]
    subset: Subset,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write JSON to this file instead of stdout (implies --json)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DistributionArg) -> anyhow::Result<()> {
    let dataset = util::load_dataset(&arg.data)?;
    let rows = arg.subset.apply(&dataset);
    let distributions = ArmDistribution::collect(&rows, arg.metric);

    if arg.json || arg.output.is_some() {
        return Output::save_json(&distributions, arg.output.as_deref());
    }

    println!("Distribution of {} (subset: {})", arg.metric, arg.subset);
    println!();
    table::print_distributions(&distributions);
    Ok(())
}
