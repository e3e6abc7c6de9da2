use std::path::PathBuf;

use abreport_analysis::{subset::Subset, summary};
use clap::Args;

use crate::{
    command::{DataArg, table},
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct GroupMeanArg {
    #[clap(flatten)]
    data: DataArg,

    /// Column to average (retention_1, retention_7, sum_gamerounds_capped)
    #[arg(long)]
    metric: String,

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

pub(crate) fn run(arg: &GroupMeanArg) -> anyhow::Result<()> {
    let dataset = util::load_dataset(&arg.data)?;
    let rows = arg.subset.apply(&dataset);
    let means = summary::group_mean_by_name(&rows, &arg.metric)?;

    if arg.json || arg.output.is_some() {
        return Output::save_json(&means, arg.output.as_deref());
    }

    println!("Mean of {} by arm (subset: {})", arg.metric, arg.subset);
    println!();
    table::print_means(&means);
    Ok(())
}
