//! Plain-text tables for the report commands
//!
//! Every table is indented by two spaces with right-aligned numeric columns,
//! so sections line up when printed one after another.

use abreport_analysis::{
    distribution::ArmDistribution,
    observation::Metric,
    report::MetricReport,
    sample::SampleSizes,
    summary::{ArmComparison, GroupMeans},
};

use crate::util;

fn print_separator(width: usize) {
    println!("  {}", "-".repeat(width));
}

pub(super) fn print_sample_sizes(sizes: &SampleSizes) {
    println!("  {:<16} {:>10} {:>8}", "Arm", "Users", "Share");
    // arm(16) + users(10) + share(8) + spaces(2)
    print_separator(36);
    for arm in &sizes.arms {
        println!(
            "  {:<16} {:>10} {:>7.2}%",
            arm.arm.as_str(),
            arm.count,
            arm.share * 100.0
        );
    }
    println!("  {:<16} {:>10}", "Total", sizes.total);
}

pub(super) fn print_means(means: &GroupMeans) {
    println!("  {:<16} {:>10} {:>12}", "Arm", "Users", "Mean");
    print_separator(40);
    for entry in means {
        println!(
            "  {:<16} {:>10} {:>12.4}",
            entry.arm.as_str(),
            entry.count,
            entry.mean
        );
    }
}

pub(super) fn print_comparison(metric: Metric, comparison: &ArmComparison) {
    println!(
        "  {:<16} {:>12}",
        format!("{} (baseline)", comparison.baseline),
        util::format_value(metric, comparison.baseline_mean)
    );
    println!(
        "  {:<16} {:>12}",
        format!("{} (treatment)", comparison.treatment),
        util::format_value(metric, comparison.treatment_mean)
    );
    println!(
        "  {:<16} {:>12}",
        "Delta",
        util::format_delta(metric, comparison.absolute_delta)
    );
    println!(
        "  {:<16} {:>12}",
        "Relative",
        util::format_relative(comparison.relative_delta)
    );
}

pub(super) fn print_metric_reports(metrics: &[MetricReport]) {
    println!(
        "  {:<26} {:<10} {:<12} {:>10} {:>10} {:>10} {:>9} {:>8}",
        "Criterion", "Role", "Subset", "Baseline", "Treatment", "Delta", "Relative", "Verdict",
    );
    // name(26) + role(10) + subset(12) + 3 values(10) + relative(9) + verdict(8) + spaces(7)
    print_separator(102);
    for report in metrics {
        let comparison = &report.comparison;
        println!(
            "  {:<26} {:<10} {:<12} {:>10} {:>10} {:>10} {:>9} {:>8}",
            report.name,
            report.role.to_string(),
            report.subset.to_string(),
            util::format_value(report.metric, comparison.baseline_mean),
            util::format_value(report.metric, comparison.treatment_mean),
            util::format_delta(report.metric, comparison.absolute_delta),
            util::format_relative(comparison.relative_delta),
            report.verdict.to_string(),
        );
    }
}

pub(super) fn print_distributions(distributions: &[ArmDistribution]) {
    println!(
        "  {:<16} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Arm", "Users", "Mean", "Std", "Min", "Q1", "Median", "Q3", "Outliers",
    );
    // arm(16) + 8 columns(8) + spaces(8)
    print_separator(88);
    for dist in distributions {
        let stats = &dist.summary.stats;
        let box_plot = &dist.summary.box_plot;
        println!(
            "  {:<16} {:>8} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8}",
            dist.arm.as_str(),
            stats.count,
            stats.mean,
            stats.std_dev,
            stats.min,
            box_plot.q1,
            box_plot.median,
            box_plot.q3,
            box_plot.outlier_count,
        );
    }
}
