use std::{fmt::Write as _, fs, path::PathBuf};

use assert_cmd::Command;
use predicates::{prelude::*, str::contains};

fn abreport() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("abreport")
}

/// 10 users per arm; gate_40 loses one 7-day retained user but its retained
/// user plays more.
fn gate_csv() -> String {
    let mut csv = String::from(
        "userid,version,sum_gamerounds,retention_1,retention_7,sum_gamerounds_capped\n",
    );
    for i in 0..10 {
        let rounds = if i < 2 { 40 } else { 10 };
        writeln!(csv, "a{i},gate_30,{rounds},{},{},{rounds}", i < 5, i < 2).unwrap();
    }
    for i in 0..10 {
        let rounds = if i < 1 { 60 } else { 10 };
        writeln!(csv, "b{i},gate_40,{rounds},{},{},{rounds}", i < 5, i < 1).unwrap();
    }
    csv
}

fn write_csv(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("cookie_cats.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn cli_help_lists_subcommands() {
    abreport()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("summary"))
        .stdout(contains("group-mean"))
        .stdout(contains("compare"))
        .stdout(contains("distribution"));
}

#[test]
fn summary_prints_criteria_and_decision() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    abreport()
        .arg("summary")
        .arg(&csv)
        .assert()
        .success()
        .stdout(contains("7-day retention"))
        .stdout(contains("Retained play intensity"))
        .stdout(contains("-10.00pp"))
        .stdout(contains("Decision: FAILURE"));
}

#[test]
fn summary_json_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    let output = dir.path().join("report.json");
    abreport()
        .arg("summary")
        .arg(&csv)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["decision"], "failure");
    assert_eq!(report["sample_sizes"]["total"], 20);
    assert_eq!(report["metrics"][3]["means"][1]["mean"], 60.0);
}

#[test]
fn summary_with_custom_config() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    let config = dir.path().join("experiment.json");
    fs::write(
        &config,
        r#"{
            "baseline": "gate_30",
            "treatment": "gate_40",
            "criteria": [
                {
                    "name": "Retained play intensity",
                    "role": "primary",
                    "metric": "sum_gamerounds_capped",
                    "subset": "retained_7",
                    "rule": "informational"
                }
            ]
        }"#,
    )
    .unwrap();
    abreport()
        .arg("summary")
        .arg(&csv)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("Decision: SUCCESS"));
}

#[test]
fn group_mean_on_retained_subset() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    abreport()
        .args([
            "group-mean",
            "--metric",
            "sum_gamerounds_capped",
            "--subset",
            "retained_7",
        ])
        .arg(&csv)
        .assert()
        .success()
        .stdout(contains("40.0000"))
        .stdout(contains("60.0000"));
}

#[test]
fn group_mean_unknown_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    abreport()
        .args(["group-mean", "--metric", "retention_30"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(contains("unknown column 'retention_30'"));
}

#[test]
fn compare_prints_delta() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    abreport()
        .args(["compare", "--metric", "retention_7"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(contains("20.00%"))
        .stdout(contains("10.00%"))
        .stdout(contains("-50.00%"));
}

#[test]
fn compare_unknown_arm_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    abreport()
        .args(["compare", "--metric", "retention_7", "--treatment", "gate_50"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(contains("gate_50"))
        .stdout(contains("Delta").not());
}

#[test]
fn distribution_json() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    let output = abreport()
        .args(["distribution", "--json"])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());

    let dists: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dists[0]["arm"], "gate_30");
    assert_eq!(dists[0]["stats"]["count"], 10);
    assert_eq!(dists[1]["stats"]["max"], 60.0);
}

#[test]
fn missing_file_fails_with_path() {
    abreport()
        .args(["summary", "/nonexistent/cookie_cats.csv"])
        .assert()
        .failure()
        .stderr(contains("/nonexistent/cookie_cats.csv"));
}

#[test]
fn invalid_retention_value_fails_with_line() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(
        &dir,
        "user_id,version,retention_1,retention_7,sum_gamerounds_capped\n1,gate_30,True,yes,3\n",
    );
    abreport()
        .arg("summary")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(contains("line 2"))
        .stderr(contains("retention_7"));
}

#[test]
fn unexpected_arm_is_rejected_when_arms_given() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, &gate_csv());
    abreport()
        .args(["summary", "--arms", "gate_30"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(contains("gate_40"));
}
