use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// The binary run from an empty temp dir, with no ambient configuration
fn cleaner(work_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("sales_cleaner");
    cmd.current_dir(work_dir)
        .env_remove("SALES_CLEANER_INPUT")
        .env_remove("SALES_CLEANER_OUTPUT")
        .env_remove("SALES_CLEANER_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace_with_input(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    fs::write(&input, contents).unwrap();
    (dir, input)
}

#[test]
fn cleans_input_and_exits_zero() {
    let (dir, input) = workspace_with_input(" Price ,Qty,Item\n$12.50,3, Widget \nabc,5,X\n");
    let output = dir.path().join("out/clean.csv");

    cleaner(dir.path())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaning complete"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "price,qty,item\n12.5,3,Widget\n");
}

#[test]
fn missing_price_column_exits_two_without_output() {
    let (dir, input) = workspace_with_input("Qty,Item\n3,Widget\n");
    let output = dir.path().join("clean.csv");

    cleaner(dir.path())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .code(2);

    assert!(!output.exists());
}

#[test]
fn missing_input_exits_three() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("clean.csv");

    cleaner(dir.path())
        .arg("--input")
        .arg(dir.path().join("nope.csv"))
        .arg("--output")
        .arg(&output)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("nope.csv"));

    assert!(!output.exists());
}

#[test]
fn invalid_config_exits_four() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[csv]\ndelimiter = \"é\"\n").unwrap();

    cleaner(dir.path()).arg("--config").arg(&config).assert().code(4);
}

#[test]
fn config_from_env_drives_logging_and_metrics() {
    let (dir, input) = workspace_with_input("Price,Qty\n1,2\n-1,2\n");
    let output = dir.path().join("clean.csv");
    let logs = dir.path().join("logs");
    let metrics = dir.path().join("metrics/clean.prom");
    let config = dir.path().join("cleaner.toml");
    fs::write(
        &config,
        format!(
            "[paths]\ninput = {:?}\noutput = {:?}\nmetrics = {:?}\n\n[logging]\ndirectory = {:?}\n",
            input.display().to_string(),
            output.display().to_string(),
            metrics.display().to_string(),
            logs.display().to_string(),
        ),
    )
    .unwrap();

    cleaner(dir.path())
        .env("SALES_CLEANER_CONFIG", &config)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "price,qty\n1,2\n");
    assert!(logs.is_dir());

    let snapshot = fs::read_to_string(&metrics).unwrap();
    assert!(snapshot.contains("sales_clean_runs_total"));
    assert!(snapshot.contains("stage=\"normalize_columns\""));
    assert!(snapshot.contains("stage=\"filter_range\""));
}
