//! End-to-end tests for the keyrate binary.

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const CURVES: &str = "\
curve_date,curve_type,tenor,rate
2023-01-01,zero,0.5,2.0
2023-01-01,zero,1,2.0
2023-01-01,zero,2,2.0
2023-01-01,zero,5,2.0
2023-01-01,zero,10,2.0
2023-01-01,zero,30,2.0
2023-01-01,par,1,2.1
2023-01-01,par,30,
";

const INVENTORY: &str = "\
as_of_date,id,issue_date,maturity_date,coupon,frequency,quantity,face_value
2023-01-01,T1,2020-01-01,2025-01-01,2.0,Semi-Annual,1000000,100
2023-01-01,Z30,2020-06-15,2030-06-15,,Annual,-1000,
";

const RETURNS: &str = "\
date,1,2,5,10,30
2022-12-26,0.010,0.012,0.011,0.009,0.007
2022-12-27,-0.020,-0.018,-0.015,-0.012,-0.010
2022-12-28,0.005,0.007,0.010,0.012,0.013
2022-12-29,0.015,0.011,0.006,0.002,-0.001
2022-12-30,-0.004,-0.006,-0.008,-0.009,-0.011
2022-12-31,0.008,0.009,0.012,0.014,0.015
";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn keyrate() -> Command {
    Command::cargo_bin("keyrate").unwrap()
}

#[test]
fn test_help() {
    keyrate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("price"))
        .stdout(predicate::str::contains("shocks"));
}

#[test]
fn test_price_json() {
    let dir = tempfile::tempdir().unwrap();
    let curves = write(dir.path(), "curves.csv", CURVES);
    let inventory = write(dir.path(), "inventory.csv", INVENTORY);

    let output = keyrate()
        .args(["--format", "json", "price", "--as-of", "2023-01-01"])
        .arg("--curve-file")
        .arg(&curves)
        .arg("--inventory-file")
        .arg(&inventory)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let positions = report["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0]["id"], "T1");
    assert!(positions[0]["dv01"].as_f64().unwrap() > 0.0);
    assert!(positions[1]["dv01"].as_f64().unwrap() < 0.0);
    assert_eq!(report["as_of"], "2023-01-01");
    assert_eq!(report["summary"]["instrument_count"], 2);
    assert_eq!(report["summary"]["key_rate_dv01"].as_array().unwrap().len(), 8);
}

#[test]
fn test_price_table() {
    let dir = tempfile::tempdir().unwrap();
    let curves = write(dir.path(), "curves.csv", CURVES);
    let inventory = write(dir.path(), "inventory.csv", INVENTORY);

    keyrate()
        .args(["price", "--as-of", "2023-01-01"])
        .arg("--curve-file")
        .arg(&curves)
        .arg("--inventory-file")
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains("Key-Rate DV01"))
        .stdout(predicate::str::contains("Z30"));
}

#[test]
fn test_missing_curve_fails() {
    let dir = tempfile::tempdir().unwrap();
    let curves = write(dir.path(), "curves.csv", CURVES);
    let inventory = write(dir.path(), "inventory.csv", INVENTORY);

    keyrate()
        .args(["price", "--as-of", "2023-01-02"])
        .arg("--curve-file")
        .arg(&curves)
        .arg("--inventory-file")
        .arg(&inventory)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No curve 'zero'"));
}

#[test]
fn test_price_csv_carries_as_of() {
    let dir = tempfile::tempdir().unwrap();
    let curves = write(dir.path(), "curves.csv", CURVES);
    let inventory = write(dir.path(), "inventory.csv", INVENTORY);

    let output = keyrate()
        .args(["-f", "csv", "price", "--as-of", "2023-01-01"])
        .arg("--curve-file")
        .arg(&curves)
        .arg("--inventory-file")
        .arg(&inventory)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    assert!(lines.next().unwrap().starts_with("as_of,id,"));
    assert!(lines.next().unwrap().starts_with("2023-01-01,T1,"));
    assert!(lines.next().unwrap().starts_with("2023-01-01,Z30,"));
}

#[test]
fn test_shocks_table_lists_loading_dv01() {
    let dir = tempfile::tempdir().unwrap();
    let curves = write(dir.path(), "curves.csv", CURVES);
    let inventory = write(dir.path(), "inventory.csv", INVENTORY);
    let returns = write(dir.path(), "returns.csv", RETURNS);

    keyrate()
        .args(["shocks", "--as-of", "2023-01-01", "--components", "2"])
        .arg("--curve-file")
        .arg(&curves)
        .arg("--inventory-file")
        .arg(&inventory)
        .arg("--returns-file")
        .arg(&returns)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loading DV01"))
        .stdout(predicate::str::contains("PC2"));
}

#[test]
fn test_shocks_with_pca() {
    let dir = tempfile::tempdir().unwrap();
    let curves = write(dir.path(), "curves.csv", CURVES);
    let inventory = write(dir.path(), "inventory.csv", INVENTORY);
    let returns = write(dir.path(), "returns.csv", RETURNS);

    let output = keyrate()
        .args(["-f", "json", "shocks", "--as-of", "2023-01-01"])
        .args(["--estimator", "ledoit_wolf", "--components", "2"])
        .arg("--curve-file")
        .arg(&curves)
        .arg("--inventory-file")
        .arg(&inventory)
        .arg("--returns-file")
        .arg(&returns)
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 18);
    assert_eq!(rows[0]["scenario"], "Parallel");
    assert_eq!(rows[6]["scenario"], "PC1");
    assert_eq!(rows[12]["scenario"], "PC2");
}

#[test]
fn test_curve_minimal() {
    let dir = tempfile::tempdir().unwrap();
    let curves = write(dir.path(), "curves.csv", CURVES);

    keyrate()
        .args(["-f", "minimal", "curve", "--as-of", "2023-01-01", "--tenors", "3,40"])
        .arg("--curve-file")
        .arg(&curves)
        .assert()
        .success()
        .stdout("3,2.000000\n40,2.000000\n");
}

#[test]
fn test_cashflows_csv() {
    keyrate()
        .args(["-f", "csv", "cashflows", "--issue", "2022-01-01", "--maturity", "2025-01-01"])
        .args(["--coupon", "2.0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("number,date,amount"))
        .stdout(predicate::str::contains("2025-01-01,101"));
}

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keyrate.toml");

    keyrate()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    keyrate()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure();

    keyrate()
        .args(["-f", "json", "config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bump_bps\": 1.0"));
}

#[test]
fn test_bad_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bad.toml", "[pricing]\nkey_tenors = []\n");

    keyrate()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .failure();
}
