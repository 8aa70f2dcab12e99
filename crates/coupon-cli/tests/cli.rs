//! End-to-end tests for the `coupon` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const TEN_YEAR_FLOWS: &str = "2.3,2.9,3.0,3.2,4.0,3.8,4.2,4.8,5.5,105";

/// A config file path inside a fresh temporary directory.
fn isolated_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    (dir, path)
}

fn coupon(config: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("coupon"));
    cmd.env("COUPON_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn zero_discrete_and_continuous() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["--format", "minimal", "zero", "--maturity", "20", "--yield", "0.08"])
        .assert()
        .success()
        .stdout("2145.482074\n");

    coupon(&config)
        .args(["-f", "minimal", "zero", "-m", "20", "-r", "0.08", "--continuous"])
        .assert()
        .success()
        .stdout("2018.965180\n");
}

#[test]
fn zero_table_output() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["zero", "--maturity", "20", "--yield", "0.08", "--frequency", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zero-Coupon Bond"))
        .stdout(predicate::str::contains("2145.482074"))
        .stdout(predicate::str::contains("Annual"));
}

#[test]
fn curve_prices_humped_yield() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["-f", "minimal", "curve"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2725.31"));
}

#[test]
fn bond_with_periods_and_duration_horizon() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args([
            "--format",
            "json",
            "bond",
            "--face",
            "100000",
            "--maturity",
            "3",
            "--coupon",
            "0.08",
            "--yield",
            "0.09",
            "--frequency",
            "2",
            "--periods",
            "--horizon-at-duration",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("97421.06"))
        .stdout(predicate::str::contains("2.721701"))
        .stdout(predicate::str::contains("123797.1"))
        .stdout(predicate::str::contains("79861.15"));
}

#[test]
fn bond_rejects_fractional_periods() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["bond", "--maturity", "2.3", "--coupon", "0.05", "--yield", "0.05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("whole number"));
}

#[test]
fn ytm_with_trace() {
    let (_dir, config) = isolated_config();

    let output = coupon(&config)
        .args([
            "--format",
            "json",
            "ytm",
            "--flows",
            TEN_YEAR_FLOWS,
            "--price",
            "100",
            "--continuous",
            "--tolerance",
            "1e-8",
            "--trace",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.037003744979"), "stdout:\n{stdout}");
    assert!(stdout.contains("converged (step size)"), "stdout:\n{stdout}");

    // Summary array followed by a four-row trace array
    let trace_start = stdout.find("\"iteration\"").unwrap();
    assert_eq!(stdout[trace_start..].matches("\"iteration\"").count(), 4);
}

#[test]
fn ytm_exhausted_is_reported_not_failed() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args([
            "ytm",
            "--flows",
            TEN_YEAR_FLOWS,
            "--price",
            "100",
            "--continuous",
            "--max-iterations",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("exhausted"))
        .stderr(predicate::str::contains("no convergence"));
}

#[test]
fn ytm_internal_rate_of_return() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args([
            "-f",
            "minimal",
            "ytm",
            "--flows",
            "-100,60,60",
            "--from-zero",
            "--irr",
            "--guess",
            "0.1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.13066238"));
}

#[test]
fn ytm_requires_price_or_irr() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["ytm", "--flows", TEN_YEAR_FLOWS])
        .assert()
        .failure();

    coupon(&config)
        .args(["ytm", "--flows", TEN_YEAR_FLOWS, "--price", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price"));
}

#[test]
fn sweep_reports_every_guess() {
    let (_dir, config) = isolated_config();

    let output = coupon(&config)
        .args([
            "--format",
            "csv",
            "sweep",
            "--flows",
            TEN_YEAR_FLOWS,
            "--price",
            "100",
            "--continuous",
            "--tolerance",
            "1e-8",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 21, "stdout:\n{stdout}");
    assert!(lines[0].starts_with("guess,outcome,iterations"));
    assert!(lines[1..].iter().all(|l| l.contains("converged")));
}

#[test]
fn sign_region() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args([
            "-f",
            "minimal",
            "sign",
            "--constants",
            "0,5,0",
            "--slopes",
            "-3,0,1",
            "--rate",
            "0.05",
        ])
        .assert()
        .success()
        .stdout("x < 2.275190\n");
}

#[test]
fn bootstrap_table_and_validation() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["bootstrap", "--prices", "101,101.5,101.2", "--coupon", "0.05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bootstrapped Term Structure"))
        .stdout(predicate::str::contains("3.0000"));

    coupon(&config)
        .args([
            "bootstrap",
            "--prices",
            "101,101.5",
            "--maturities",
            "1,3",
            "--coupon",
            "0.05",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must mature"));
}

#[test]
fn swap_value_and_periods() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args([
            "-f", "minimal", "swap", "--prices", "101,101.5,101.2", "--coupon", "0.05",
            "--fixed-rate", "0.045",
        ])
        .assert()
        .success()
        .stdout("1043.865483\n");

    // Header plus one line per bootstrapped period
    let output = coupon(&config)
        .args([
            "-f", "csv", "swap", "--prices", "101,101.5,101.2", "--coupon", "0.05", "--periods",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Par Rate"));
    assert!(stdout.contains("4.462137%"));
    assert!(stdout.lines().any(|line| line.starts_with("period,forward_rate")));
}

#[test]
fn swap_rejects_inconsistent_curve() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["swap", "--prices", "101,101.5", "--maturities", "1,3", "--coupon", "0.05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must mature"));
}

#[test]
fn lattice_zero_price_and_nodes() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args([
            "-f", "minimal", "lattice", "--rate", "0.06", "--up", "1.25", "--down", "0.9",
        ])
        .assert()
        .success()
        .stdout("0.8291222972\n");

    coupon(&config)
        .args(["lattice", "-r", "0.06", "-u", "1.25", "-d", "0.9", "--nodes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lattice Nodes"))
        .stdout(predicate::str::contains("9.375000%"));

    coupon(&config)
        .args(["lattice", "--rate", "0.06", "--probability", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("up probability"));
}

#[test]
fn demo_runs() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("2145.482074"))
        .stdout(predicate::str::contains("8570.2885"))
        .stdout(predicate::str::contains("x < 2.275190"));
}

#[test]
fn config_round_trip() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["config", "set", "format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set default_format = json"));
    assert!(config.exists());

    coupon(&config)
        .args(["-f", "minimal", "config", "get", "default_format"])
        .assert()
        .success()
        .stdout("json\n");

    // The stored format applies when --format is not given
    coupon(&config)
        .args(["zero", "--maturity", "20", "--yield", "0.08"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"2145.482074\""));

    coupon(&config)
        .args(["config", "reset", "--all"])
        .assert()
        .success();

    coupon(&config)
        .args(["-f", "minimal", "config", "get", "format"])
        .assert()
        .success()
        .stdout("table\n");
}

#[test]
fn config_controls_decimal_places_and_solver() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["config", "set", "decimal_places", "2"])
        .assert()
        .success();
    coupon(&config)
        .args(["-f", "minimal", "zero", "-m", "20", "-r", "0.08"])
        .assert()
        .success()
        .stdout("2145.48\n");

    coupon(&config)
        .args(["config", "set", "max_iterations", "1"])
        .assert()
        .success();
    coupon(&config)
        .args(["ytm", "--flows", TEN_YEAR_FLOWS, "--price", "100", "--continuous"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no convergence"));
}

#[test]
fn config_rejects_bad_values() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["config", "set", "tolerance", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tolerance"));

    coupon(&config)
        .args(["config", "set", "currency", "USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));

    assert!(!config.exists());
}

#[test]
fn config_path_honours_override() {
    let (_dir, config) = isolated_config();

    coupon(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.to_string_lossy().as_ref()))
        .stdout(predicate::str::contains("not created yet"));
}
