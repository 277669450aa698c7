//! End-to-end tests for the `kinesim` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kinesim() -> Command {
    let mut cmd = Command::cargo_bin("kinesim").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("KINESIM_CONFIG");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn run_free_fall_to_landing() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "fall.json",
        r#"{ "subtype": "free_fall", "parameters": { "h0": 20 } }"#,
    );

    kinesim()
        .arg("run")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("state=ended"))
        .stdout(predicate::str::contains("ended: analytic"))
        .stdout(predicate::str::contains("y=0.000m"));
}

#[test]
fn run_json_readout_parses() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "throw.json",
        r#"{ "type": "projectile", "initial_speed": 10, "angle": 0, "initial_y": 8 }"#,
    );

    let output = kinesim()
        .args(["run", "--json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let readout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(readout["subtype"], "projectile_motion");
    assert_eq!(readout["end_reason"], "analytic");
    let range = readout["projectile"]["range"].as_f64().unwrap();
    assert!((range - 12.778).abs() < 1e-3);
}

#[test]
fn run_every_prints_periodic_lines() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "ua.json",
        r#"{ "subtype": "uniform_acceleration", "parameters": { "duration": 1 } }"#,
    );

    let output = kinesim()
        .args(["run", "--every", "20"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // 60 ticks at 60 fps: readouts at ticks 20, 40 and 60, plus the final one.
    assert_eq!(stdout.lines().filter(|l| l.starts_with("t=")).count(), 4);
}

#[test]
fn run_step_window_pauses() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "steps.json",
        r#"{
            "subtype": "projectile_motion",
            "parameters": {},
            "solution_steps": [
                "Decompose the launch velocity",
                { "title": "Climb", "animation_time": [0.5, 1.0] }
            ]
        }"#,
    );

    kinesim()
        .args(["run", "--step", "1"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("t=1.000s state=paused"));

    kinesim()
        .args(["run", "--step", "0"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no animation window"));
}

#[test]
fn run_exports_ppm_frame() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "circle.json", r#"{ "subtype": "uniform_circular", "parameters": {} }"#);
    let frame = dir.path().join("last.ppm");

    kinesim()
        .args(["run", "--width", "200", "--height", "150", "--max-seconds", "0.5"])
        .arg(&file)
        .arg("--export")
        .arg(&frame)
        .assert()
        .success();

    let bytes = fs::read(&frame).unwrap();
    assert!(bytes.starts_with(b"P6\n200 150\n255\n"));
}

#[test]
fn run_with_config_file() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "fall.json", r#"{ "subtype": "free_fall", "parameters": {} }"#);
    let config = write(&dir, "kinesim.toml", "[run]\nmax_seconds = 0.25\n");

    kinesim()
        .arg("run")
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("state=playing"));
}

#[test]
fn unknown_subtype_warns_and_falls_back() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "odd.json", r#"{ "subtype": "pendulum", "parameters": {} }"#);

    kinesim()
        .arg("run")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: unknown motion subtype `pendulum`"))
        .stdout(predicate::str::contains("range="));
}

#[test]
fn invalid_parameters_fail() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "bad.json",
        r#"{ "subtype": "uniform_circular", "parameters": { "radius": -1 } }"#,
    );

    kinesim()
        .arg("run")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("radius"));
}

#[test]
fn null_payload_has_no_animation() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "null.json", "null");

    kinesim()
        .arg("normalize")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no animation available"));
}

#[test]
fn normalize_legacy_payload() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "legacy.json",
        r#"{ "animation": { "type": "free_fall", "initial_y": 12, "bounce": true } }"#,
    );

    let output = kinesim().arg("normalize").arg(&file).output().unwrap();
    assert!(output.status.success());
    let desc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(desc["subtype"], "free_fall");
    assert_eq!(desc["parameters"]["h0"], 12.0);
    assert_eq!(desc["parameters"]["bounce"], true);
}

#[test]
fn summary_reports_analytic_facts() {
    let dir = TempDir::new().unwrap();
    let file = write(
        &dir,
        "ua.json",
        r#"{ "subtype": "uniform_acceleration", "parameters": { "F": 10, "mu": 0.2, "mass": 2 } }"#,
    );

    let output = kinesim().arg("summary").arg(&file).output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["subtype"], "uniform_acceleration");
    let a = report["facts"]["acceleration"].as_f64().unwrap();
    assert!((a - 3.04).abs() < 1e-9);
    assert!(report["predicted_extent"].is_null());
}

#[test]
fn missing_file_reports_path() {
    kinesim()
        .args(["run", "/nonexistent/problem.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/problem.json"));
}
