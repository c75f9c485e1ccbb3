//! End-to-end tests of the boomsim binary.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use boomsim_driver::{SensorId, SensorStore, SensorTable};
use predicates::prelude::*;
use tempfile::TempDir;

fn boomsim(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("boomsim").unwrap();
    cmd.arg("--no-color")
        .arg("--project")
        .arg(project)
        .env_remove("RUST_LOG");
    cmd
}

/// Sensors of a single-arm rigid run with `steps` rows.
fn write_sensors(path: &Path, steps: usize, pressure: f64) {
    let time: Vec<f64> = (1..=steps).map(|i| i as f64).collect();
    let stroke: Vec<f64> = (0..steps).map(|i| i as f64 * 0.01).collect();
    let p1 = vec![pressure; steps];
    let p2 = vec![1e6; steps];
    let zeros = vec![0.0; steps];
    let angle = vec![0.5; steps];

    let table = |columns: &[&[f64]]| SensorTable::from_columns(&time, columns).unwrap();

    SensorStore::new()
        .with_table(SensorId::Distance, table(&[stroke.as_slice()]))
        .with_table(SensorId::Velocity, table(&[zeros.as_slice()]))
        .with_table(SensorId::Pressures, table(&[p1.as_slice(), p2.as_slice()]))
        .with_table(SensorId::Angle, table(&[zeros.as_slice(), zeros.as_slice(), angle.as_slice()]))
        .save_json(path)
        .unwrap();
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("boomsim")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("layout"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn layout_shows_reserved_block() {
    let temp = TempDir::new().unwrap();
    boomsim(temp.path())
        .args(["layout", "--mode", "dual-arm", "--variant", "flexible", "--steps", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(reserved)"))
        .stdout(predicate::str::contains("theta2"))
        .stdout(predicate::str::contains("input buffer (24 cells)"))
        .stdout(predicate::str::contains("output buffer (48 cells)"));
}

#[test]
fn input_writes_buffer() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("input.json");

    boomsim(temp.path())
        .args(["input", "--steps", "4", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote input buffer"));

    let buffer: Vec<f64> = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(buffer.len(), 9);
    // Default duty cycle sampled at 4, 8, 12 and 16 s.
    assert_eq!(&buffer[0..4], &[10.0, 0.0, -10.0, 0.0]);
    assert!(buffer[4..8].iter().all(|&p| p == 1e7));
    assert!((buffer[8] - 14.6_f64.to_radians()).abs() < 1e-15);
}

#[test]
fn project_config_is_used() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("boomsim.toml"),
        "[run]\nmode = \"dual-arm\"\nsteps = 2\n",
    )
    .unwrap();

    boomsim(temp.path())
        .arg("layout")
        .assert()
        .success()
        .stdout(predicate::str::contains("input buffer (12 cells)"));
}

#[test]
fn command_line_overrides_are_validated_with_the_project_config() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("boomsim.toml"), "[run]\nsteps = 0\n").unwrap();

    boomsim(temp.path())
        .arg("layout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one step"));

    boomsim(temp.path())
        .args(["layout", "--steps", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("input buffer (9 cells)"));
}

#[test]
fn run_inspect_and_compare() {
    let temp = TempDir::new().unwrap();
    let project = temp.path();
    let sensors_a = project.join("a.json");
    let sensors_b = project.join("b.json");
    let artifact_a = project.join("runs/a.json");
    let artifact_b = project.join("runs/b.json");
    write_sensors(&sensors_a, 4, 2e6);
    write_sensors(&sensors_b, 4, 3e6);

    for (sensors, artifact) in [(&sensors_a, &artifact_a), (&sensors_b, &artifact_b)] {
        boomsim(project)
            .args(["run", "--steps", "4", "--sensors"])
            .arg(sensors)
            .arg("--out")
            .arg(artifact)
            .assert()
            .success()
            .stdout(predicate::str::contains("Run complete"))
            .stdout(predicate::str::contains("total work"));
        assert!(artifact.exists());
    }

    boomsim(project)
        .arg("inspect")
        .arg(&artifact_a)
        .assert()
        .success()
        .stdout(predicate::str::contains("angleDeg"))
        .stdout(predicate::str::contains("28.6479"));

    boomsim(project)
        .arg("inspect")
        .arg(&artifact_a)
        .args(["--channel", "E", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 of 4 steps shown)"));

    boomsim(project)
        .arg("compare")
        .arg(&artifact_a)
        .arg(&artifact_b)
        .assert()
        .success()
        .stdout(predicate::str::contains("final energy delta"));
}

#[test]
fn single_step_series_keep_their_time_axis() {
    let temp = TempDir::new().unwrap();
    let project = temp.path();
    let sensors = project.join("sensors.json");
    let artifact = project.join("one.json");
    write_sensors(&sensors, 1, 2e6);

    boomsim(project)
        .args(["run", "--steps", "1", "--sensors"])
        .arg(&sensors)
        .arg("--out")
        .arg(&artifact)
        .assert()
        .success();

    boomsim(project)
        .arg("inspect")
        .arg(&artifact)
        .args(["--channel", "s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("16.0000"));

    boomsim(project)
        .arg("inspect")
        .arg(&artifact)
        .args(["--channel", "theta1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.2548"))
        .stdout(predicate::str::contains("16.0000").not());
}

#[test]
fn run_defaults_to_output_directory() {
    let temp = TempDir::new().unwrap();
    let project = temp.path();
    let sensors = project.join("sensors.json");
    write_sensors(&sensors, 3, 2e6);

    boomsim(project)
        .args(["run", "--steps", "3", "--sensors"])
        .arg(&sensors)
        .assert()
        .success();

    assert!(
        project
            .join("solution/OneArm/16-rigid-default-s3Steps200Load.json")
            .exists()
    );
}

#[test]
fn short_sensor_store_fails() {
    let temp = TempDir::new().unwrap();
    let sensors = temp.path().join("sensors.json");
    write_sensors(&sensors, 2, 2e6);

    boomsim(temp.path())
        .args(["run", "--steps", "4", "--sensors"])
        .arg(&sensors)
        .assert()
        .failure()
        .stderr(predicate::str::contains("recorded 2 rows, run has 4 steps"));
}

#[test]
fn optimised_dual_arm_is_rejected() {
    let temp = TempDir::new().unwrap();
    boomsim(temp.path())
        .args(["layout", "--mode", "dual-arm", "--variant", "rigid-optimised"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single-arm"));
}

#[test]
fn inspect_missing_artifact_fails() {
    let temp = TempDir::new().unwrap();
    boomsim(temp.path())
        .args(["inspect", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load artifact"));
}
