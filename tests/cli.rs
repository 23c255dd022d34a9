use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/sample.json");

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("heatmap"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn render_from_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.html");
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.args(["render", "--input", SAMPLE, "--out"]).arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote heat map"));
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"id="tooltip""#));
}

#[test]
fn stats_prints_summary() {
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.args(["stats", "--input", SAMPLE]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("records=48"))
        .stdout(predicate::str::contains("years=1908-1911"));
}

#[test]
fn load_failure_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.svg");
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.args(["render", "--input"])
        .arg(dir.path().join("missing.json"))
        .arg("--out")
        .arg(&out);
    cmd.assert().failure();
    assert!(!out.exists());
}

#[test]
fn url_and_input_conflict() {
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.args([
        "stats",
        "--input",
        SAMPLE,
        "--url",
        "http://localhost/none.json",
    ]);
    cmd.assert().failure();
}

#[test]
fn width_must_be_positive_and_finite() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.svg");
    for width in ["--width=-500", "--width=NaN", "--width=0", "--width=1e9"] {
        let mut cmd = Command::cargo_bin("heatmap").unwrap();
        cmd.args(["render", "--input", SAMPLE, width, "--out"]).arg(&out);
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("--width"));
        assert!(!out.exists());
    }
}

#[test]
fn layout_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let layout = dir.path().join("layout.json");
    std::fs::write(&layout, r#"{"width": 480, "height": 240, "font_px": 12}"#).unwrap();
    let out = dir.path().join("map.svg");
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.args(["render", "--input", SAMPLE, "--layout"])
        .arg(&layout)
        .arg("--out")
        .arg(&out);
    cmd.assert().success();
    let doc = std::fs::read_to_string(&out).unwrap();
    // canvas = 480 + left 60 + right 20
    assert!(doc.contains(r#"width="560""#), "{doc}");
}

#[test]
fn invalid_layout_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let layout = dir.path().join("layout.json");
    std::fs::write(&layout, r#"{"margin": {"top": -5, "right": 0, "bottom": 0, "left": 0}}"#).unwrap();
    let out = dir.path().join("map.svg");
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.args(["render", "--input", SAMPLE, "--layout"])
        .arg(&layout)
        .arg("--out")
        .arg(&out);
    cmd.env_remove("RUST_LOG")
        .assert()
        .failure()
        .stderr(predicate::str::contains("margin.top"));
    assert!(!out.exists());
}

#[test]
fn stats_as_json() {
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.args(["stats", "--json", "--input", SAMPLE]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(v["records"], 48);
    assert_eq!(v["first_year"], 1908);
    assert_eq!(v["last_year"], 1911);
}

#[test]
fn failure_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.env_remove("RUST_LOG")
        .args(["stats", "--input"])
        .arg(dir.path().join("missing.json"));
    let output = cmd.assert().failure().code(1).get_output().stderr.clone();
    let stderr = String::from_utf8_lossy(&output);
    assert_eq!(stderr.matches("missing.json").count(), 1, "{stderr}");
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn render_online_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.svg");
    let mut cmd = Command::cargo_bin("heatmap").unwrap();
    cmd.args(["render", "--stats", "--out"]).arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("years=1753-2015"));
    assert!(out.exists());
}
