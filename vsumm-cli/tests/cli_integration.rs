use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// Helper function to get the path to the compiled binary
fn vsumm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vsumm").expect("Failed to find vsumm binary");
    for var in ["VSUMM_OBJECTIVE", "VSUMM_CONFIG", "VSUMM_SEED", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Five feature vectors: two near-duplicate pairs and one outlier, matching a
/// 10 second video cut into 2 second snippets.
fn write_features(dir: &TempDir) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.path().join("features.json");
    std::fs::write(
        &path,
        "[[1.0, 0.0, 0.0], [0.95, 0.05, 0.0], [0.0, 1.0, 0.0], [0.05, 0.95, 0.0], [0.0, 0.0, 1.0]]",
    )?;
    Ok(path)
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_summarize_budget_prints_table() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let features = write_features(&dir)?;

    vsumm_cmd()
        .arg("summarize")
        .arg("--features")
        .arg(path_arg(&features))
        .args(["--duration", "10", "--snippet-length", "2"])
        .args(["--objective", "facility_location", "--budget", "6"])
        .assert()
        .success()
        .stdout(contains("Video Summary"))
        .stdout(contains("3 of 5"))
        .stdout(contains("facility_location"));

    Ok(())
}

#[test]
fn test_summarize_json_output_to_stdout_and_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let features = write_features(&dir)?;
    let output_file = dir.path().join("summary.json");

    let assert = vsumm_cmd()
        .arg("summarize")
        .arg("-f")
        .arg(path_arg(&features))
        .args(["-d", "00:00:10", "--coverage", "1.0", "--json"])
        .args(["--objective", "saturate_coverage"])
        .arg("--output")
        .arg(path_arg(&output_file))
        .assert()
        .success();

    let stdout: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(stdout["objective"], "saturate_coverage");
    assert_eq!(stdout["mode"]["type"], "coverage");

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output_file)?)?;
    assert_eq!(written["selection"], stdout["selection"]);

    Ok(())
}

#[test]
fn test_summarize_stream_keeps_endpoints() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let features = write_features(&dir)?;

    let assert = vsumm_cmd()
        .arg("summarize")
        .arg("-f")
        .arg(path_arg(&features))
        .args(["-d", "10", "--stream", "0.9", "--json"])
        .assert()
        .success();

    let summary: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    let segments = summary["segments"].as_array().unwrap();
    assert_eq!(segments.first().unwrap()["index"], 0);
    assert_eq!(segments.last().unwrap()["index"], 4);
    assert_eq!(summary["stream_decisions"].as_array().unwrap().len(), 5);

    Ok(())
}

#[test]
fn test_objective_from_environment() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let features = write_features(&dir)?;

    let assert = vsumm_cmd()
        .env("VSUMM_OBJECTIVE", "graph-cut")
        .arg("summarize")
        .arg("-f")
        .arg(path_arg(&features))
        .args(["-d", "10", "-b", "4", "--json"])
        .assert()
        .success();

    let summary: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(summary["objective"], "graph_cut");

    Ok(())
}

#[test]
fn test_coverage_with_non_monotone_objective_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let features = write_features(&dir)?;

    vsumm_cmd()
        .arg("summarize")
        .arg("-f")
        .arg(path_arg(&features))
        .args(["-d", "10", "--objective", "disparity_min", "--coverage", "0.5"])
        .assert()
        .code(1)
        .stderr(contains("not supported"));

    Ok(())
}

#[test]
fn test_coverage_over_negative_cosine_kernel_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let features = dir.path().join("opposed.json");
    std::fs::write(
        &features,
        "[[1.0, 0.0], [-1.0, 0.2], [0.0, 1.0], [0.3, -1.0], [-0.5, -0.5]]",
    )?;

    vsumm_cmd()
        .arg("summarize")
        .arg("-f")
        .arg(path_arg(&features))
        .args(["-d", "10", "--objective", "saturate_coverage", "--coverage", "1.0"])
        .assert()
        .code(1)
        .stderr(contains("not supported"))
        .stderr(contains("non-negative kernel"));

    // the gaussian kernel is positive everywhere
    vsumm_cmd()
        .arg("summarize")
        .arg("-f")
        .arg(path_arg(&features))
        .args(["-d", "10", "--objective", "saturate_coverage", "--coverage", "1.0"])
        .args(["--similarity", "gaussian", "--json"])
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_feature_count_mismatch_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let features = write_features(&dir)?;

    vsumm_cmd()
        .arg("summarize")
        .arg("-f")
        .arg(path_arg(&features))
        .args(["-d", "20", "--budget", "4"])
        .assert()
        .failure()
        .stderr(contains("10 segments"));

    Ok(())
}

#[test]
fn test_missing_features_file_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let missing = dir.path().join("nope.json");

    vsumm_cmd()
        .arg("summarize")
        .arg("-f")
        .arg(path_arg(&missing))
        .args(["-d", "10", "--budget", "4"])
        .assert()
        .failure()
        .stderr(contains("Failed to load features"));

    Ok(())
}

#[test]
fn test_segments_from_shot_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let shots = dir.path().join("shots.json");
    std::fs::write(&shots, "[0.0, 3.0, 4.0]")?;

    vsumm_cmd()
        .arg("segments")
        .args(["-d", "6", "--shots"])
        .arg(path_arg(&shots))
        .assert()
        .success()
        .stdout(contains("00:00:03.000 - 00:00:04.000"))
        .stdout(contains("0.500"));

    Ok(())
}

#[test]
fn test_zero_snippet_length_is_rejected() -> Result<(), Box<dyn Error>> {
    vsumm_cmd()
        .arg("segments")
        .args(["-d", "6", "--snippet-length", "0"])
        .assert()
        .failure()
        .stderr(contains("snippet length must be positive"));

    Ok(())
}

#[test]
fn test_kernel_stats() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let features = write_features(&dir)?;

    vsumm_cmd()
        .arg("kernel")
        .arg("-f")
        .arg(path_arg(&features))
        .args(["--similarity", "gaussian", "--sigma", "0.5"])
        .assert()
        .success()
        .stdout(contains("5x5"))
        .stdout(contains("Symmetric"));

    Ok(())
}

#[test]
fn test_missing_mode_is_a_usage_error() -> Result<(), Box<dyn Error>> {
    vsumm_cmd()
        .args(["summarize", "-f", "features.json", "-d", "10"])
        .assert()
        .failure();

    Ok(())
}
