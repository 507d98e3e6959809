//! Integration tests for the osmhist binary
//!
//! These run the built binary against temporary study directories; none of
//! them reach the network.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CONFIG: &str = "\
year: [2018, 2020]
lulc: \"lulc_esa_{year}.tif\"
lulc_dir: data/lulc
output_dir: data/osm
bbox_1_name: bbox_esa
log_file: logs/run.log
";

fn osmhist(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_osmhist"))
        .current_dir(dir)
        .env_remove("OSMHIST_ENDPOINT")
        .env_remove("OSMHIST_TIMEOUT_SECS")
        .env_remove("OSMHIST_OUTPUT_DIR")
        .env_remove("OSMHIST_LOG_FILE")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn study_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.yaml"), CONFIG).unwrap();
    dir
}

#[test]
fn test_config_json_output_is_valid() {
    let dir = study_dir();

    let output = osmhist(dir.path(), &["--json", "config", "--config", "config.yaml"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    assert_eq!(parsed["status"], "success");
    let rows = parsed["data"].as_array().expect("data should be an array");
    let output_dir = rows.iter().find(|row| row["key"] == "output_dir").unwrap();
    assert_eq!(output_dir["value"], "data/osm");
    assert_eq!(output_dir["source"], "file");
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    let output = osmhist(dir.path(), &["config", "--config", "absent.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.yaml"));
}

#[test]
fn test_fetch_without_rasters_fails_before_querying() {
    let dir = study_dir();

    let output = osmhist(
        dir.path(),
        &["fetch", "--config", "config.yaml", "--endpoint", "http://127.0.0.1:9/unused"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bbox_esa"));

    // output directory is created before rasters are read; no query ran
    let output_dir = dir.path().join("data").join("osm");
    assert!(output_dir.is_dir());
    assert_eq!(fs::read_dir(&output_dir).unwrap().count(), 0);

    let log = fs::read_to_string(dir.path().join("logs").join("run.log")).unwrap();
    assert!(log.lines().any(|line| line.starts_with("Failed to transform")));
    assert!(!log.contains("INFO"));
}
