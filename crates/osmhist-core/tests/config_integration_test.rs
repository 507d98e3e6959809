//! Integration tests for study configuration loading
//!
//! Runtime settings follow the precedence
//! CLI arguments > Environment variables > Config file > Defaults

use osmhist_core::config::{CliConfigOverrides, ConfigSource, ConfigWarning, StudyConfig};
use osmhist_core::OsmhistError;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
year:
  - 2012
  - 2017
  - 2022
lulc:
  - "lulc_esa_{year}.tif"
  - "lulc_cat_{year}.tif"
lulc_dir: data/input/lulc
impedance_dir: data/input/impedance
vector_dir: data/input/vector
output_dir: data/output/ohsome
bbox_1_name: "UK, ESA"
bbox_2_name: "Catalonia"
ohsome:
  timeout_secs: 120
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn clear_env() {
    for key in ["OSMHIST_ENDPOINT", "OSMHIST_TIMEOUT_SECS", "OSMHIST_OUTPUT_DIR", "OSMHIST_LOG_FILE"] {
        env::remove_var(key);
    }
}

#[test]
fn test_load_from_file() {
    let file = write_config(CONFIG);
    let config = StudyConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.years.len(), 3);
    assert_eq!(config.raster_combinations().len(), 6);
    assert_eq!(config.impedance_dir, Some(PathBuf::from("data/input/impedance")));
    assert_eq!(config.vector_dir, Some(PathBuf::from("data/input/vector")));
    assert_eq!(config.settings.timeout_secs.value, 120);
    assert_eq!(config.settings.timeout_secs.source, ConfigSource::File);
    assert!(config.warnings.is_empty());
}

#[test]
fn test_unreadable_file_is_config_error() {
    let err = StudyConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, OsmhistError::ConfigInvalid { .. }));
}

#[test]
fn test_malformed_yaml_is_config_error() {
    let file = write_config("year: [2012\nlulc: ");
    let err = StudyConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, OsmhistError::ConfigInvalid { .. }));
}

#[test]
fn test_missing_lulc_only_warns() {
    let file = write_config("year: 2012\nlulc_dir: l\noutput_dir: o\nbbox_1_name: A\n");
    let config = StudyConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.warnings, vec![ConfigWarning::MissingLulc]);
    assert!(config.raster_combinations().is_empty());
    assert_eq!(config.timestamps().len(), 1);
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    env::set_var("OSMHIST_TIMEOUT_SECS", "30");
    env::set_var("OSMHIST_OUTPUT_DIR", "/tmp/osmhist-env");

    let file = write_config(CONFIG);
    let config = StudyConfig::load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.settings.timeout_secs.value, 30);
    assert_eq!(config.settings.timeout_secs.source, ConfigSource::Environment);
    assert_eq!(config.output_dir(), PathBuf::from("/tmp/osmhist-env").as_path());
    assert_eq!(config.settings.endpoint.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_value_is_ignored() {
    clear_env();
    env::set_var("OSMHIST_TIMEOUT_SECS", "ten minutes");

    let file = write_config(CONFIG);
    let config = StudyConfig::load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.settings.timeout_secs.value, 120);
    assert_eq!(config.settings.timeout_secs.source, ConfigSource::File);
    assert_eq!(
        config.warnings,
        vec![ConfigWarning::InvalidEnvironment {
            var: "OSMHIST_TIMEOUT_SECS",
            value: "ten minutes".to_string(),
        }]
    );
    assert!(config.warnings[0].to_string().contains("ten minutes"));

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("OSMHIST_ENDPOINT", "http://env.example/geometry");

    let file = write_config(CONFIG);
    let mut config = StudyConfig::load_from_file(file.path()).unwrap().load_from_env();
    config.settings.update_from_cli(CliConfigOverrides {
        endpoint: Some("http://cli.example/geometry".to_string()),
        ..Default::default()
    });

    assert_eq!(config.settings.endpoint.value, "http://cli.example/geometry");
    assert_eq!(config.settings.endpoint.source, ConfigSource::Cli);

    clear_env();
}
