//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use osmhist_core::config::{CliConfigOverrides, StudyConfig};
use std::path::Path;

/// Load the study configuration with environment overrides applied
pub fn load_study_config(path: &Path) -> Result<StudyConfig> {
    let config = StudyConfig::load_from_file(path)
        .with_context(|| format!("Failed to load configuration file {}", path.display()))?;

    Ok(config.load_from_env())
}

/// Load the study configuration with environment and CLI overrides applied
pub fn load_study_config_with_overrides(
    path: &Path,
    overrides: CliConfigOverrides,
) -> Result<StudyConfig> {
    let mut config = load_study_config(path)?;
    config.settings.update_from_cli(overrides);
    Ok(config)
}

/// Log warnings collected while loading the configuration
///
/// Call once the subscriber is installed.
pub fn report_warnings(config: &StudyConfig) {
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }
}
