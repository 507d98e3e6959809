use crate::builder::year_end;
use crate::error::{OsmhistError, Result};
use crate::models::{NamingRule, NamingRules, QuerySettings, RasterCombination};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// ohsome elements/geometry endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.ohsome.org/v1/elements/geometry";

/// Response timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

pub const DEFAULT_LOG_FILE: &str = "logs/ohsome.log";

/// Marker that selects `bbox_1_name` when no explicit rules are configured
pub const DEFAULT_NAMING_MARKER: &str = "_esa";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSource::Default => "default",
            ConfigSource::File => "file",
            ConfigSource::Environment => "environment",
            ConfigSource::Cli => "cli",
        };
        f.write_str(label)
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Runtime settings that may be overridden by environment and CLI
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub endpoint: ConfigValue<String>,
    pub timeout_secs: ConfigValue<u64>,
    pub output_dir: ConfigValue<PathBuf>,
    pub log_file: ConfigValue<PathBuf>,
}

impl RuntimeSettings {
    /// Create settings with default values
    pub fn with_defaults() -> Self {
        Self {
            endpoint: ConfigValue::new(DEFAULT_ENDPOINT.to_string(), ConfigSource::Default),
            timeout_secs: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
            output_dir: ConfigValue::new(PathBuf::from("output"), ConfigSource::Default),
            log_file: ConfigValue::new(PathBuf::from(DEFAULT_LOG_FILE), ConfigSource::Default),
        }
    }

    /// Load settings from environment variables
    ///
    /// Unparseable values are skipped and reported through `warnings`.
    pub fn load_from_env(mut self, warnings: &mut Vec<ConfigWarning>) -> Self {
        // OSMHIST_ENDPOINT
        if let Ok(endpoint) = env::var("OSMHIST_ENDPOINT") {
            self.endpoint.update(endpoint, ConfigSource::Environment);
        }

        // OSMHIST_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("OSMHIST_TIMEOUT_SECS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => self.timeout_secs.update(timeout, ConfigSource::Environment),
                Err(_) => warnings.push(ConfigWarning::InvalidEnvironment {
                    var: "OSMHIST_TIMEOUT_SECS",
                    value: timeout_str,
                }),
            }
        }

        // OSMHIST_OUTPUT_DIR
        if let Ok(output_dir) = env::var("OSMHIST_OUTPUT_DIR") {
            self.output_dir.update(PathBuf::from(output_dir), ConfigSource::Environment);
        }

        // OSMHIST_LOG_FILE
        if let Ok(log_file) = env::var("OSMHIST_LOG_FILE") {
            self.log_file.update(PathBuf::from(log_file), ConfigSource::Environment);
        }

        self
    }

    /// Update settings from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint.update(endpoint, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs.update(timeout, ConfigSource::Cli);
        }

        if let Some(output_dir) = overrides.output_dir {
            self.output_dir.update(output_dir, ConfigSource::Cli);
        }

        if let Some(log_file) = overrides.log_file {
            self.log_file.update(log_file, ConfigSource::Cli);
        }
    }

    /// Get all settings as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("endpoint".to_string(), (self.endpoint.value.clone(), self.endpoint.source));
        map.insert(
            "timeout_secs".to_string(),
            (self.timeout_secs.value.to_string(), self.timeout_secs.source),
        );
        map.insert(
            "output_dir".to_string(),
            (self.output_dir.value.display().to_string(), self.output_dir.source),
        );
        map.insert(
            "log_file".to_string(),
            (self.log_file.value.display().to_string(), self.log_file.source),
        );

        map
    }
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// Non-fatal configuration defects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    MissingYear,
    NullYear,
    MissingLulc,
    NullLulc,
    /// Environment override that could not be parsed and was ignored
    InvalidEnvironment { var: &'static str, value: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ConfigWarning::MissingYear => "Year variable is not found in the configuration file",
            ConfigWarning::NullYear => "Year variable contains a null entry",
            ConfigWarning::MissingLulc => "LULC template is not found in the configuration file",
            ConfigWarning::NullLulc => "LULC template list contains a null entry",
            ConfigWarning::InvalidEnvironment { var, value } => {
                return write!(f, "Invalid {} value '{}' is ignored", var, value);
            }
        };
        f.write_str(message)
    }
}

/// Study configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub years: Vec<Option<i32>>,
    pub lulc: Vec<Option<String>>,
    pub lulc_dir: PathBuf,
    pub impedance_dir: Option<PathBuf>,
    pub vector_dir: Option<PathBuf>,
    pub bbox_1_name: String,
    pub bbox_2_name: Option<String>,
    pub naming: NamingRules,
    pub query: QuerySettings,
    pub settings: RuntimeSettings,
    pub warnings: Vec<ConfigWarning>,
}

impl StudyConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| OsmhistError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file {}: {}", path.as_ref().display(), e),
            })?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file_config: FileConfig =
            serde_yaml::from_str(content).map_err(|e| OsmhistError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse YAML: {}", e),
            })?;

        Self::from_file_config(file_config)
    }

    fn from_file_config(file: FileConfig) -> Result<Self> {
        let mut warnings = Vec::new();

        let years = normalize_list(
            file.year,
            ConfigWarning::MissingYear,
            ConfigWarning::NullYear,
            &mut warnings,
        );
        let lulc = normalize_list(
            file.lulc,
            ConfigWarning::MissingLulc,
            ConfigWarning::NullLulc,
            &mut warnings,
        );

        let lulc_dir = file.lulc_dir.ok_or_else(|| missing("lulc_dir"))?;
        let output_dir = file.output_dir.ok_or_else(|| missing("output_dir"))?;
        let bbox_1_name = file.bbox_1_name.ok_or_else(|| missing("bbox_1_name"))?;

        let naming = match file.bbox_rules {
            Some(rules) => {
                let fallback = file.bbox_fallback.or_else(|| file.bbox_2_name.clone());
                NamingRules::new(rules, fallback)
            }
            None => NamingRules::new(
                vec![NamingRule::new(DEFAULT_NAMING_MARKER, bbox_1_name.clone())],
                file.bbox_fallback.or_else(|| file.bbox_2_name.clone()),
            ),
        };

        if let Some(rule) = naming.rules.iter().find(|r| r.marker.is_empty()) {
            return Err(OsmhistError::ConfigInvalid {
                key: "bbox_rules".to_string(),
                reason: format!("Rule for '{}' has an empty marker", rule.name),
            });
        }

        let mut settings = RuntimeSettings::with_defaults();
        settings.output_dir.update(output_dir, ConfigSource::File);
        if let Some(log_file) = file.log_file {
            settings.log_file.update(log_file, ConfigSource::File);
        }
        if let Some(ohsome) = file.ohsome {
            if let Some(endpoint) = ohsome.endpoint {
                settings.endpoint.update(endpoint, ConfigSource::File);
            }
            if let Some(timeout) = ohsome.timeout_secs {
                settings.timeout_secs.update(timeout, ConfigSource::File);
            }
        }

        Ok(Self {
            years,
            lulc,
            lulc_dir,
            impedance_dir: file.impedance_dir,
            vector_dir: file.vector_dir,
            bbox_1_name,
            bbox_2_name: file.bbox_2_name,
            naming,
            query: file.query.unwrap_or_default(),
            settings,
            warnings,
        })
    }

    /// Apply environment overrides to the runtime settings
    ///
    /// Rejected values are appended to `warnings`.
    pub fn load_from_env(mut self) -> Self {
        self.settings = self.settings.load_from_env(&mut self.warnings);
        self
    }

    /// Every template × year pair, template-major
    pub fn raster_combinations(&self) -> Vec<RasterCombination> {
        RasterCombination::product(&self.lulc, &self.years)
    }

    /// December 31 of every configured year, nulls skipped
    pub fn timestamps(&self) -> Vec<NaiveDate> {
        self.years
            .iter()
            .flatten()
            .filter_map(|year| {
                let date = year_end(*year);
                if date.is_none() {
                    tracing::warn!("Year {} is out of range and is skipped", year);
                }
                date
            })
            .collect()
    }

    /// Registry entry the queries run against
    pub fn selected_bbox_name(&self) -> &str {
        self.query.bbox.as_deref().unwrap_or(&self.bbox_1_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.settings.output_dir.value
    }
}

fn missing(key: &str) -> OsmhistError {
    OsmhistError::ConfigMissing { key: key.to_string() }
}

fn normalize_list<T>(
    value: Option<OneOrMany<Option<T>>>,
    missing: ConfigWarning,
    null_entry: ConfigWarning,
    warnings: &mut Vec<ConfigWarning>,
) -> Vec<Option<T>> {
    let list = match value {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    };

    if list.is_empty() {
        warnings.push(missing);
    } else if list.iter().any(Option::is_none) {
        warnings.push(null_entry);
    }

    list
}

/// Scalar or list value in the YAML file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Configuration loaded from YAML file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    year: Option<OneOrMany<Option<i32>>>,
    lulc: Option<OneOrMany<Option<String>>>,
    lulc_dir: Option<PathBuf>,
    impedance_dir: Option<PathBuf>,
    vector_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    bbox_1_name: Option<String>,
    bbox_2_name: Option<String>,
    bbox_rules: Option<Vec<NamingRule>>,
    bbox_fallback: Option<String>,
    query: Option<QuerySettings>,
    ohsome: Option<FileOhsomeConfig>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct FileOhsomeConfig {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}
