use rollwise_core::policy::{Band, BandTable, Preset};
use rollwise_core::{Distance, TargetSet};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_SESSION_ID: &str = "session";
const DEFAULT_TARGETS: [i64; 3] = [6, 7, 8];
const DEFAULT_CSV_TEMPLATE: &str = "out/{session_id}/rolls.csv";
const SESSION_ID_ALLOWED: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root session configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub session_id: String,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::with_session_id(DEFAULT_SESSION_ID)
    }
}

impl SessionConfig {
    /// Defaults for every block, used when no config file is given.
    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            policy: PolicyConfig::default(),
            selection: SelectionConfig::default(),
            outputs: OutputsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SessionConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_session_id(&self.session_id)?;
        self.policy.band_table()?;
        self.selection.validate()?;
        self.outputs.validate(&self.session_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (`{session_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            csv: resolve_template(&self.session_id, &self.outputs.csv),
        }
    }
}

/// Which band table the session classifies with.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PolicyConfig {
    #[serde(default)]
    pub preset: Preset,
    /// Explicit bands; takes precedence over `preset` when present.
    #[serde(default)]
    pub bands: Option<Vec<Band>>,
}

impl PolicyConfig {
    pub fn band_table(&self) -> Result<BandTable, ValidationError> {
        match &self.bands {
            Some(bands) => {
                BandTable::new(bands.clone()).map_err(|err| ValidationError::InvalidField {
                    field: "policy.bands".to_string(),
                    message: err.to_string(),
                })
            }
            None => Ok(BandTable::from_preset(self.preset)),
        }
    }
}

/// Target selection behaviour.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SelectionConfig {
    #[serde(default = "default_targets")]
    pub default_targets: Vec<i64>,
    #[serde(default = "default_clear_after_log")]
    pub clear_after_log: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_targets: default_targets(),
            clear_after_log: default_clear_after_log(),
        }
    }
}

impl SelectionConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for &value in &self.default_targets {
            if Distance::try_from(value).is_err() {
                return Err(ValidationError::InvalidField {
                    field: "selection.default_targets".to_string(),
                    message: format!("{value} is not a two-dice sum (2..=12)"),
                });
            }
        }
        Ok(())
    }

    pub fn target_set(&self) -> TargetSet {
        TargetSet::from_raw(self.default_targets.iter().copied())
    }
}

fn default_targets() -> Vec<i64> {
    DEFAULT_TARGETS.to_vec()
}

fn default_clear_after_log() -> bool {
    true
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    #[serde(default = "default_csv_template")]
    pub csv: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            csv: default_csv_template(),
        }
    }
}

impl OutputsConfig {
    fn validate(&self, session_id: &str) -> Result<(), ValidationError> {
        if self.csv.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "outputs.csv".to_string(),
                message: "path must not be empty".to_string(),
            });
        }

        let resolved = resolve_template(session_id, &self.csv);
        if resolved.file_name().is_none() {
            return Err(ValidationError::InvalidField {
                field: "outputs.csv".to_string(),
                message: "resolved path must name a file".to_string(),
            });
        }
        Ok(())
    }
}

fn default_csv_template() -> String {
    DEFAULT_CSV_TEMPLATE.to_string()
}

/// Logging configuration defaults to human-readable logs on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn validate_session_id(session_id: &str) -> Result<(), ValidationError> {
    if session_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "session_id".to_string(),
            message: "session_id must not be empty".to_string(),
        });
    }

    if !session_id.chars().all(|c| SESSION_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "session_id".to_string(),
            message: "session_id may only contain alphanumeric characters, '.', '_' or '-'"
                .to_string(),
        });
    }

    Ok(())
}

fn resolve_template(session_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{session_id}", session_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub csv: PathBuf,
}

impl ResolvedOutputs {
    /// Directory that holds the CSV and any telemetry file.
    pub fn output_dir(&self) -> PathBuf {
        self.csv
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
