//! Configuration for the triage pipeline
//!
//! Defaults reproduce the fixed file names the tool has always used in its
//! working directory. A TOML file can override them, located by (first hit
//! wins):
//! 1. `--config` on the command line
//! 2. `EMAIL_TRIAGE_CONFIG` environment variable
//! 3. `./email-triage.toml`
//! 4. `<config dir>/email-triage/config.toml`
//!
//! `EMAIL_TRIAGE_LOG_PATH` overrides the feedback log location afterwards.

use crate::error::{Result, TriageError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_ENV: &str = "EMAIL_TRIAGE_CONFIG";
pub const LOG_PATH_ENV: &str = "EMAIL_TRIAGE_LOG_PATH";
const LOCAL_CONFIG_FILE: &str = "email-triage.toml";

/// Whether the keyword lexicon gates the classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// Emails without a lexicon keyword are offtopic; the model is skipped
    #[default]
    Keyword,
    /// Every non-empty email goes to the model
    Disabled,
}

impl std::fmt::Display for GateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateMode::Keyword => write!(f, "keyword"),
            GateMode::Disabled => write!(f, "disabled"),
        }
    }
}

/// Model artifact locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer: PathBuf,

    #[serde(default = "default_classifier_path")]
    pub classifier: PathBuf,

    /// Only needed when the classifier emits class indices. When unset,
    /// `label_encoder.json` in the working directory is used if present.
    #[serde(default)]
    pub label_decoder: Option<PathBuf>,
}

/// Label decoder picked up from the working directory when none is configured
pub const DEFAULT_LABEL_DECODER: &str = "label_encoder.json";

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("tfidf_vectorizer.json")
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("logreg_model.json")
}

impl ModelConfig {
    /// Label decoder to load: the configured one, else the default file if it exists
    pub fn decoder_path(&self) -> Option<PathBuf> {
        match self.label_decoder {
            Some(ref path) => Some(path.clone()),
            None => Some(PathBuf::from(DEFAULT_LABEL_DECODER)).filter(|p| p.exists()),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vectorizer: default_vectorizer_path(),
            classifier: default_classifier_path(),
            label_decoder: None,
        }
    }
}

/// Feedback log settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackConfig {
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("feedback_log.csv")
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TriageConfig {
    #[serde(default)]
    pub gate: GateMode,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,
}

impl TriageConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TriageError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: TriageConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Locate and load configuration, falling back to defaults
    pub fn resolve(cli_path: Option<PathBuf>) -> Result<Self> {
        let mut config = match find_config_file(cli_path)? {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        if let Ok(log_path) = std::env::var(LOG_PATH_ENV) {
            if !log_path.is_empty() {
                debug!("Feedback log path overridden by {}", LOG_PATH_ENV);
                config.feedback.log_path = PathBuf::from(log_path);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        check_path("model.vectorizer", &self.model.vectorizer)?;
        check_path("model.classifier", &self.model.classifier)?;
        if let Some(ref decoder) = self.model.label_decoder {
            check_path("model.label_decoder", decoder)?;
        }
        check_path("feedback.log_path", &self.feedback.log_path)?;

        if self.model.vectorizer == self.model.classifier {
            return Err(TriageError::Config(
                "model.vectorizer and model.classifier must be different files".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_path(name: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(TriageError::Config(format!("{} must not be empty", name)));
    }
    Ok(())
}

/// Find the configuration file from CLI arg, env var, working dir, or user config dir
fn find_config_file(cli_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    // Explicit locations must exist
    if let Some(path) = cli_path.or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }) {
        if !path.exists() {
            return Err(TriageError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join("email-triage").join("config.toml"))
        .filter(|path| path.exists()))
}
