//! Configuration loading.
//!
//! Settings come from an optional `config.toml` and a small set of
//! `TASKAI_*` environment overrides. Every field has a default, so an empty
//! file (or no file) is a valid configuration.

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;

use crate::task::{
    adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiSettings},
    services::TASKS_STORAGE_KEY,
};

/// Overrides the storage directory.
pub const DATA_DIR_ENV: &str = "TASKAI_DATA_DIR";
/// Overrides the suggestion provider.
pub const PROVIDER_ENV: &str = "TASKAI_AI_PROVIDER";
/// Overrides the model name.
pub const MODEL_ENV: &str = "TASKAI_MODEL";

/// File name looked up in the platform configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[source] Box<toml::de::Error>),

    /// The selected provider needs an API key that is not set.
    #[error("environment variable {0} must hold the suggestion service API key")]
    MissingApiKey(String),

    /// The provider name is not recognised.
    #[error("unknown suggestion provider: {0}")]
    UnknownProvider(String),

    /// No storage directory was configured and none could be derived.
    #[error("no data directory configured and no platform default is available")]
    NoDataDir,
}

/// Which suggestion adapter to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// Hosted Gemini model.
    #[default]
    Gemini,
    /// No network; every suggestion list is empty.
    Offline,
}

impl AiProvider {
    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "offline" | "none" => Ok(Self::Offline),
            _ => Err(ConfigError::UnknownProvider(value.to_owned())),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Durable mirror settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Suggestion service settings.
    #[serde(default)]
    pub ai: AiConfig,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the mirror files. Defaults to the platform data
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Utf8PathBuf>,

    /// Mirror key for the task collection.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    TASKS_STORAGE_KEY.to_owned()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_key(),
        }
    }
}

/// `[ai]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Adapter selection.
    #[serde(default)]
    pub provider: AiProvider,

    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Whole-request timeout in seconds. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_owned()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_owned()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "taskai")
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid for the
    /// schema.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(Box::new(err)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(%path, "loaded configuration");
        Ok(config)
    }

    /// Loads `explicit` if given, otherwise the platform config file if it
    /// exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Propagates [`Config::load`] failures for a file that exists.
    pub fn discover(explicit: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Applies `TASKAI_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProvider`] when the provider override is
    /// not recognised.
    pub fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(dir) = present(DATA_DIR_ENV) {
            self.storage.dir = Some(Utf8PathBuf::from(dir));
        }
        if let Some(provider) = present(PROVIDER_ENV) {
            self.ai.provider = provider.parse()?;
        }
        if let Some(model) = present(MODEL_ENV) {
            self.ai.model = model;
        }
        Ok(self)
    }

    /// Returns the directory holding the durable mirror.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] when no directory is configured
    /// and the platform default cannot be determined as UTF-8.
    pub fn data_dir(&self) -> Result<Utf8PathBuf, ConfigError> {
        if let Some(dir) = &self.storage.dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.data_dir().to_path_buf()).ok())
            .ok_or(ConfigError::NoDataDir)
    }

    /// Builds connection settings for the hosted adapter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when the key variable named by
    /// `api_key_env` is unset or blank.
    pub fn gemini_settings(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<GeminiSettings, ConfigError> {
        let api_key = lookup(&self.ai.api_key_env)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(self.ai.api_key_env.clone()))?;
        Ok(GeminiSettings {
            endpoint: self.ai.endpoint.clone(),
            model: self.ai.model.clone(),
            api_key,
            request_timeout: self.ai.request_timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Returns the platform configuration file path, if one can be derived.
#[must_use]
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let dirs = project_dirs()?;
    let dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
    Some(dir.join(CONFIG_FILE_NAME))
}
