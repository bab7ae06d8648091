//! Client configuration.
//!
//! Settings come from, in order of precedence:
//! - command-line flags,
//! - `RAVENPAIR_*` environment variables (handled by clap),
//! - the TOML config file (`$HOME/.ravenpair.toml` unless `--config` is given),
//! - built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::CliError;

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// Config file name looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".ravenpair.toml";

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    /// Server base URL.
    pub server: Option<String>,
    /// Authentication token.
    pub token: Option<String>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CliError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("invalid TOML: {e}")))
    }
}

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Server base URL.
    pub server: String,
    /// Authentication token, if any.
    pub token: Option<String>,
    /// Config file that contributed to these settings.
    pub config_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.into(),
            token: None,
            config_file: None,
        }
    }
}

impl Settings {
    /// Resolve settings from flag/env values and the config file.
    ///
    /// An explicitly requested config file must exist; the default one is
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or if
    /// the resulting server URL is empty.
    pub fn load(
        server: Option<&str>,
        token: Option<&str>,
        config_path: Option<&Path>,
    ) -> Result<Self, CliError> {
        let (file, config_file) = match config_path {
            Some(path) => (FileConfig::from_file(path)?, Some(path.to_path_buf())),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => (FileConfig::from_file(&path)?, Some(path)),
                None => (FileConfig::default(), None),
            },
        };

        if let Some(path) = &config_file {
            debug!(path = %path.display(), "Loaded config file");
        }

        let settings = Self::merge(server, token, file).with_config_file(config_file);
        settings.validate()?;
        Ok(settings)
    }

    /// Merge flag/env values over file values over defaults.
    ///
    /// Empty tokens count as unset.
    #[must_use]
    pub fn merge(server: Option<&str>, token: Option<&str>, file: FileConfig) -> Self {
        let server = server
            .map(str::to_string)
            .or(file.server)
            .unwrap_or_else(|| DEFAULT_SERVER.into());
        let token = token
            .map(str::to_string)
            .or(file.token)
            .filter(|t| !t.is_empty());

        Self {
            server,
            token,
            config_file: None,
        }
    }

    fn with_config_file(mut self, config_file: Option<PathBuf>) -> Self {
        self.config_file = config_file;
        self
    }

    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL is empty.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.server.trim().is_empty() {
            return Err(CliError::Config("server URL cannot be empty".into()));
        }
        Ok(())
    }

    /// Token as a string, empty when unset.
    #[must_use]
    pub fn token_str(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }
}

/// `$HOME/.ravenpair.toml`, if the home directory is known.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}
