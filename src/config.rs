//! Export configuration
//!
//! Defaults for the `settings` block of every snapshot plus the batch output
//! location. Stored as TOML; every key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;
use crate::error::ExportError;
use crate::types::Theme;

/// Notification toggles copied into each snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_notify_email")]
    pub email: bool,
    #[serde(default = "default_notify_push")]
    pub push: bool,
    #[serde(default = "default_notify_sms")]
    pub sms: bool,
    #[serde(default = "default_notify_marketing")]
    pub marketing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Theme recorded when the state carries no preference
    #[serde(default)]
    pub default_theme: Theme,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub notifications: NotificationSettings,
    /// Batch mode destination when `--output` is not given
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_notify_email() -> bool {
    constants::settings::NOTIFY_EMAIL
}

fn default_notify_push() -> bool {
    constants::settings::NOTIFY_PUSH
}

fn default_notify_sms() -> bool {
    constants::settings::NOTIFY_SMS
}

fn default_notify_marketing() -> bool {
    constants::settings::NOTIFY_MARKETING
}

fn default_language() -> String {
    constants::settings::LANGUAGE.to_string()
}

fn default_timezone() -> String {
    constants::settings::TIMEZONE.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(constants::output::DEFAULT_PATH)
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: default_notify_email(),
            push: default_notify_push(),
            sms: default_notify_sms(),
            marketing: default_notify_marketing(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::default(),
            language: default_language(),
            timezone: default_timezone(),
            notifications: NotificationSettings::default(),
            output_path: default_output_path(),
        }
    }
}

impl ExportConfig {
    /// `<config dir>/deliops/export.toml`
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(constants::config::APP_DIR);
        path.push(constants::config::FILENAME);
        path
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self, ExportError> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ExportError> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        let config = Self::parse(&contents).map_err(|message| ExportError::Config {
            path: path.to_path_buf(),
            message,
        })?;

        info!(path = %path.display(), language = %config.language, timezone = %config.timezone, "Loaded export config");
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }
}
