use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::{error, info};

pub const KEY_MONITOR_URL: &str = "monitor_url";
pub const KEY_EXPECT_CODE: &str = "expect_code";
pub const KEY_EMAIL_FROM: &str = "email_from";
pub const KEY_EMAIL_TO: &str = "email_to";
pub const KEY_REGION: &str = "region";
pub const KEY_PROFILE: &str = "profile";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Settings for a single monitor invocation. Built once, then only borrowed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub monitor_url: String,
    pub expect_code: u16,
    pub email_from: String,
    pub email_to: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

impl MonitorConfig {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let raw_code = required(KEY_EXPECT_CODE)?;
        let expect_code = raw_code
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue {
                key: KEY_EXPECT_CODE,
                value: raw_code.clone(),
                reason: e.to_string(),
            })?;

        let config = MonitorConfig {
            monitor_url: required(KEY_MONITOR_URL)?,
            expect_code,
            email_from: required(KEY_EMAIL_FROM)?,
            email_to: required(KEY_EMAIL_TO)?,
            region: lookup(KEY_REGION),
            profile: lookup(KEY_PROFILE),
        };
        config.validate()
    }

    /// Checks the invariants serde cannot express and normalizes optional fields.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        for (key, value) in [
            (KEY_MONITOR_URL, &self.monitor_url),
            (KEY_EMAIL_FROM, &self.email_from),
            (KEY_EMAIL_TO, &self.email_to),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(key));
            }
        }

        let url = reqwest::Url::parse(&self.monitor_url).map_err(|e| ConfigError::InvalidValue {
            key: KEY_MONITOR_URL,
            value: self.monitor_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: KEY_MONITOR_URL,
                value: self.monitor_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }

        if !(100..=599).contains(&self.expect_code) {
            return Err(ConfigError::InvalidValue {
                key: KEY_EXPECT_CODE,
                value: self.expect_code.to_string(),
                reason: "not an HTTP status code".to_string(),
            });
        }

        // An exported-but-empty variable means "use the SDK default".
        self.region = trimmed_optional(self.region);
        self.profile = trimmed_optional(self.profile);
        Ok(self)
    }
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Loads the settings from a TOML file using the same keys as the environment.
pub fn load_config_file(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let path_str = path.display().to_string();
    info!(path = %path_str, "Attempting to load config.");

    let raw = fs::read_to_string(path).map_err(|e| {
        error!(path = %path_str, error = %e, "Failed to read monitor config file.");
        ConfigError::Io {
            path: path_str.clone(),
            source: e,
        }
    })?;

    let config: MonitorConfig = toml::from_str(&raw).map_err(|e| {
        error!(path = %path_str, error = %e, "Failed to parse monitor config file.");
        ConfigError::Parse {
            path: path_str.clone(),
            source: e,
        }
    })?;

    let config = config.validate()?;
    info!(config = ?config, "Loaded config successfully.");
    Ok(config)
}
