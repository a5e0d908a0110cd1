use super::super::{BackendConfig, ObservabilityConfig, UiConfig};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());

        Self {
            config_path: home.join(".lexichat").join("config.toml"),
            backend: BackendConfig::default(),
            ui: UiConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(self.backend.base_url.trim()).map_err(|e| {
            ConfigError::Validation(format!(
                "backend.base_url {:?} is not a valid URL: {e}",
                self.backend.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "backend.base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.backend.timeout_secs == 0 || self.backend.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "backend timeouts must be greater than zero".into(),
            ));
        }
        if self.observability.level().is_none() {
            return Err(ConfigError::Validation(format!(
                "observability.log_level {:?} is not one of trace/debug/info/warn/error",
                self.observability.log_level
            )));
        }
        Ok(())
    }

    /// Transcript destination with `~` expanded.
    pub fn transcript_path(&self) -> Option<PathBuf> {
        self.ui
            .transcript_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(expand_path)
    }
}

pub(crate) fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
