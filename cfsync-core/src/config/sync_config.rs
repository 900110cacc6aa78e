//! Top-level cfsync configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, ApiConfig};
use crate::errors::ConfigError;

/// Top-level configuration.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Project config (`cfsync.toml` in the project root)
/// 3. Environment variables (`CONTENTFUL_*`, `CFSYNC_*`)
/// 4. Compiled defaults
///
/// Environment variables are a fallback: a value written in the config file
/// wins over the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub api: ApiConfig,
}

/// Values supplied directly by the embedding process.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub cma_token: Option<String>,
    pub organization_id: Option<String>,
    pub environment: Option<String>,
    pub base_url: Option<String>,
}

impl SyncConfig {
    /// Load configuration with layered resolution, then validate it.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: environment variables
        Self::apply_env_fallbacks(&mut config);

        // Layer 2: project config
        let project_config_path = root.join(defaults::DEFAULT_CONFIG_FILENAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 1: explicit overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        tracing::debug!(?config, "cfsync: configuration resolved");
        Ok(config)
    }

    /// Load configuration from a TOML string (no layering, no validation).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Check that everything needed to talk to the API is present.
    pub fn validate(config: &SyncConfig) -> Result<(), ConfigError> {
        let required = [
            ("api.cma_token", config.api.cma_token(), defaults::ENV_MANAGEMENT_TOKEN),
            (
                "api.organization_id",
                config.api.organization_id(),
                defaults::ENV_ORGANIZATION_ID,
            ),
            ("api.environment", config.api.environment(), defaults::ENV_ENVIRONMENT),
        ];
        for (field, value, env_var) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: format!("required (set it in the config file or via {env_var})"),
                });
            }
        }
        if config.api.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "api.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !config.api.base_url().starts_with("http://")
            && !config.api.base_url().starts_with("https://")
        {
            return Err(ConfigError::ValidationFailed {
                field: "api.base_url".to_string(),
                message: "must be an http(s) URL".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut SyncConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: SyncConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut SyncConfig, other: &SyncConfig) {
        if other.api.cma_token.is_some() {
            base.api.cma_token = other.api.cma_token.clone();
        }
        if other.api.organization_id.is_some() {
            base.api.organization_id = other.api.organization_id.clone();
        }
        if other.api.environment.is_some() {
            base.api.environment = other.api.environment.clone();
        }
        if other.api.base_url.is_some() {
            base.api.base_url = other.api.base_url.clone();
        }
        if other.api.timeout_secs.is_some() {
            base.api.timeout_secs = other.api.timeout_secs;
        }
    }

    /// Fill values from the process environment.
    fn apply_env_fallbacks(config: &mut SyncConfig) {
        if let Ok(val) = std::env::var(defaults::ENV_MANAGEMENT_TOKEN) {
            config.api.cma_token = Some(val);
        }
        if let Ok(val) = std::env::var(defaults::ENV_ORGANIZATION_ID) {
            config.api.organization_id = Some(val);
        }
        if let Ok(val) = std::env::var(defaults::ENV_ENVIRONMENT) {
            config.api.environment = Some(val);
        }
        if let Ok(val) = std::env::var(defaults::ENV_BASE_URL) {
            config.api.base_url = Some(val);
        }
        if let Ok(val) = std::env::var(defaults::ENV_TIMEOUT_SECS) {
            if let Ok(v) = val.parse::<u64>() {
                config.api.timeout_secs = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut SyncConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.cma_token {
            config.api.cma_token = Some(v.clone());
        }
        if let Some(ref v) = overrides.organization_id {
            config.api.organization_id = Some(v.clone());
        }
        if let Some(ref v) = overrides.environment {
            config.api.environment = Some(v.clone());
        }
        if let Some(ref v) = overrides.base_url {
            config.api.base_url = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
