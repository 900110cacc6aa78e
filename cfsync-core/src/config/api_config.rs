use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Management API connection settings.
///
/// Every value is optional so that layers can be merged; the accessors
/// resolve compiled defaults.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Management API bearer token.
    pub cma_token: Option<String>,
    /// Organization that owns the target spaces.
    pub organization_id: Option<String>,
    /// Environment used when a resource does not name one.
    pub environment: Option<String>,
    /// API base URL, without a trailing slash.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn cma_token(&self) -> &str {
        self.cma_token.as_deref().unwrap_or_default()
    }

    pub fn organization_id(&self) -> &str {
        self.organization_id.as_deref().unwrap_or_default()
    }

    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(defaults::DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(defaults::DEFAULT_TIMEOUT_SECS))
    }
}

// The token never shows up in logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("cma_token", &self.cma_token.as_ref().map(|_| "<redacted>"))
            .field("organization_id", &self.organization_id)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
