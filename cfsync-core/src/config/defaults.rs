// Single source of truth for all default values.

// --- API ---
pub const DEFAULT_BASE_URL: &str = "https://api.contentful.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// --- Files ---
pub const DEFAULT_CONFIG_FILENAME: &str = "cfsync.toml";

// --- Environment variables ---
pub const ENV_MANAGEMENT_TOKEN: &str = "CONTENTFUL_MANAGEMENT_TOKEN";
pub const ENV_ORGANIZATION_ID: &str = "CONTENTFUL_ORGANIZATION_ID";
pub const ENV_ENVIRONMENT: &str = "CONTENTFUL_ENVIRONMENT";
pub const ENV_BASE_URL: &str = "CFSYNC_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CFSYNC_TIMEOUT_SECS";

// --- Observability ---
pub const ENV_LOG_FILTER: &str = "CFSYNC_LOG";
pub const DEFAULT_LOG_FILTER: &str = "cfsync=info";
