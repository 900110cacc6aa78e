/// cfsync version string.
pub const CFSYNC_VERSION: &str = env!("CARGO_PKG_VERSION");

// --- Wire headers ---
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CONTENT_TYPE_VALUE: &str = "application/vnd.contentful.delivery.v1+json";
pub const USER_AGENT_HEADER: &str = "X-Contentful-User-Agent";
pub const VERSION_HEADER: &str = "X-Contentful-Version";
pub const RATE_LIMIT_RESET_HEADER: &str = "x-contentful-ratelimit-reset";

/// Fixed marker sent as the user agent on every request.
pub fn user_agent() -> String {
    format!("cfsync/{CFSYNC_VERSION}")
}

// --- Retry ---
/// Total attempts for a rate-limited request, including the first one.
pub const MAX_ATTEMPTS: u32 = 3;
pub const HTTP_TOO_MANY_REQUESTS: u16 = 429;
pub const HTTP_NOT_FOUND: u16 = 404;
pub const HTTP_CONFLICT: u16 = 409;

// --- Versions ---
/// Sentinel meaning "send no version header". Remote versions start at 1.
pub const NO_VERSION: u64 = 0;
/// Version assumed when a document carries no `sys.version`.
pub const DEFAULT_DOCUMENT_VERSION: u64 = 1;
/// Version sent when creating a content type.
pub const CONTENT_TYPE_CREATE_VERSION: u64 = 1;
/// Version sent when first writing an editor interface. The remote creates the
/// layout alongside its content type, so the first write is always an update.
pub const EDITOR_INTERFACE_SEED_VERSION: u64 = 18;

// --- Identifiers ---
pub const ID_SEPARATOR: char = '/';
pub const EDITOR_INTERFACE_SUFFIX: &str = "editor_interface";

/// Prefix written in front of every managed content type description.
pub const MANAGED_DESCRIPTION_MARKER: &str = "[DO NOT EDIT: Managed by cfsync] ";
