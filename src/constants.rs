//! Application constants for API endpoints, OAuth form values, and file locations.
//!
//! This module contains all constant values used throughout the application,
//! including instance API paths, the fixed application registration fields,
//! and validation rules for interactive input.

/// Instance API endpoint constants.
pub mod api {
    /// Path for registering an OAuth application.
    pub const APPS_PATH: &str = "/api/v1/apps";

    /// Path for exchanging credentials for an access token.
    pub const TOKEN_PATH: &str = "/oauth/token";

    /// Path for creating a status.
    pub const STATUSES_PATH: &str = "/api/v1/statuses";

    /// Timeout applied to every request (in seconds).
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Maximum number of characters of a raw error body kept in messages.
    pub const MAX_ERROR_BODY_CHARS: usize = 200;
}

/// Fixed values sent during application registration and token exchange.
pub mod oauth {
    /// Name the application registers under.
    pub const CLIENT_NAME: &str = "fedigo";

    /// Out-of-band redirect URI (no browser callback is used).
    pub const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

    /// Scopes requested for both the application and the token.
    pub const SCOPES: &str = "read write follow";

    /// OAuth grant type used for the token exchange.
    pub const GRANT_TYPE: &str = "password";

    /// Scheme prefix for the stored `Authorization` header value.
    pub const BEARER_PREFIX: &str = "Bearer";
}

/// Persisted state location constants.
pub mod config {
    /// File name of the persisted record, relative to the working directory.
    pub const FILE_NAME: &str = ".config";

    /// Environment variable overriding the persisted record location.
    pub const PATH_ENV_VAR: &str = "FEDIPOST_CONFIG";

    /// Directory name used under the XDG config home.
    pub const APP_DIR: &str = "fedipost";
}

/// Interactive input validation constants.
pub mod validation {
    /// Required prefix for the instance URL.
    pub const REQUIRED_URL_PREFIX: &str = "https://";
}
