//! Persisted session state.
//!
//! This module loads and saves the small JSON record that remembers which
//! instance to talk to and the bearer token obtained for it.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ConfigError;

/// The persisted record: instance URL, stored token, and username.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the instance, e.g. `https://example.social`.
    #[serde(default)]
    pub url: String,
    /// Stored `Authorization` header value (`Bearer ...`). Empty when not authenticated.
    #[serde(default)]
    pub token: String,
    /// Username the token was obtained for.
    #[serde(default)]
    pub username: String,
}

impl Config {
    /// Load the record from `path`.
    ///
    /// A missing or malformed file is treated as a first run and yields an
    /// empty record.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!(path = %path.display(), "no config file, starting fresh");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                Self::default()
            }
        }
    }

    /// Load the record from `path`, reporting why it could not be read.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::Read(format!("{}: {}", path.display(), e))),
        };

        let config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        Ok(Some(config))
    }

    /// Write the record to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Write(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Write(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| ConfigError::Write(format!("{}: {}", path.display(), e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| ConfigError::Write(format!("{}: {}", path.display(), e)))?;
        }

        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Whether an instance URL has been chosen.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    /// Whether a token is stored. The token is not verified.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}
