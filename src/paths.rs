//! Path resolution for the persisted record and optional `.env` file.
//!
//! The persisted record lives in the current working directory by default,
//! with overrides from the command line and the environment.

use std::env;
use std::path::{Path, PathBuf};

use crate::constants;

/// Find the persisted config file.
/// Priority:
/// 1. Explicit path (from `--config`)
/// 2. FEDIPOST_CONFIG from environment (if set and non-empty)
/// 3. Current directory/.config
pub fn find_config_file(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(config_path) = env::var(constants::config::PATH_ENV_VAR)
        && !config_path.trim().is_empty()
    {
        return PathBuf::from(config_path);
    }

    // Absolute path so later chdirs do not move the file
    match env::current_dir() {
        Ok(current_dir) => current_dir.join(constants::config::FILE_NAME),
        Err(_) => PathBuf::from(constants::config::FILE_NAME),
    }
}

/// Directory holding the optional user-level `.env` file.
/// XDG_CONFIG_HOME/fedipost if set, otherwise ~/.config/fedipost.
pub fn user_config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.is_empty()
    {
        return Some(PathBuf::from(xdg_config_home).join(constants::config::APP_DIR));
    }

    dirs::home_dir().map(|home| home.join(".config").join(constants::config::APP_DIR))
}

/// Find and load .env file.
/// Priority:
/// 1. Current directory/.env
/// 2. User config directory/.env
///
/// Returns the path that was loaded, if any.
pub fn load_env_file() -> Option<PathBuf> {
    let current_dir_env = PathBuf::from(".env");
    if current_dir_env.exists() && dotenv::from_path(&current_dir_env).is_ok() {
        return Some(current_dir_env);
    }

    let user_env = user_config_dir()?.join(".env");
    if user_env.exists() && dotenv::from_path(&user_env).is_ok() {
        return Some(user_env);
    }

    None
}
