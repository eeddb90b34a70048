//! XDG Base Directory utilities for the global config location.

use crate::error::ApiError;
use std::path::PathBuf;

/// Directory name under the config home.
pub const APP_DIR: &str = "mfg-copilot";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// `$XDG_CONFIG_HOME/mfg-copilot/`. Not created.
pub fn app_config_dir() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR))
}

/// `$XDG_CONFIG_HOME/mfg-copilot/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(app_config_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn xdg_config_home_wins() {
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/xdg-test");
        let path = global_config_path();
        std::env::remove_var("XDG_CONFIG_HOME");
        assert_eq!(
            path.unwrap(),
            PathBuf::from("/tmp/xdg-test/mfg-copilot/config.toml")
        );
    }

    #[test]
    #[serial]
    fn falls_back_to_home_dot_config() {
        std::env::remove_var("XDG_CONFIG_HOME");
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(
                app_config_dir().unwrap(),
                PathBuf::from(home).join(".config").join("mfg-copilot")
            );
        }
    }
}
