//! `.env` file support for credentials.
//!
//! Values already present in the process environment are never overwritten.

use std::path::{Path, PathBuf};

/// Load `<dir>/.env` into the process environment if it exists.
///
/// Returns the path that was loaded.
pub fn load(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(".env");
    if !path.is_file() {
        return None;
    }
    match dotenvy::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load .env file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn loads_missing_variables_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "COPILOT_TEST_DOTENV_NEW=from-file\nCOPILOT_TEST_DOTENV_SET=from-file\n",
        )
        .unwrap();
        std::env::remove_var("COPILOT_TEST_DOTENV_NEW");
        std::env::set_var("COPILOT_TEST_DOTENV_SET", "from-process");

        let loaded = load(dir.path());

        assert_eq!(loaded, Some(dir.path().join(".env")));
        assert_eq!(std::env::var("COPILOT_TEST_DOTENV_NEW").unwrap(), "from-file");
        assert_eq!(
            std::env::var("COPILOT_TEST_DOTENV_SET").unwrap(),
            "from-process"
        );
        std::env::remove_var("COPILOT_TEST_DOTENV_NEW");
        std::env::remove_var("COPILOT_TEST_DOTENV_SET");
    }

    #[test]
    fn absent_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path()), None);
    }
}
