//! Environment and `.env` helpers

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is unset or blank
    #[error("{0} environment variable not set")]
    Missing(String),

    /// A `.env` file exists but could not be read or parsed
    #[error("failed to load .env file: {0}")]
    Dotenv(String),
}

/// Load a `.env` file from the current directory or its parents
///
/// Values in the file override variables already present in the process
/// environment. Returns the loaded path, or `None` when no file was found.
/// Nothing is logged here so callers can load before tracing is installed.
pub fn load_dotenv() -> Result<Option<PathBuf>, EnvError> {
    match dotenvy::dotenv_override() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(EnvError::Dotenv(e.to_string())),
    }
}

/// Load a specific `.env` file with the same semantics as [`load_dotenv`]
pub fn load_dotenv_from(path: &Path) -> Result<Option<PathBuf>, EnvError> {
    match dotenvy::from_path_override(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(EnvError::Dotenv(e.to_string())),
    }
}

/// Read a variable, treating blank values as unset
pub fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable or fall back to `default`
pub fn env_or(name: &str, default: &str) -> String {
    optional_env(name).unwrap_or_else(|| default.to_string())
}

/// Read a variable that must be present
pub fn required_env(name: &str) -> Result<String, EnvError> {
    optional_env(name).ok_or_else(|| EnvError::Missing(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_blank_is_none() {
        unsafe {
            std::env::set_var("AGENT_UTILS_TEST_BLANK", "   ");
        }
        assert_eq!(optional_env("AGENT_UTILS_TEST_BLANK"), None);
        unsafe {
            std::env::remove_var("AGENT_UTILS_TEST_BLANK");
        }
    }

    #[test]
    fn test_env_or_default() {
        assert_eq!(env_or("AGENT_UTILS_TEST_UNSET_VAR", "fallback"), "fallback");
    }

    #[test]
    fn test_required_env_missing() {
        let err = required_env("AGENT_UTILS_TEST_MISSING_VAR").unwrap_err();
        assert_eq!(
            err.to_string(),
            "AGENT_UTILS_TEST_MISSING_VAR environment variable not set"
        );
    }

    #[test]
    fn test_required_env_present() {
        unsafe {
            std::env::set_var("AGENT_UTILS_TEST_PRESENT", " value ");
        }
        assert_eq!(required_env("AGENT_UTILS_TEST_PRESENT").unwrap(), "value");
        unsafe {
            std::env::remove_var("AGENT_UTILS_TEST_PRESENT");
        }
    }

    #[test]
    fn test_load_dotenv_from_overrides_process_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "AGENT_UTILS_TEST_DOTENV=from_file\n").unwrap();
        unsafe {
            std::env::set_var("AGENT_UTILS_TEST_DOTENV", "from_process");
        }

        assert_eq!(load_dotenv_from(&path).unwrap(), Some(path.clone()));
        assert_eq!(optional_env("AGENT_UTILS_TEST_DOTENV").as_deref(), Some("from_file"));
        unsafe {
            std::env::remove_var("AGENT_UTILS_TEST_DOTENV");
        }
    }

    #[test]
    fn test_load_dotenv_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_dotenv_from(&dir.path().join(".env")).unwrap(), None);
    }

    #[test]
    fn test_load_dotenv_from_malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "this line has no equals sign\n").unwrap();

        match load_dotenv_from(&path) {
            Err(EnvError::Dotenv(reason)) => assert!(!reason.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
    }
}
