//! Configuration file loading.
//!
//! Reads `codecept-docker.json`, decodes it into a [`RawConfig`] and runs it
//! through validation and normalization.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::normalizer::{ConfigNormalizer, RuntimeConfig};
use crate::config::schema::{RawConfig, ValidatedConfig, CONFIG_FILENAME};
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// Loads configuration documents from disk.
///
/// # Examples
///
/// ```no_run
/// use wpcodecept::config::ConfigLoader;
/// use std::path::Path;
///
/// let runtime = ConfigLoader::load(Path::new("codecept-docker.json")).unwrap();
/// println!("network: {}", runtime.network);
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path of the configuration file inside `dir`.
    #[must_use]
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILENAME)
    }

    /// Read and decode a configuration file without validating it.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] if the file does not exist
    /// - [`Error::ConfigRead`] if it cannot be read
    /// - [`Error::MalformedConfig`] if it is not JSON or not a JSON object
    pub fn load_file(path: &Path) -> Result<RawConfig> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ConfigNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::ConfigRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::parse(path, &contents)
    }

    /// Decode configuration text. `path` is only used in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedConfig`] if `contents` is not a JSON object.
    pub fn parse(path: &Path, contents: &str) -> Result<RawConfig> {
        let value: Value =
            serde_json::from_str(contents).map_err(|e| Error::MalformedConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(Error::MalformedConfig {
                path: path.to_path_buf(),
                reason: format!("expected a JSON object, found {}", kind(&other)),
            }),
        }
    }

    /// Load and validate a configuration file.
    ///
    /// Relative paths inside the document resolve against the file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns the file-level errors of [`load_file`](Self::load_file), or
    /// [`Error::InvalidConfiguration`] with every validation failure.
    pub fn load_validated(path: &Path) -> Result<ValidatedConfig> {
        let raw = Self::load_file(path)?;
        let base_dir = base_dir(path);
        log::debug!(
            "validating {} against {}",
            path.display(),
            base_dir.display()
        );
        Ok(ConfigValidator::validate(&raw, &base_dir)?)
    }

    /// Load, validate and normalize a configuration file.
    ///
    /// # Errors
    ///
    /// See [`load_validated`](Self::load_validated).
    pub fn load(path: &Path) -> Result<RuntimeConfig> {
        let valid = Self::load_validated(path)?;
        Ok(ConfigNormalizer::normalize(&valid))
    }
}

fn base_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = ConfigLoader::default_path(dir.path());
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_file_decodes_object() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"namespace": "acme", "projectType": "plugin"}"#);

        let raw = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(raw["namespace"], "acme");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = ConfigLoader::default_path(dir.path());

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ not json");

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedConfig { .. }));
    }

    #[test]
    fn test_non_object_document() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[1, 2]");

        match ConfigLoader::load_file(&path).unwrap_err() {
            Error::MalformedConfig { reason, .. } => assert!(reason.contains("an array")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"projectType": "library"}"#);

        let err = ConfigLoader::load(&path).unwrap_err();
        let errors = err.config_errors().unwrap();
        assert!(errors.contains("namespace"));
        assert!(errors.contains("projectType"));
    }

    #[test]
    fn test_relative_paths_resolve_next_to_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("image.tar"), "tar").unwrap();
        let path = write_config(
            &dir,
            r#"{"namespace": "acme", "projectType": "plugin", "imagePath": "image.tar"}"#,
        );

        let runtime = ConfigLoader::load(&path).unwrap();
        assert_eq!(runtime.image_path, Some(PathBuf::from("image.tar")));
        assert_eq!(runtime.network, "acme_wpcodecept-network");
    }

    #[test]
    fn test_base_dir_of_bare_filename() {
        assert_eq!(base_dir(Path::new("codecept-docker.json")), PathBuf::from("."));
        assert_eq!(base_dir(Path::new("/a/b.json")), PathBuf::from("/a"));
    }
}
