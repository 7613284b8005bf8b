//! Error types for the wpcodecept library.
//!
//! Every schema violation found while validating `codecept-docker.json` is
//! collected into a single [`ConfigErrors`] bag keyed by field path. The
//! crate-level [`Error`] wraps that bag together with the handful of
//! file-level failures that happen before validation can even start.

use std::fmt;
use std::path::PathBuf;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Result type alias for operations that may fail with a wpcodecept error.
///
/// # Examples
///
/// ```
/// use wpcodecept::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("demo")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the wpcodecept library.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration document failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(ConfigErrors),

    /// The configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// The expected path of the configuration file.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    ConfigRead {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not a JSON object.
    #[error("{} is not a valid configuration document: {reason}", path.display())]
    MalformedConfig {
        /// The configuration file path.
        path: PathBuf,
        /// Why decoding failed.
        reason: String,
    },

    /// Refused to overwrite an existing configuration file.
    #[error("configuration file already exists: {}", path.display())]
    ConfigExists {
        /// The existing configuration file.
        path: PathBuf,
    },

    /// The project root has no final path segment to mount it under.
    #[error("project directory {} has no name to mount it under", path.display())]
    UnnamedProjectDir {
        /// The canonical project root.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ConfigErrors> for Error {
    fn from(errors: ConfigErrors) -> Self {
        Self::InvalidConfiguration(errors)
    }
}

impl Error {
    /// Returns the validation error bag if this is a configuration error.
    #[must_use]
    pub fn config_errors(&self) -> Option<&ConfigErrors> {
        match self {
            Self::InvalidConfiguration(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Field-scoped validation messages, in the order they were recorded.
///
/// Keys are dotted field paths such as `ssh.0.privateKeyPath`. A key is
/// never present with an empty message list.
///
/// # Examples
///
/// ```
/// use wpcodecept::ConfigErrors;
///
/// let mut errors = ConfigErrors::new();
/// errors.add("namespace", "namespace is required");
/// errors.add("projectType", "projectType is required");
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(
///     errors.to_string(),
///     "namespace: namespace is required; projectType: projectType is required;"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl ConfigErrors {
    /// Creates an empty error bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records a message for a field, appending to the field's list if it
    /// already has messages.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(key, _)| *key == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    /// Returns true if no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of messages across all fields.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    /// Messages recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Returns true if the field has at least one message.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Field paths in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over `(field, messages)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, messages)| (key.as_str(), messages.as_slice()))
    }

    /// Iterates over every `(field, message)` pair, flattened.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, messages)| {
            messages
                .iter()
                .map(move |message| (key.as_str(), message.as_str()))
        })
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, messages)) in self.entries.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{field}: {};", messages.join(":"))?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

impl Serialize for ConfigErrors {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}
