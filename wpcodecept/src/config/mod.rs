//! Configuration system for wpcodecept.
//!
//! A project is described by a single `codecept-docker.json` in its root.
//! The document passes through three stages:
//!
//! 1. [`ConfigLoader`] reads and decodes it into a [`RawConfig`]
//! 2. [`ConfigValidator`] checks every rule and produces a [`ValidatedConfig`],
//!    or a [`ConfigErrors`](crate::ConfigErrors) bag listing every violation
//! 3. [`ConfigNormalizer`] derives the Docker resource names and yields the
//!    [`RuntimeConfig`] commands operate on
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use serde_json::json;
//! use wpcodecept::config::{ConfigNormalizer, ConfigValidator};
//!
//! let raw = json!({
//!     "namespace": "shop",
//!     "projectType": "theme",
//!     "downloadPlugins": ["woocommerce"]
//! });
//!
//! let valid = ConfigValidator::validate(raw.as_object().unwrap(), Path::new(".")).unwrap();
//! let runtime = ConfigNormalizer::normalize(&valid);
//!
//! assert_eq!(runtime.acceptance_dbname, "shop-acceptance");
//! assert_eq!(runtime.language, "en_US");
//! ```

pub mod loader;
pub mod normalizer;
pub mod schema;
pub mod template;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use loader::ConfigLoader;
pub use normalizer::{ConfigNormalizer, RuntimeConfig, RuntimeSshEntry};
pub use schema::{
    EnvValue, FtpCredentials, FtpEntry, PhpVersion, ProjectType, RawConfig, SshEntry,
    ValidatedConfig, CONFIG_FILENAME,
};
pub use template::{default_namespace, ConfigTemplate};
pub use validator::{ConfigValidator, EMPTY_NAMESPACE_WARNING};
