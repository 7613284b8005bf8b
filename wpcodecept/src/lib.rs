#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # wpcodecept
//!
//! Configuration and container planning for Docker-based WordPress test
//! environments driven by Codeception.
//!
//! ## Core Types
//!
//! - [`config::ValidatedConfig`] and [`config::RuntimeConfig`]: the project
//!   configuration before and after name derivation
//! - [`ConfigErrors`]: every validation failure, keyed by field path
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//! - [`docker::CommandPlan`]: `docker` invocations for a lifecycle step
//!
//! ## Examples
//!
//! ```
//! use std::path::Path;
//! use serde_json::json;
//! use wpcodecept::config::{ConfigNormalizer, ConfigValidator};
//!
//! let raw = json!({"namespace": "acme", "projectType": "plugin"});
//! let errors = ConfigValidator::validate(
//!     json!({"projectType": "library"}).as_object().unwrap(),
//!     Path::new("."),
//! )
//! .unwrap_err();
//! assert!(errors.contains("namespace"));
//!
//! let valid = ConfigValidator::validate(raw.as_object().unwrap(), Path::new(".")).unwrap();
//! let runtime = ConfigNormalizer::normalize(&valid);
//! assert_eq!(runtime.integration_dbname, "acme-integration");
//! ```

pub mod config;
pub mod docker;
pub mod error;
pub mod logging;

// Re-export key types at crate root for convenience
pub use config::{ConfigLoader, ConfigNormalizer, ConfigValidator, RuntimeConfig, ValidatedConfig};
pub use error::{ConfigErrors, Error, Result};
pub use logging::{init_logger, render_config_errors, LogLevel, Logger};
