//! Configuration schema definitions.
//!
//! This module defines the recognized fields of `codecept-docker.json`,
//! their defaults, and the typed form a document takes once it has passed
//! validation.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "codecept-docker.json";

/// Default WordPress version installed in the test container.
pub const DEFAULT_WORDPRESS_VERSION: &str = "latest";

/// Default WordPress locale.
pub const DEFAULT_LANGUAGE: &str = "en_US";

/// Default MySQL image tag.
pub const DEFAULT_MYSQL_VERSION: &str = "5.7";

/// An unvalidated configuration document, exactly as decoded from JSON.
pub type RawConfig = serde_json::Map<String, serde_json::Value>;

/// JSON keys recognized in the configuration document.
pub mod fields {
    /// Container name prefix.
    pub const NAMESPACE: &str = "namespace";
    /// Project type.
    pub const PROJECT_TYPE: &str = "projectType";
    /// WordPress version.
    pub const WORDPRESS_VERSION: &str = "wordpressVersion";
    /// PHP version of the WordPress image.
    pub const PHP_VERSION: &str = "phpVersion";
    /// WordPress locale.
    pub const LANGUAGE: &str = "language";
    /// MySQL image tag.
    pub const MYSQL_VERSION: &str = "mysqlVersion";
    /// Whether to run a Selenoid container.
    pub const USE_SELENOID: &str = "useSelenoid";
    /// Cached WordPress image archive.
    pub const IMAGE_PATH: &str = "imagePath";
    /// Scripts run inside the container before Apache starts.
    pub const CUSTOM_INIT_SCRIPTS: &str = "customInitScripts";
    /// SSH download sources.
    pub const SSH: &str = "ssh";
    /// FTP download sources.
    pub const FTP: &str = "ftp";
    /// Plugins installed with wp-cli.
    pub const DOWNLOAD_PLUGINS: &str = "downloadPlugins";
    /// Themes installed with wp-cli.
    pub const DOWNLOAD_THEMES: &str = "downloadThemes";
    /// Extra container environment variables.
    pub const ENVVARS: &str = "envvars";

    /// Every top-level key the validator understands.
    pub const ALL: &[&str] = &[
        NAMESPACE,
        PROJECT_TYPE,
        WORDPRESS_VERSION,
        PHP_VERSION,
        LANGUAGE,
        MYSQL_VERSION,
        USE_SELENOID,
        IMAGE_PATH,
        CUSTOM_INIT_SCRIPTS,
        SSH,
        FTP,
        DOWNLOAD_PLUGINS,
        DOWNLOAD_THEMES,
        ENVVARS,
    ];
}

/// Kind of project under test.
///
/// Determines where the working directory is mounted inside the WordPress
/// container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Not a plugin or theme; mounted next to a generated implementation plugin.
    Other,
    /// A WordPress plugin.
    Plugin,
    /// A WordPress theme.
    Theme,
}

impl ProjectType {
    /// Accepted spellings, in the order they are listed in error messages.
    pub const NAMES: &'static [&'static str] = &["other", "plugin", "theme"];

    /// Parses an exact (case-sensitive) project type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use wpcodecept::config::ProjectType;
    ///
    /// assert_eq!(ProjectType::parse("plugin"), Some(ProjectType::Plugin));
    /// assert_eq!(ProjectType::parse("library"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "other" => Some(Self::Other),
            "plugin" => Some(Self::Plugin),
            "theme" => Some(Self::Theme),
            _ => None,
        }
    }

    /// Returns the JSON spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Plugin => "plugin",
            Self::Theme => "theme",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PHP version of the WordPress image.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum PhpVersion {
    /// PHP 7.2
    #[serde(rename = "7.2")]
    #[value(name = "7.2")]
    Php72,
    /// PHP 7.3
    #[serde(rename = "7.3")]
    #[value(name = "7.3")]
    Php73,
    /// PHP 7.4
    #[default]
    #[serde(rename = "7.4")]
    #[value(name = "7.4")]
    Php74,
    /// PHP 8.0
    #[serde(rename = "8.0")]
    #[value(name = "8.0")]
    Php80,
}

impl PhpVersion {
    /// Accepted spellings, in the order they are listed in error messages.
    pub const NAMES: &'static [&'static str] = &["7.2", "7.3", "7.4", "8.0"];

    /// Parses a version string such as `"7.4"`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "7.2" => Some(Self::Php72),
            "7.3" => Some(Self::Php73),
            "7.4" => Some(Self::Php74),
            "8.0" => Some(Self::Php80),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Php72 => "7.2",
            Self::Php73 => "7.3",
            Self::Php74 => "7.4",
            Self::Php80 => "8.0",
        }
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar `envvars` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    /// A boolean.
    Bool(bool),
    /// A JSON number.
    Number(serde_json::Number),
    /// A string.
    String(String),
}

impl EnvValue {
    /// Converts a JSON value, returning `None` for arrays, objects and null.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => Some(Self::Number(n.clone())),
            serde_json::Value::String(s) => Some(Self::String(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// A validated SSH download source.
///
/// `host`, `user` and `private_key_path` are guaranteed present whenever
/// `plugins` or `themes` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SshEntry {
    /// Private key file, as written in the configuration.
    pub private_key_path: Option<PathBuf>,
    /// SSH host.
    pub host: Option<String>,
    /// SSH user.
    pub user: Option<String>,
    /// Plugins to copy from the remote host.
    pub plugins: Vec<String>,
    /// Themes to copy from the remote host.
    pub themes: Vec<String>,
}

/// A validated FTP download source.
///
/// When `confpath` is set, `host`, `user` and `password` hold the values read
/// from that credentials file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FtpEntry {
    /// JSON credentials file, as written in the configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confpath: Option<PathBuf>,
    /// FTP host.
    pub host: Option<String>,
    /// FTP user.
    pub user: Option<String>,
    /// FTP password (empty when not given).
    pub password: String,
    /// Plugins to download.
    pub plugins: Vec<String>,
    /// Themes to download.
    pub themes: Vec<String>,
}

/// Contents of an FTP credentials file referenced by `confpath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpCredentials {
    /// FTP host.
    pub host: String,
    /// FTP user.
    pub user: String,
    /// FTP password.
    pub password: String,
}

/// Marker that only the validator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Validated;

/// A configuration document that passed every validation rule.
///
/// Values of this type can only be obtained from
/// [`ConfigValidator::validate`](crate::config::ConfigValidator::validate),
/// so every field invariant documented here holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedConfig {
    /// Non-empty ASCII container prefix.
    pub namespace: String,
    /// Project type.
    pub project_type: ProjectType,
    /// ASCII WordPress version.
    pub wordpress_version: String,
    /// PHP version.
    pub php_version: PhpVersion,
    /// ASCII WordPress locale.
    pub language: String,
    /// ASCII MySQL image tag.
    pub mysql_version: String,
    /// Whether a Selenoid container is started.
    pub use_selenoid: bool,
    /// Readable cached image archive.
    pub image_path: Option<PathBuf>,
    /// Readable, unique init scripts.
    pub custom_init_scripts: Vec<PathBuf>,
    /// SSH download sources.
    pub ssh: Vec<SshEntry>,
    /// FTP download sources.
    pub ftp: Vec<FtpEntry>,
    /// Unique plugin slugs.
    pub download_plugins: Vec<String>,
    /// Unique theme slugs.
    pub download_themes: Vec<String>,
    /// Extra container environment variables.
    pub envvars: BTreeMap<String, EnvValue>,
    /// Non-fatal problems noticed while validating, such as a defaulted
    /// namespace.
    #[serde(skip)]
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub(crate) marker: Validated,
}
