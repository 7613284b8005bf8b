//! Default configuration document written by `create-config`.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::schema::{
    PhpVersion, ProjectType, DEFAULT_LANGUAGE, DEFAULT_MYSQL_VERSION, DEFAULT_WORDPRESS_VERSION,
};
use crate::error::{Error, Result};

/// A freshly generated `codecept-docker.json`.
///
/// Field order matches the order keys appear in the written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTemplate {
    /// Container name prefix.
    pub namespace: String,
    /// Project type.
    pub project_type: ProjectType,
    /// PHP version.
    pub php_version: PhpVersion,
    /// WordPress version.
    pub wordpress_version: String,
    /// WordPress locale.
    pub language: String,
    /// MySQL image tag.
    pub mysql_version: String,
    /// Whether a Selenoid container is started.
    pub use_selenoid: bool,
    /// Plugins installed with wp-cli.
    pub download_plugins: Vec<String>,
    /// Themes installed with wp-cli.
    pub download_themes: Vec<String>,
    /// SSH download sources.
    pub ssh: Vec<serde_json::Value>,
    /// FTP download sources.
    pub ftp: Vec<serde_json::Value>,
    /// Extra container environment variables.
    pub envvars: BTreeMap<String, String>,
}

impl ConfigTemplate {
    /// Builds the default document for a project.
    #[must_use]
    pub fn new(namespace: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            namespace: namespace.into(),
            project_type,
            php_version: PhpVersion::default(),
            wordpress_version: DEFAULT_WORDPRESS_VERSION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            mysql_version: DEFAULT_MYSQL_VERSION.to_string(),
            use_selenoid: true,
            download_plugins: Vec::new(),
            download_themes: Vec::new(),
            ssh: Vec::new(),
            ftp: Vec::new(),
            envvars: BTreeMap::new(),
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the document to `path`.
    ///
    /// Without `force`, an existing file is left untouched and
    /// [`Error::ConfigExists`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigExists`] or an I/O error.
    pub fn write(&self, path: &Path, force: bool) -> Result<()> {
        let contents = self.to_json()?;

        if force {
            fs::write(path, contents)?;
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::ConfigExists {
                    path: path.to_path_buf(),
                },
                _ => Error::Io(e),
            })?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }
}

/// Namespace used when none is given: the final segment of `dir`.
///
/// Returns `None` for paths without a UTF-8 final segment, such as `/`.
#[must_use]
pub fn default_namespace(dir: &Path) -> Option<String> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
