//! Runtime configuration derivation.
//!
//! Builds the Docker resource names every command needs from a validated
//! document. Derivation is a pure function of its input.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::schema::{
    EnvValue, FtpEntry, PhpVersion, ProjectType, SshEntry, ValidatedConfig,
};

/// MySQL container shared by every project on the host.
pub const MYSQL_CONTAINER: &str = "wpcodecept-mysqldb";

/// phpMyAdmin container shared by every project on the host.
pub const PHPMYADMIN_CONTAINER: &str = "wpcodecept-phpmyadmin";

/// Selenoid container shared by every project on the host.
pub const SELENOID_CONTAINER: &str = "wpcodecept-selenoid";

/// Docker volume holding MySQL data.
pub const MYSQL_VOLUME: &str = "wpcodecept-mysqldb-data";

/// Port Selenoid listens on inside the network.
pub const SELENOID_PORT: u16 = 4444;

/// Host port phpMyAdmin is published on.
pub const PHPMYADMIN_PORT: u16 = 33333;

/// WordPress install root inside the container.
pub const WP_ROOT: &str = "/var/www/html";

/// An SSH source with its key file name precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSshEntry {
    /// Private key file, as written in the configuration.
    pub private_key_path: Option<PathBuf>,
    /// Final path segment of `private_key_path`.
    pub private_key_filename: Option<String>,
    /// SSH host.
    pub host: Option<String>,
    /// SSH user.
    pub user: Option<String>,
    /// Plugins to copy from the remote host.
    pub plugins: Vec<String>,
    /// Themes to copy from the remote host.
    pub themes: Vec<String>,
}

impl From<&SshEntry> for RuntimeSshEntry {
    fn from(entry: &SshEntry) -> Self {
        Self {
            private_key_filename: entry
                .private_key_path
                .as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned()),
            private_key_path: entry.private_key_path.clone(),
            host: entry.host.clone(),
            user: entry.user.clone(),
            plugins: entry.plugins.clone(),
            themes: entry.themes.clone(),
        }
    }
}

/// Configuration consumed by every command for the rest of the process.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use serde_json::json;
/// use wpcodecept::config::{ConfigNormalizer, ConfigValidator};
///
/// let raw = json!({"namespace": "acme", "projectType": "plugin"});
/// let valid = ConfigValidator::validate(raw.as_object().unwrap(), Path::new(".")).unwrap();
/// let runtime = ConfigNormalizer::normalize(&valid);
///
/// assert_eq!(runtime.network, "acme_wpcodecept-network");
/// assert_eq!(runtime.container, "acme-wpcodecept-wordpress");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Container name prefix.
    pub namespace: String,
    /// Project type.
    pub project_type: ProjectType,
    /// WordPress version.
    pub wordpress_version: String,
    /// PHP version.
    pub php_version: PhpVersion,
    /// WordPress locale.
    pub language: String,
    /// MySQL image tag.
    pub mysql_version: String,
    /// Whether a Selenoid container is started.
    pub use_selenoid: bool,
    /// Cached WordPress image archive.
    pub image_path: Option<PathBuf>,
    /// Container init scripts.
    pub custom_init_scripts: Vec<PathBuf>,
    /// SSH download sources.
    pub ssh: Vec<RuntimeSshEntry>,
    /// FTP download sources.
    pub ftp: Vec<FtpEntry>,
    /// Plugins installed with wp-cli.
    pub download_plugins: Vec<String>,
    /// Themes installed with wp-cli.
    pub download_themes: Vec<String>,
    /// Extra container environment variables.
    pub envvars: BTreeMap<String, EnvValue>,

    /// `{namespace}_wpcodecept-network`
    pub network: String,
    /// `{namespace}-wpcodecept-wordpress`
    pub container: String,
    /// `{namespace}-acceptance`
    pub acceptance_dbname: String,
    /// `{namespace}-integration`
    pub integration_dbname: String,
    /// `wpcodecept:latest-{phpVersion}`
    pub wordpress_image: String,

    /// Shared MySQL container.
    pub mysql_container: &'static str,
    /// Shared phpMyAdmin container.
    pub phpmyadmin_container: &'static str,
    /// Shared Selenoid container.
    pub selenoid_container: &'static str,
    /// Shared MySQL data volume.
    pub mysql_volume: &'static str,
    /// Selenoid port.
    pub selenoid_port: u16,
}

impl RuntimeConfig {
    /// Directory the project is mounted at inside the WordPress container.
    ///
    /// `dirname` is the name of the project's working directory.
    #[must_use]
    pub fn source_dir(&self, dirname: &str) -> String {
        match self.project_type {
            ProjectType::Theme => format!("{WP_ROOT}/wp-content/themes/{dirname}"),
            ProjectType::Plugin | ProjectType::Other => {
                format!("{WP_ROOT}/wp-content/plugins/{dirname}")
            }
        }
    }

    /// URL of the WordPress site as seen from inside the Docker network.
    #[must_use]
    pub fn site_url(&self) -> String {
        format!("http://{}", self.container)
    }

    /// A copy safe to print, with non-empty FTP passwords masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for entry in &mut copy.ftp {
            if !entry.password.is_empty() {
                entry.password = REDACTED.to_string();
            }
        }
        copy
    }
}

/// Replacement text for secrets in printable output.
pub const REDACTED: &str = "********";

/// Derives a [`RuntimeConfig`] from a [`ValidatedConfig`].
pub struct ConfigNormalizer;

impl ConfigNormalizer {
    /// Apply the naming templates and copy user fields through unchanged.
    #[must_use]
    pub fn normalize(valid: &ValidatedConfig) -> RuntimeConfig {
        let ns = &valid.namespace;

        RuntimeConfig {
            namespace: ns.clone(),
            project_type: valid.project_type,
            wordpress_version: valid.wordpress_version.clone(),
            php_version: valid.php_version,
            language: valid.language.clone(),
            mysql_version: valid.mysql_version.clone(),
            use_selenoid: valid.use_selenoid,
            image_path: valid.image_path.clone(),
            custom_init_scripts: valid.custom_init_scripts.clone(),
            ssh: valid.ssh.iter().map(RuntimeSshEntry::from).collect(),
            ftp: valid.ftp.clone(),
            download_plugins: valid.download_plugins.clone(),
            download_themes: valid.download_themes.clone(),
            envvars: valid.envvars.clone(),

            network: format!("{ns}_wpcodecept-network"),
            container: format!("{ns}-wpcodecept-wordpress"),
            acceptance_dbname: format!("{ns}-acceptance"),
            integration_dbname: format!("{ns}-integration"),
            wordpress_image: format!("wpcodecept:latest-{}", valid.php_version),

            mysql_container: MYSQL_CONTAINER,
            phpmyadmin_container: PHPMYADMIN_CONTAINER,
            selenoid_container: SELENOID_CONTAINER,
            mysql_volume: MYSQL_VOLUME,
            selenoid_port: SELENOID_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValidator;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn runtime_in(dir: &Path, raw: Value) -> RuntimeConfig {
        let valid = ConfigValidator::validate(raw.as_object().unwrap(), dir).unwrap();
        ConfigNormalizer::normalize(&valid)
    }

    #[test]
    fn test_redacted_masks_ftp_passwords_only() {
        let runtime = runtime_in(
            Path::new("."),
            json!({
                "namespace": "acme",
                "projectType": "plugin",
                "ftp": [
                    {"host": "h", "user": "u", "password": "hunter2", "plugins": ["p"]},
                    {"host": "h2", "user": "u2", "plugins": ["q"]}
                ]
            }),
        );

        let shown = runtime.redacted();
        assert_eq!(shown.ftp[0].password, REDACTED);
        assert_eq!(shown.ftp[0].host.as_deref(), Some("h"));
        assert_eq!(shown.ftp[1].password, "");
        assert_eq!(runtime.ftp[0].password, "hunter2");
        assert_eq!(shown.network, runtime.network);
    }

    #[test]
    fn test_derived_names() {
        let runtime = runtime_in(
            Path::new("."),
            json!({"namespace": "acme", "projectType": "plugin"}),
        );

        assert_eq!(runtime.network, "acme_wpcodecept-network");
        assert_eq!(runtime.container, "acme-wpcodecept-wordpress");
        assert_eq!(runtime.acceptance_dbname, "acme-acceptance");
        assert_eq!(runtime.integration_dbname, "acme-integration");
        assert_eq!(runtime.wordpress_image, "wpcodecept:latest-7.4");
        assert_eq!(runtime.mysql_container, MYSQL_CONTAINER);
        assert_eq!(runtime.selenoid_port, 4444);
        assert_eq!(runtime.site_url(), "http://acme-wpcodecept-wordpress");
    }

    #[test]
    fn test_private_key_filename() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("keys")).unwrap();
        fs::write(dir.path().join("keys").join("deploy.pem"), "KEY").unwrap();

        let runtime = runtime_in(
            dir.path(),
            json!({
                "namespace": "acme",
                "projectType": "plugin",
                "ssh": [
                    {"privateKeyPath": "keys/deploy.pem", "host": "h", "user": "u", "plugins": ["p"]},
                    {"plugins": []}
                ]
            }),
        );

        assert_eq!(runtime.ssh[0].private_key_filename.as_deref(), Some("deploy.pem"));
        assert_eq!(
            runtime.ssh[0].private_key_path,
            Some(PathBuf::from("keys/deploy.pem"))
        );
        assert_eq!(runtime.ssh[1].private_key_filename, None);
    }

    #[test]
    fn test_user_fields_copied_through() {
        let runtime = runtime_in(
            Path::new("."),
            json!({
                "namespace": "acme",
                "projectType": "theme",
                "phpVersion": "8.0",
                "language": "ja",
                "useSelenoid": false,
                "downloadPlugins": ["akismet"],
                "envvars": {"WP_DEBUG": true}
            }),
        );

        assert_eq!(runtime.project_type, ProjectType::Theme);
        assert_eq!(runtime.php_version, PhpVersion::Php80);
        assert_eq!(runtime.language, "ja");
        assert!(!runtime.use_selenoid);
        assert_eq!(runtime.download_plugins, vec!["akismet".to_string()]);
        assert_eq!(runtime.envvars["WP_DEBUG"], EnvValue::Bool(true));
        assert_eq!(runtime.wordpress_image, "wpcodecept:latest-8.0");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let valid = ConfigValidator::validate(
            json!({"namespace": "acme", "projectType": "other", "downloadThemes": ["astra"]})
                .as_object()
                .unwrap(),
            Path::new("."),
        )
        .unwrap();

        let first = ConfigNormalizer::normalize(&valid);
        let second = ConfigNormalizer::normalize(&valid);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_source_dir_by_project_type() {
        let plugin = runtime_in(Path::new("."), json!({"namespace": "a", "projectType": "plugin"}));
        assert_eq!(
            plugin.source_dir("my-plugin"),
            "/var/www/html/wp-content/plugins/my-plugin"
        );

        let theme = runtime_in(Path::new("."), json!({"namespace": "a", "projectType": "theme"}));
        assert_eq!(
            theme.source_dir("my-theme"),
            "/var/www/html/wp-content/themes/my-theme"
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let runtime = runtime_in(Path::new("."), json!({"namespace": "acme", "projectType": "plugin"}));
        let json = serde_json::to_value(&runtime).unwrap();

        assert_eq!(json["acceptanceDbname"], "acme-acceptance");
        assert_eq!(json["projectType"], "plugin");
        assert_eq!(json["phpVersion"], "7.4");
        assert_eq!(json["selenoidPort"], 4444);
    }
}
