//! `.env.testing` rendering for Codeception's WPBrowser modules.

use std::fs;
use std::path::Path;

use crate::config::normalizer::{RuntimeConfig, WP_ROOT};
use crate::error::Result;

/// File name written next to `codecept-docker.json`.
pub const ENV_TESTING_FILENAME: &str = ".env.testing";

/// Renders the dotenv file pointing Codeception at the test containers.
///
/// Values are double-quoted except the numeric Selenoid port. Keys appear
/// in a fixed order.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use serde_json::json;
/// use wpcodecept::config::{ConfigNormalizer, ConfigValidator};
/// use wpcodecept::docker::render_env_testing;
///
/// let raw = json!({"namespace": "acme", "projectType": "plugin"});
/// let valid = ConfigValidator::validate(raw.as_object().unwrap(), Path::new(".")).unwrap();
/// let env = render_env_testing(&ConfigNormalizer::normalize(&valid));
///
/// assert!(env.contains("TEST_SITE_DB_NAME=\"acme-acceptance\"\n"));
/// assert!(env.ends_with("SELENOID_PORT=4444\n"));
/// ```
#[must_use]
pub fn render_env_testing(config: &RuntimeConfig) -> String {
    let quoted = [
        ("WP_ROOT_FOLDER", WP_ROOT.to_string()),
        ("TEST_SITE_WP_ADMIN_PATH", "/wp-admin".to_string()),
        ("TEST_SITE_DB_NAME", config.acceptance_dbname.clone()),
        ("TEST_SITE_DB_HOST", config.mysql_container.to_string()),
        ("TEST_SITE_DB_USER", "root".to_string()),
        ("TEST_SITE_DB_PASSWORD", "root".to_string()),
        ("TEST_SITE_TABLE_PREFIX", "wp_".to_string()),
        ("TEST_DB_NAME", config.integration_dbname.clone()),
        ("TEST_DB_HOST", config.mysql_container.to_string()),
        ("TEST_DB_USER", "root".to_string()),
        ("TEST_DB_PASSWORD", "root".to_string()),
        ("TEST_TABLE_PREFIX", "wp_".to_string()),
        ("TEST_SITE_WP_URL", config.site_url()),
        ("TEST_SITE_WP_DOMAIN", config.site_url()),
        ("TEST_SITE_WP_URL_NO_SCHEME", config.container.clone()),
        ("TEST_SITE_ADMIN_EMAIL", "admin@example.com".to_string()),
        ("TEST_SITE_ADMIN_USERNAME", "root".to_string()),
        ("TEST_SITE_ADMIN_PASSWORD", "root".to_string()),
        ("SELENOID_HOST", config.selenoid_container.to_string()),
    ];

    let mut out = String::new();
    for (key, value) in quoted {
        out.push_str(&format!("{key}=\"{value}\"\n"));
    }
    out.push_str(&format!("SELENOID_PORT={}\n", config.selenoid_port));
    out
}

/// Writes `.env.testing` into `dir`, replacing any existing file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_env_testing(config: &RuntimeConfig, dir: &Path) -> Result<()> {
    let path = dir.join(ENV_TESTING_FILENAME);
    log::debug!("writing {}", path.display());
    fs::write(path, render_env_testing(config))?;
    Ok(())
}
