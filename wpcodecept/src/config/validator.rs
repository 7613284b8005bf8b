//! Configuration validation.
//!
//! Turns a [`RawConfig`] into a [`ValidatedConfig`] or a [`ConfigErrors`]
//! bag. Every independent rule runs and records its failure; nothing
//! short-circuits on the first bad field. Relative file references are
//! resolved against the directory holding the configuration file.

use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::schema::{
    fields, EnvValue, FtpCredentials, FtpEntry, PhpVersion, ProjectType, RawConfig, SshEntry,
    Validated, ValidatedConfig, DEFAULT_LANGUAGE, DEFAULT_MYSQL_VERSION,
    DEFAULT_WORDPRESS_VERSION,
};
use crate::config::template::default_namespace;
use crate::error::ConfigErrors;

/// Logged when `namespace` is present but empty.
pub const EMPTY_NAMESPACE_WARNING: &str = "codecept-docker.json does not contain a \"namespace\" field, defaulting to project directory name as a prefix for containers";

/// Validates `codecept-docker.json` documents.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use serde_json::json;
/// use wpcodecept::config::{ConfigValidator, PhpVersion};
///
/// let raw = json!({"namespace": "demo", "projectType": "plugin"});
/// let config = ConfigValidator::validate(raw.as_object().unwrap(), Path::new(".")).unwrap();
///
/// assert!(config.use_selenoid);
/// assert_eq!(config.php_version, PhpVersion::Php74);
/// ```
pub struct ConfigValidator<'a> {
    base_dir: &'a Path,
    errors: ConfigErrors,
    warnings: Vec<String>,
}

impl<'a> ConfigValidator<'a> {
    /// Validate a complete configuration document.
    ///
    /// # Arguments
    ///
    /// * `raw` - The decoded JSON object
    /// * `base_dir` - Directory relative file references are resolved against
    ///
    /// # Errors
    ///
    /// Returns every field-scoped problem found, aggregated into one bag.
    pub fn validate(raw: &RawConfig, base_dir: &'a Path) -> Result<ValidatedConfig, ConfigErrors> {
        let mut v = Self {
            base_dir,
            errors: ConfigErrors::new(),
            warnings: Vec::new(),
        };

        for key in raw.keys() {
            if !fields::ALL.contains(&key.as_str()) {
                log::debug!("ignoring unknown configuration key '{key}'");
            }
        }

        // Presence and type
        let namespace = v.namespace(raw);
        let project_type = v.required_string(raw, fields::PROJECT_TYPE);
        let wordpress_version =
            v.optional_ascii(raw, fields::WORDPRESS_VERSION, DEFAULT_WORDPRESS_VERSION);
        let php_version = v.optional_string(raw, fields::PHP_VERSION);
        let language = v.optional_ascii(raw, fields::LANGUAGE, DEFAULT_LANGUAGE);
        let mysql_version = v.optional_ascii(raw, fields::MYSQL_VERSION, DEFAULT_MYSQL_VERSION);
        let use_selenoid = v.optional_bool(raw, fields::USE_SELENOID, true);
        let image_path = v.optional_string(raw, fields::IMAGE_PATH);
        let custom_init_scripts = v.string_list(raw, fields::CUSTOM_INIT_SCRIPTS);
        let download_plugins = v.string_list(raw, fields::DOWNLOAD_PLUGINS);
        let download_themes = v.string_list(raw, fields::DOWNLOAD_THEMES);
        let ssh_entries = v.object_list(raw, fields::SSH);
        let ftp_entries = v.object_list(raw, fields::FTP);
        let envvars = v.envvars(raw);

        // Enumerations
        let project_type = project_type.and_then(|value| {
            v.one_of(fields::PROJECT_TYPE, &value, ProjectType::NAMES, ProjectType::parse)
        });
        let php_version = match php_version {
            Some(value) => v.one_of(fields::PHP_VERSION, &value, PhpVersion::NAMES, PhpVersion::parse),
            None => Some(PhpVersion::default()),
        };

        // Uniqueness
        v.unique(fields::DOWNLOAD_PLUGINS, &download_plugins);
        v.unique(fields::DOWNLOAD_THEMES, &download_themes);
        v.unique(fields::CUSTOM_INIT_SCRIPTS, &custom_init_scripts);

        // File references
        if let Some(ref path) = image_path {
            v.readable_file(fields::IMAGE_PATH, path);
        }
        for (i, script) in custom_init_scripts.iter().enumerate() {
            v.readable_file(&format!("{}.{i}", fields::CUSTOM_INIT_SCRIPTS), script);
        }

        // Nested entries
        let ssh: Vec<SshEntry> = ssh_entries
            .iter()
            .map(|(i, entry)| v.ssh_entry(*i, entry))
            .collect();
        let ftp: Vec<FtpEntry> = ftp_entries
            .iter()
            .map(|(i, entry)| v.ftp_entry(*i, entry))
            .collect();

        let errors = v.errors;
        match (namespace, project_type, php_version) {
            (Some(namespace), Some(project_type), Some(php_version)) if errors.is_empty() => {
                Ok(ValidatedConfig {
                    namespace,
                    project_type,
                    wordpress_version,
                    php_version,
                    language,
                    mysql_version,
                    use_selenoid,
                    image_path: image_path.map(PathBuf::from),
                    custom_init_scripts: custom_init_scripts.into_iter().map(PathBuf::from).collect(),
                    ssh,
                    ftp,
                    download_plugins,
                    download_themes,
                    envvars,
                    warnings: v.warnings,
                    marker: Validated,
                })
            }
            _ => Err(errors),
        }
    }

    /// Validate one `ssh` element.
    ///
    /// `privateKeyPath`, `host` and `user` become required once the entry
    /// lists any plugin or theme.
    fn ssh_entry(&mut self, index: usize, entry: &RawConfig) -> SshEntry {
        let prefix = format!("{}.{index}", fields::SSH);

        let private_key_path = self.optional_string_at(entry, &prefix, "privateKeyPath");
        let host = self.optional_string_at(entry, &prefix, "host");
        let user = self.optional_string_at(entry, &prefix, "user");
        let plugins = self.string_list_at(entry, &prefix, "plugins");
        let themes = self.string_list_at(entry, &prefix, "themes");

        self.unique(&join(&prefix, "plugins"), &plugins);
        self.unique(&join(&prefix, "themes"), &themes);

        if !plugins.is_empty() || !themes.is_empty() {
            for (key, value) in [
                ("privateKeyPath", &private_key_path),
                ("host", &host),
                ("user", &user),
            ] {
                if value.is_none() && !wrong_type(entry.get(key)) {
                    self.required(&join(&prefix, key));
                }
            }
        }

        if let Some(ref path) = private_key_path {
            self.readable_file(&join(&prefix, "privateKeyPath"), path);
        }

        SshEntry {
            private_key_path: private_key_path.map(PathBuf::from),
            host,
            user,
            plugins,
            themes,
        }
    }

    /// Validate one `ftp` element.
    ///
    /// With a `confpath`, credentials come from that JSON file and the inline
    /// ones are ignored. Without one, `host` and `user` become required once
    /// the entry lists any plugin or theme.
    fn ftp_entry(&mut self, index: usize, entry: &RawConfig) -> FtpEntry {
        let prefix = format!("{}.{index}", fields::FTP);

        let confpath = self.optional_string_at(entry, &prefix, "confpath");
        let mut host = self.optional_string_at(entry, &prefix, "host");
        let mut user = self.optional_string_at(entry, &prefix, "user");
        let mut password = self
            .optional_string_at(entry, &prefix, "password")
            .unwrap_or_default();
        let plugins = self.string_list_at(entry, &prefix, "plugins");
        let themes = self.string_list_at(entry, &prefix, "themes");

        self.unique(&join(&prefix, "plugins"), &plugins);
        self.unique(&join(&prefix, "themes"), &themes);

        if let Some(ref path) = confpath {
            if let Some(credentials) = self.ftp_credentials(&join(&prefix, "confpath"), path) {
                host = Some(credentials.host);
                user = Some(credentials.user);
                password = credentials.password;
            }
        } else if !plugins.is_empty() || !themes.is_empty() {
            for (key, value) in [("host", &host), ("user", &user)] {
                if value.is_none() && !wrong_type(entry.get(key)) {
                    self.required(&join(&prefix, key));
                }
            }
        }

        FtpEntry {
            confpath: confpath.map(PathBuf::from),
            host,
            user,
            password,
            plugins,
            themes,
        }
    }

    /// Read, decode and check an FTP credentials file.
    ///
    /// Each missing key is reported separately under `<field>.<key>`.
    fn ftp_credentials(&mut self, field: &str, path: &str) -> Option<FtpCredentials> {
        let contents = self.read_file(field, path)?;

        let document: Value = match serde_json::from_slice(&contents) {
            Ok(document) => document,
            Err(e) => {
                log::debug!("{field}: {path} failed to decode: {e}");
                self.errors.add(
                    field,
                    format!("{field} ({path}) does not contain valid JSON"),
                );
                return None;
            }
        };

        let Some(object) = document.as_object() else {
            self.errors
                .add(field, format!("{field} ({path}) must contain a JSON object"));
            return None;
        };

        let host = self.required_string_at(object, field, "host");
        let user = self.required_string_at(object, field, "user");
        let password = object.get("password").and_then(Value::as_str).map(str::to_string);

        // An empty password is allowed; only its presence is checked.
        match object.get("password") {
            None | Some(Value::Null) => self.required(&join(field, "password")),
            Some(Value::String(_)) => {}
            Some(_) => self.type_error(&join(field, "password"), "a string"),
        }

        Some(FtpCredentials {
            host: host?,
            user: user?,
            password: password?,
        })
    }

    /// A missing `namespace` is an error. A present but empty one falls back
    /// to the name of the directory holding the configuration file.
    fn namespace(&mut self, raw: &RawConfig) -> Option<String> {
        let field = fields::NAMESPACE;
        match raw.get(field) {
            Some(Value::String(s)) if s.is_empty() => {
                let fallback = self
                    .base_dir
                    .canonicalize()
                    .ok()
                    .and_then(|dir| default_namespace(&dir));
                let Some(name) = fallback else {
                    self.required(field);
                    return None;
                };
                log::warn!("{EMPTY_NAMESPACE_WARNING}");
                self.warnings.push(EMPTY_NAMESPACE_WARNING.to_string());
                self.ascii(field, &name).then_some(name)
            }
            _ => self.required_ascii(raw, field),
        }
    }

    fn required(&mut self, field: &str) {
        self.errors.add(field, format!("{field} is required"));
    }

    fn type_error(&mut self, field: &str, expected: &str) {
        self.errors.add(field, format!("{field} must be {expected}"));
    }

    /// A string that must be present and non-empty. A value of the wrong
    /// type is reported as a type error only.
    fn required_string(&mut self, raw: &RawConfig, field: &str) -> Option<String> {
        self.required_value(field, raw.get(field))
    }

    fn required_string_at(&mut self, raw: &RawConfig, prefix: &str, key: &str) -> Option<String> {
        self.required_value(&join(prefix, key), raw.get(key))
    }

    fn required_value(&mut self, field: &str, value: Option<&Value>) -> Option<String> {
        let parsed = self.string_value(field, value);
        if parsed.is_none() && !wrong_type(value) {
            self.required(field);
        }
        parsed
    }

    fn required_ascii(&mut self, raw: &RawConfig, field: &str) -> Option<String> {
        let value = self.required_string(raw, field)?;
        self.ascii(field, &value).then_some(value)
    }

    fn optional_ascii(&mut self, raw: &RawConfig, field: &str, default: &str) -> String {
        match self.optional_string(raw, field) {
            Some(value) => {
                self.ascii(field, &value);
                value
            }
            None => default.to_string(),
        }
    }

    /// A top-level string; empty strings and null count as absent.
    fn optional_string(&mut self, raw: &RawConfig, field: &str) -> Option<String> {
        self.string_value(field, raw.get(field))
    }

    fn optional_string_at(&mut self, raw: &RawConfig, prefix: &str, key: &str) -> Option<String> {
        self.string_value(&join(prefix, key), raw.get(key))
    }

    fn string_value(&mut self, field: &str, value: Option<&Value>) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.type_error(field, "a string");
                None
            }
        }
    }

    fn optional_bool(&mut self, raw: &RawConfig, field: &str, default: bool) -> bool {
        match raw.get(field) {
            None | Some(Value::Null) => default,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.type_error(field, "a boolean");
                default
            }
        }
    }

    fn ascii(&mut self, field: &str, value: &str) -> bool {
        if value.is_ascii() {
            true
        } else {
            self.errors
                .add(field, format!("{field} must contain ASCII characters only"));
            false
        }
    }

    fn one_of<T>(
        &mut self,
        field: &str,
        value: &str,
        names: &[&str],
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let parsed = parse(value);
        if parsed.is_none() {
            let allowed = names
                .iter()
                .map(|name| format!("\"{name}\""))
                .collect::<Vec<_>>()
                .join(", ");
            self.errors
                .add(field, format!("{field} must be one of {allowed}"));
        }
        parsed
    }

    fn string_list(&mut self, raw: &RawConfig, field: &str) -> Vec<String> {
        self.strings(field, raw.get(field))
    }

    fn string_list_at(&mut self, raw: &RawConfig, prefix: &str, key: &str) -> Vec<String> {
        self.strings(&join(prefix, key), raw.get(key))
    }

    /// An optional array of strings. Non-string elements are reported by index
    /// and dropped.
    fn strings(&mut self, field: &str, value: Option<&Value>) -> Vec<String> {
        let items = match value {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.type_error(field, "an array");
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                _ => self.type_error(&format!("{field}.{i}"), "a string"),
            }
        }
        out
    }

    /// An optional array of objects, returned with their original indexes.
    fn object_list<'r>(&mut self, raw: &'r RawConfig, field: &str) -> Vec<(usize, &'r RawConfig)> {
        let items = match raw.get(field) {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.type_error(field, "an array");
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item.as_object() {
                Some(object) => out.push((i, object)),
                None => self.type_error(&format!("{field}.{i}"), "an object"),
            }
        }
        out
    }

    fn envvars(&mut self, raw: &RawConfig) -> BTreeMap<String, EnvValue> {
        let field = fields::ENVVARS;
        let object = match raw.get(field) {
            None | Some(Value::Null) => return BTreeMap::new(),
            Some(Value::Object(object)) => object,
            Some(_) => {
                self.type_error(field, "an object");
                return BTreeMap::new();
            }
        };

        let mut out = BTreeMap::new();
        for (key, value) in object {
            match EnvValue::from_json(value) {
                Some(env_value) => {
                    out.insert(key.clone(), env_value);
                }
                None => self.type_error(&join(field, key), "a scalar value"),
            }
        }
        out
    }

    fn unique(&mut self, field: &str, items: &[String]) {
        let mut seen = HashSet::with_capacity(items.len());
        if !items.iter().all(|item| seen.insert(item.as_str())) {
            self.errors
                .add(field, format!("{field} must contain unique elements only"));
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// The file must open and yield at least one read; a directory or a
    /// permission failure is treated the same as a missing file.
    fn readable_file(&mut self, field: &str, path: &str) -> bool {
        let resolved = self.resolve(path);
        let probe = File::open(&resolved).and_then(|mut file| {
            let mut buf = [0u8; 1];
            file.read(&mut buf).map(|_| ())
        });
        match probe {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{field}: cannot read {}: {e}", resolved.display());
                self.errors.add(
                    field,
                    format!("{field} ({path}) does not exist or is not readable"),
                );
                false
            }
        }
    }

    fn read_file(&mut self, field: &str, path: &str) -> Option<Vec<u8>> {
        let resolved = self.resolve(path);
        match fs::read(&resolved) {
            Ok(contents) => Some(contents),
            Err(e) => {
                log::debug!("{field}: cannot read {}: {e}", resolved.display());
                self.errors.add(
                    field,
                    format!("{field} ({path}) does not exist or is not readable"),
                );
                None
            }
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    format!("{prefix}.{key}")
}

/// Present but neither a string nor null; already reported as a type error.
fn wrong_type(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null() && !v.is_string())
}
