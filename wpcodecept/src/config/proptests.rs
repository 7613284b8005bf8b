//! Property-based tests for validation and normalization.

use std::path::Path;

use proptest::prelude::*;
use serde_json::{json, Value};

use super::normalizer::ConfigNormalizer;
use super::schema::{PhpVersion, ProjectType};
use super::validator::ConfigValidator;

fn namespace_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9_-]{0,24}"
}

fn project_type_strategy() -> impl Strategy<Value = ProjectType> {
    prop_oneof![
        Just(ProjectType::Other),
        Just(ProjectType::Plugin),
        Just(ProjectType::Theme),
    ]
}

fn php_version_strategy() -> impl Strategy<Value = PhpVersion> {
    prop_oneof![
        Just(PhpVersion::Php72),
        Just(PhpVersion::Php73),
        Just(PhpVersion::Php74),
        Just(PhpVersion::Php80),
    ]
}

fn validate(raw: &Value) -> Result<super::ValidatedConfig, crate::ConfigErrors> {
    ConfigValidator::validate(raw.as_object().unwrap(), Path::new("."))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    #[test]
    fn derived_names_follow_namespace(
        namespace in namespace_strategy(),
        project_type in project_type_strategy(),
        php in php_version_strategy(),
    ) {
        let raw = json!({
            "namespace": namespace,
            "projectType": project_type.as_str(),
            "phpVersion": php.as_str(),
        });
        let runtime = ConfigNormalizer::normalize(&validate(&raw).unwrap());

        prop_assert_eq!(&runtime.network, &format!("{namespace}_wpcodecept-network"));
        prop_assert_eq!(&runtime.container, &format!("{namespace}-wpcodecept-wordpress"));
        prop_assert_eq!(&runtime.acceptance_dbname, &format!("{namespace}-acceptance"));
        prop_assert_eq!(&runtime.integration_dbname, &format!("{namespace}-integration"));
        prop_assert_eq!(&runtime.wordpress_image, &format!("wpcodecept:latest-{php}"));
        prop_assert_eq!(runtime.project_type, project_type);
    }

    #[test]
    fn normalize_is_deterministic(
        namespace in namespace_strategy(),
        plugins in prop::collection::btree_set("[a-z]{1,12}", 0..6),
    ) {
        let plugins: Vec<String> = plugins.into_iter().collect();
        let raw = json!({
            "namespace": namespace,
            "projectType": "plugin",
            "downloadPlugins": plugins,
        });
        let valid = validate(&raw).unwrap();

        let first = ConfigNormalizer::normalize(&valid);
        let second = ConfigNormalizer::normalize(&valid);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first.download_plugins, &plugins);
    }

    #[test]
    fn duplicate_plugins_always_rejected(
        slugs in prop::collection::vec("[a-z]{1,8}", 1..6),
        dup in any::<prop::sample::Index>(),
    ) {
        let mut slugs = slugs;
        let repeated = slugs[dup.index(slugs.len())].clone();
        slugs.push(repeated);

        let raw = json!({
            "namespace": "acme",
            "projectType": "plugin",
            "downloadPlugins": slugs,
        });
        let errors = validate(&raw).unwrap_err();

        prop_assert!(errors.contains("downloadPlugins"));
        prop_assert_eq!(errors.len(), 1);
    }

    #[test]
    fn non_ascii_namespace_always_rejected(
        prefix in "[a-z]{0,5}",
        suffix in "[a-z]{0,5}",
        c in "[à-ÿぁ-ん]",
    ) {
        let raw = json!({
            "namespace": format!("{prefix}{c}{suffix}"),
            "projectType": "theme",
        });
        let errors = validate(&raw).unwrap_err();

        prop_assert_eq!(
            errors.get("namespace").unwrap(),
            &["namespace must contain ASCII characters only".to_string()][..]
        );
    }
}
