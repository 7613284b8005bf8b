//! Integration tests for the wpcodecept commands.

mod common;

use common::{TestEnv, MINIMAL_CONFIG};
use predicates::prelude::*;
use std::fs;

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_valid_config() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    env.command()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_reports_every_error() {
    let env = TestEnv::with_config(
        r#"{"namespace": "démo", "projectType": "corn", "downloadThemes": ["a", "a"]}"#,
    );

    env.command()
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("(3 errors)"))
        .stdout(predicate::str::contains(
            "[key: \"namespace\"]: namespace must contain ASCII characters only",
        ))
        .stdout(predicate::str::contains("[key: \"projectType\"]: projectType must be one of"))
        .stdout(predicate::str::contains(
            "[key: \"downloadThemes\"]: downloadThemes must contain unique elements only",
        ));
}

#[test]
fn test_validate_report_is_printed_when_quiet() {
    let env = TestEnv::with_config(r#"{"projectType": "plugin"}"#);

    env.command()
        .arg("--quiet")
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("namespace is required"));
}

#[test]
fn test_validate_json() {
    let env = TestEnv::with_config(r#"{"namespace": "demo"}"#);

    let output = env
        .command()
        .args(["validate", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(
        report["errors"]["projectType"],
        serde_json::json!(["projectType is required"])
    );
}

#[test]
fn test_validate_resolves_files_next_to_config() {
    let env = TestEnv::with_config(
        r#"{
            "namespace": "demo",
            "projectType": "plugin",
            "ssh": [{"privateKeyPath": "keys/id_rsa", "host": "h", "user": "u", "plugins": ["p"]}]
        }"#,
    );
    env.write_file("keys/id_rsa", "KEY");

    // Run from elsewhere so relative paths cannot resolve against the cwd.
    env.command()
        .current_dir(env.path().parent().unwrap())
        .arg("validate")
        .assert()
        .success();
}

#[test]
fn test_validate_empty_namespace_warns_and_defaults() {
    let env = TestEnv::with_config(r#"{"namespace": "", "projectType": "plugin"}"#);

    env.command()
        .arg("validate")
        .assert()
        .success()
        .stderr(predicate::str::contains("[WARNING]"))
        .stderr(predicate::str::contains(
            "defaulting to project directory name as a prefix for containers",
        ));

    let stdout = env.stdout_of(&["show"]);
    let runtime: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(runtime["network"], "my-plugin_wpcodecept-network");
}

#[test]
fn test_validate_uses_config_env_var() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    env.command_bare()
        .current_dir(env.path().parent().unwrap())
        .env("WPCODECEPT_CONFIG", env.config_path())
        .args(["--no-color", "validate"])
        .assert()
        .success();
}

// ============================================================================
// create-config
// ============================================================================

#[test]
fn test_create_config_defaults_namespace_to_dirname() {
    let env = TestEnv::new();

    env.command_bare()
        .args(["--no-color", "create-config", "--type", "theme"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no \"namespace\" field provided"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(env.config_path()).unwrap()).unwrap();
    assert_eq!(written["namespace"], "my-plugin");
    assert_eq!(written["projectType"], "theme");
    assert_eq!(written["phpVersion"], "7.4");

    env.command_bare().arg("validate").assert().success();
}

#[test]
fn test_create_config_with_namespace() {
    let env = TestEnv::new();

    env.command()
        .args(["create-config", "--type", "plugin", "--namespace", "shop"])
        .assert()
        .success()
        .stderr(predicate::str::contains("namespace").not());

    assert!(fs::read_to_string(env.config_path())
        .unwrap()
        .contains("\"namespace\": \"shop\""));
}

#[test]
fn test_create_config_refuses_overwrite() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    env.command()
        .args(["create-config", "--type", "plugin", "--namespace", "other"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(env.config_path()).unwrap(), MINIMAL_CONFIG);

    env.command()
        .args(["create-config", "--type", "plugin", "--namespace", "other", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(env.config_path())
        .unwrap()
        .contains("\"namespace\": \"other\""));
}

#[test]
fn test_create_config_writes_without_validating() {
    let env = TestEnv::new();

    env.command()
        .args(["create-config", "--type", "plugin", "--namespace", "ショップ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ASCII").not());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(env.config_path()).unwrap()).unwrap();
    assert_eq!(written["namespace"], "ショップ");

    // The document is only checked once it is used.
    env.command()
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("namespace must contain ASCII characters only"));
}

#[test]
fn test_create_config_rejects_unknown_type() {
    let env = TestEnv::new();

    env.command()
        .args(["create-config", "--type", "library"])
        .assert()
        .failure();
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_json() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    let stdout = env.stdout_of(&["show"]);
    let runtime: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(runtime["network"], "demo_wpcodecept-network");
    assert_eq!(runtime["container"], "demo-wpcodecept-wordpress");
    assert_eq!(runtime["acceptanceDbname"], "demo-acceptance");
    assert_eq!(runtime["integrationDbname"], "demo-integration");
    assert_eq!(runtime["useSelenoid"], true);
}

#[test]
fn test_show_yaml() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    let stdout = env.stdout_of(&["show", "--format", "yaml"]);
    assert!(stdout.contains("network: demo_wpcodecept-network"));
    assert!(stdout.contains("phpVersion: '7.4'") || stdout.contains("phpVersion: \"7.4\""));
}

#[test]
fn test_show_masks_ftp_passwords() {
    let env = TestEnv::with_config(
        r#"{"namespace": "demo", "projectType": "plugin", "ftp": [{"confpath": "ftp.json", "plugins": ["p"]}]}"#,
    );
    env.write_file(
        "ftp.json",
        r#"{"host": "ftp.example.com", "user": "deploy", "password": "s3cret"}"#,
    );

    let masked = env.stdout_of(&["show"]);
    assert!(!masked.contains("s3cret"));
    assert!(masked.contains("ftp.example.com"));

    let revealed = env.stdout_of(&["show", "--show-secrets"]);
    assert!(revealed.contains("s3cret"));
}

#[test]
fn test_show_is_deterministic() {
    let env = TestEnv::with_config(
        r#"{"namespace": "demo", "projectType": "plugin", "envvars": {"B": 1, "A": "x"}}"#,
    );

    assert_eq!(env.stdout_of(&["show"]), env.stdout_of(&["show"]));
}

// ============================================================================
// plan
// ============================================================================

#[test]
fn test_plan_stop() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    let stdout = env.stdout_of(&["plan", "stop"]);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "docker stop wpcodecept-selenoid",
            "docker stop demo-wpcodecept-wordpress",
            "docker stop wpcodecept-phpmyadmin",
            "docker stop wpcodecept-mysqldb",
        ]
    );
}

#[test]
fn test_plan_down_warns_about_shared_containers() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    env.command()
        .args(["plan", "down"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("docker network rm demo_wpcodecept-network\n"))
        .stderr(predicate::str::contains("[WARNING]"));
}

#[test]
fn test_plan_up_json_keeps_arguments_separate() {
    let env = TestEnv::with_config(
        r#"{"namespace": "demo", "projectType": "plugin", "downloadPlugins": ["a b"], "useSelenoid": false}"#,
    );

    let stdout = env.stdout_of(&["plan", "up", "--json"]);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let commands = plan["commands"].as_array().unwrap();

    let wordpress = commands
        .iter()
        .find(|c| {
            c["args"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("demo-wpcodecept-wordpress"))
        })
        .unwrap();
    assert!(wordpress["args"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!(r#"DOWNLOAD_PLUGINS=["a b","relative-url"]"#)));
}

#[test]
fn test_plan_rejects_unknown_step() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    env.command().args(["plan", "restart"]).assert().failure();
}

// ============================================================================
// env-testing
// ============================================================================

#[test]
fn test_env_testing_prints() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    let stdout = env.stdout_of(&["env-testing"]);
    assert!(stdout.contains("TEST_SITE_DB_NAME=\"demo-acceptance\""));
    assert!(stdout.contains("TEST_DB_NAME=\"demo-integration\""));
    assert!(!env.path().join(".env.testing").exists());
}

#[test]
fn test_env_testing_write() {
    let env = TestEnv::with_config(MINIMAL_CONFIG);

    env.command()
        .args(["env-testing", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let written = fs::read_to_string(env.path().join(".env.testing")).unwrap();
    assert!(written.contains("SELENOID_PORT=4444"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();

    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wpcodecept"));
}
