use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn no_env() -> HashMap<&'static str, &'static str> {
    HashMap::new()
}

const FULL_CONFIG: &str = r#"{
    "site_url": "https://shop.example.com",
    "consumer_key": "ck_test",
    "consumer_secret": "cs_test",
    "input_path": "/data/input"
}"#;

fn parse(content: &str, env: &HashMap<&str, &str>) -> Result<TargetConfig, ConfigError> {
    parse_config(content, Path::new("config.json"), lookup_from_map(env))
}

#[test]
fn parse_config_applies_defaults() {
    let env = no_env();
    let cfg = parse(FULL_CONFIG, &env).expect("expected valid config");
    assert_eq!(cfg.site_url, "https://shop.example.com");
    assert_eq!(cfg.consumer_key, "ck_test");
    assert_eq!(cfg.consumer_secret, "cs_test");
    assert_eq!(cfg.input_path, PathBuf::from("/data/input"));
    assert_eq!(cfg.api_version, "wc/v3");
    assert_eq!(cfg.timeout_secs, 30);
    assert_eq!(cfg.user_agent, "target-woocommerce/0.1");
    assert!(!cfg.query_string_auth);
    assert!(cfg.verify_ssl);
    assert_eq!(cfg.log_level, "info");
    assert!(!cfg.fail_on_error);
}

#[test]
fn parse_config_reads_optional_fields_and_aliases() {
    let env = no_env();
    let content = r#"{
        "site_url": "http://localhost:8080",
        "consumer_key": "ck",
        "consumer_secret": "cs",
        "input_path": "./in",
        "version": "wc/v2",
        "timeout": 5,
        "query_string_auth": true,
        "verify_ssl": false,
        "fail_on_error": true,
        "extra_key_from_other_tools": {"ignored": true}
    }"#;
    let cfg = parse(content, &env).expect("expected valid config");
    assert_eq!(cfg.api_version, "wc/v2");
    assert_eq!(cfg.timeout_secs, 5);
    assert!(cfg.query_string_auth);
    assert!(!cfg.verify_ssl);
    assert!(cfg.fail_on_error);
}

#[test]
fn parse_config_fails_without_site_url() {
    let env = no_env();
    let content = r#"{"consumer_key": "ck", "consumer_secret": "cs", "input_path": "/in"}"#;
    let result = parse(content, &env);
    assert!(
        matches!(result, Err(ConfigError::MissingField(ref f)) if f == "site_url"),
        "expected MissingField(site_url), got: {result:?}"
    );
}

#[test]
fn parse_config_fails_without_input_path() {
    let env = no_env();
    let content =
        r#"{"site_url": "https://shop.example.com", "consumer_key": "ck", "consumer_secret": "cs"}"#;
    let result = parse(content, &env);
    assert!(
        matches!(result, Err(ConfigError::MissingField(ref f)) if f == "input_path"),
        "expected MissingField(input_path), got: {result:?}"
    );
}

#[test]
fn parse_config_treats_blank_secret_as_missing() {
    let env = no_env();
    let content = r#"{
        "site_url": "https://shop.example.com",
        "consumer_key": "ck",
        "consumer_secret": "   ",
        "input_path": "/in"
    }"#;
    let result = parse(content, &env);
    assert!(
        matches!(result, Err(ConfigError::MissingField(ref f)) if f == "consumer_secret"),
        "expected MissingField(consumer_secret), got: {result:?}"
    );
}

#[test]
fn parse_config_secrets_from_env() {
    let mut env = no_env();
    env.insert("WOOCOMMERCE_CONSUMER_KEY", "ck_env");
    env.insert("WOOCOMMERCE_CONSUMER_SECRET", "cs_env");
    let content = r#"{"site_url": "https://shop.example.com", "input_path": "/in"}"#;
    let cfg = parse(content, &env).expect("expected env secrets to satisfy config");
    assert_eq!(cfg.consumer_key, "ck_env");
    assert_eq!(cfg.consumer_secret, "cs_env");
}

#[test]
fn parse_config_env_overrides_file_values() {
    let mut env = no_env();
    env.insert("WOOCOMMERCE_SITE_URL", "https://staging.example.com");
    env.insert("TARGET_WOOCOMMERCE_LOG_LEVEL", "debug");
    let cfg = parse(FULL_CONFIG, &env).unwrap();
    assert_eq!(cfg.site_url, "https://staging.example.com");
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn parse_config_ignores_blank_env_override() {
    let mut env = no_env();
    env.insert("WOOCOMMERCE_CONSUMER_KEY", "");
    let cfg = parse(FULL_CONFIG, &env).unwrap();
    assert_eq!(cfg.consumer_key, "ck_test");
}

#[test]
fn parse_config_rejects_relative_site_url() {
    let env = no_env();
    let content = r#"{
        "site_url": "shop.example.com",
        "consumer_key": "ck",
        "consumer_secret": "cs",
        "input_path": "/in"
    }"#;
    let result = parse(content, &env);
    assert!(
        matches!(result, Err(ConfigError::Invalid { ref field, .. }) if field == "site_url"),
        "expected Invalid(site_url), got: {result:?}"
    );
}

#[test]
fn parse_config_rejects_zero_timeout() {
    let env = no_env();
    let content = r#"{
        "site_url": "https://shop.example.com",
        "consumer_key": "ck",
        "consumer_secret": "cs",
        "input_path": "/in",
        "timeout_secs": 0
    }"#;
    let result = parse(content, &env);
    assert!(
        matches!(result, Err(ConfigError::Invalid { ref field, .. }) if field == "timeout_secs"),
        "expected Invalid(timeout_secs), got: {result:?}"
    );
}

#[test]
fn parse_config_reports_malformed_json() {
    let env = no_env();
    let result = parse("{not json", &env);
    assert!(
        matches!(result, Err(ConfigError::Parse { ref path, .. }) if path == "config.json"),
        "expected Parse error, got: {result:?}"
    );
}

#[test]
fn load_config_reports_missing_file() {
    let result = load_config(Path::new("/definitely/not/here/config.json"));
    assert!(
        matches!(result, Err(ConfigError::Io { .. })),
        "expected Io error, got: {result:?}"
    );
}

#[test]
fn debug_redacts_credentials() {
    let env = no_env();
    let cfg = parse(FULL_CONFIG, &env).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("ck_test"), "consumer key leaked: {rendered}");
    assert!(!rendered.contains("cs_test"), "consumer secret leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
