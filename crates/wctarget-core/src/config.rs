use std::env::VarError;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ConfigError;

const DEFAULT_API_VERSION: &str = "wc/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "target-woocommerce/0.1";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Fully resolved connector configuration.
#[derive(Clone)]
pub struct TargetConfig {
    pub site_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    /// Directory expected to contain `products.json`.
    pub input_path: PathBuf,
    pub api_version: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Send credentials as `consumer_key`/`consumer_secret` query parameters
    /// instead of HTTP basic auth.
    pub query_string_auth: bool,
    pub verify_ssl: bool,
    pub log_level: String,
    /// Exit non-zero when the platform rejects any upload step.
    pub fail_on_error: bool,
}

impl std::fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetConfig")
            .field("site_url", &self.site_url)
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("input_path", &self.input_path)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("query_string_auth", &self.query_string_auth)
            .field("verify_ssl", &self.verify_ssl)
            .field("log_level", &self.log_level)
            .field("fail_on_error", &self.fail_on_error)
            .finish()
    }
}

/// On-disk shape of the config file. Every field is optional here so that
/// environment overrides can fill the gaps before validation.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    site_url: Option<String>,
    consumer_key: Option<String>,
    consumer_secret: Option<String>,
    input_path: Option<PathBuf>,
    #[serde(alias = "version")]
    api_version: Option<String>,
    #[serde(alias = "timeout")]
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    query_string_auth: Option<bool>,
    verify_ssl: Option<bool>,
    log_level: Option<String>,
    fail_on_error: Option<bool>,
}

/// Load the connector configuration from a JSON file, applying overrides
/// from the process environment.
///
/// Does not load `.env` files; the binary does that before calling here.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, a required
/// field is missing, or a value fails validation.
pub fn load_config(path: &Path) -> Result<TargetConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_config(&content, path, |key| std::env::var(key))
}

/// Parse config file contents and resolve them against the provided env-var
/// lookup. Decoupled from the real environment so tests can pass a map.
fn parse_config<F>(content: &str, path: &Path, lookup: F) -> Result<TargetConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let file: ConfigFile = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    build_config(file, lookup)
}

fn build_config<F>(file: ConfigFile, lookup: F) -> Result<TargetConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    // Blank env values count as unset.
    let env = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let require = |field: &str, value: Option<String>| -> Result<String, ConfigError> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingField(field.to_string()))
    };

    let site_url = require(
        "site_url",
        env("WOOCOMMERCE_SITE_URL").or(file.site_url),
    )?;
    validate_site_url(&site_url)?;

    let consumer_key = require(
        "consumer_key",
        env("WOOCOMMERCE_CONSUMER_KEY").or(file.consumer_key),
    )?;
    let consumer_secret = require(
        "consumer_secret",
        env("WOOCOMMERCE_CONSUMER_SECRET").or(file.consumer_secret),
    )?;

    let input_path = file
        .input_path
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| ConfigError::MissingField("input_path".to_string()))?;

    let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            field: "timeout_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let log_level = env("TARGET_WOOCOMMERCE_LOG_LEVEL")
        .or(file.log_level)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    Ok(TargetConfig {
        site_url,
        consumer_key,
        consumer_secret,
        input_path,
        api_version: file
            .api_version
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        timeout_secs,
        user_agent: file
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        query_string_auth: file.query_string_auth.unwrap_or(false),
        verify_ssl: file.verify_ssl.unwrap_or(true),
        log_level,
        fail_on_error: file.fail_on_error.unwrap_or(false),
    })
}

fn validate_site_url(site_url: &str) -> Result<(), ConfigError> {
    let rest = site_url
        .strip_prefix("https://")
        .or_else(|| site_url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => Err(ConfigError::Invalid {
            field: "site_url".to_string(),
            reason: format!("'{site_url}' is not an absolute http(s) URL"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
