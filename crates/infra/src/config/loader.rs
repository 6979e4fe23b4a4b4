//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables (`.env` files are
//!    honored via dotenvy)
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `LEADARC_API_ENDPOINT`: GraphQL endpoint URL (required)
//! - `LEADARC_API_TIMEOUT`: Per-request timeout in seconds
//! - `LEADARC_API_MAX_ATTEMPTS`: Transport attempts for 5xx/network failures
//! - `LEADARC_TOKEN_ENDPOINT`: Identity-provider token endpoint (required)
//! - `LEADARC_REVOKE_ENDPOINT`: Optional token revocation endpoint
//! - `LEADARC_REFRESH_THRESHOLD`: Seconds before expiry to refresh tokens
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./leadarc.json` or `./leadarc.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use leadarc_domain::constants::{
    DEFAULT_MAX_TRANSPORT_ATTEMPTS, DEFAULT_REFRESH_THRESHOLD_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use leadarc_domain::{ApiConfig, Config, LeadArcError, Result, SessionConfig};
use url::Url;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `LeadArcError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // Pull in a .env file when present; missing files are fine
    dotenvy::dotenv().ok();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The endpoint variables are required; everything else falls back to
/// domain defaults.
///
/// # Errors
/// Returns `LeadArcError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let endpoint = required_url("LEADARC_API_ENDPOINT")?;
    let timeout_seconds = env_u64("LEADARC_API_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    let max_attempts = env_u64("LEADARC_API_MAX_ATTEMPTS", DEFAULT_MAX_TRANSPORT_ATTEMPTS as u64)?;

    let token_endpoint = required_url("LEADARC_TOKEN_ENDPOINT")?;
    let revoke_endpoint = match std::env::var("LEADARC_REVOKE_ENDPOINT").ok() {
        Some(value) => Some(validate_url("LEADARC_REVOKE_ENDPOINT", &value)?),
        None => None,
    };
    let refresh_threshold_seconds =
        env_i64("LEADARC_REFRESH_THRESHOLD", DEFAULT_REFRESH_THRESHOLD_SECS)?;

    Ok(Config {
        api: ApiConfig { endpoint, timeout_seconds, max_attempts: max_attempts as usize },
        session: SessionConfig { token_endpoint, revoke_endpoint, refresh_threshold_seconds },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `LeadArcError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LeadArcError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LeadArcError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LeadArcError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `LeadArcError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LeadArcError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LeadArcError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(LeadArcError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the executable
/// directory for `config.{json,toml}` / `leadarc.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("leadarc.json"),
            cwd.join("leadarc.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("leadarc.json"),
                exe_dir.join("leadarc.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get a required environment variable holding a URL
fn required_url(key: &str) -> Result<String> {
    let value = std::env::var(key).map_err(|_| {
        LeadArcError::Config(format!("Missing required environment variable: {}", key))
    })?;
    validate_url(key, &value)
}

/// Validate that a value parses as an absolute URL
fn validate_url(key: &str, value: &str) -> Result<String> {
    Url::parse(value)
        .map_err(|e| LeadArcError::Config(format!("Invalid URL in {}: {}", key, e)))?;
    Ok(value.to_string())
}

/// Parse an unsigned integer from an environment variable with a default
fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key).ok() {
        Some(value) => value
            .parse::<u64>()
            .map_err(|e| LeadArcError::Config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(default),
    }
}

/// Parse a signed integer from an environment variable with a default
fn env_i64(key: &str, default: i64) -> Result<i64> {
    match std::env::var(key).ok() {
        Some(value) => value
            .parse::<i64>()
            .map_err(|e| LeadArcError::Config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_leadarc_env() {
        for key in [
            "LEADARC_API_ENDPOINT",
            "LEADARC_API_TIMEOUT",
            "LEADARC_API_MAX_ATTEMPTS",
            "LEADARC_TOKEN_ENDPOINT",
            "LEADARC_REVOKE_ENDPOINT",
            "LEADARC_REFRESH_THRESHOLD",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_leadarc_env();

        std::env::set_var("LEADARC_API_ENDPOINT", "https://api.leadarc.app/graphql");
        std::env::set_var("LEADARC_API_TIMEOUT", "10");
        std::env::set_var("LEADARC_API_MAX_ATTEMPTS", "2");
        std::env::set_var("LEADARC_TOKEN_ENDPOINT", "https://auth.leadarc.app/token");
        std::env::set_var("LEADARC_REVOKE_ENDPOINT", "https://auth.leadarc.app/revoke");
        std::env::set_var("LEADARC_REFRESH_THRESHOLD", "120");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.api.endpoint, "https://api.leadarc.app/graphql");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.api.max_attempts, 2);
        assert_eq!(config.session.token_endpoint, "https://auth.leadarc.app/token");
        assert_eq!(
            config.session.revoke_endpoint,
            Some("https://auth.leadarc.app/revoke".to_string())
        );
        assert_eq!(config.session.refresh_threshold_seconds, 120);

        clear_leadarc_env();
    }

    #[test]
    fn test_load_from_env_defaults_apply() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_leadarc_env();

        std::env::set_var("LEADARC_API_ENDPOINT", "https://api.leadarc.app/graphql");
        std::env::set_var("LEADARC_TOKEN_ENDPOINT", "https://auth.leadarc.app/token");

        let config = load_from_env().expect("config should load with defaults");
        assert_eq!(config.api.timeout_seconds, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.api.max_attempts, DEFAULT_MAX_TRANSPORT_ATTEMPTS);
        assert!(config.session.revoke_endpoint.is_none());
        assert_eq!(config.session.refresh_threshold_seconds, DEFAULT_REFRESH_THRESHOLD_SECS);

        clear_leadarc_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_leadarc_env();

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with missing env var");

        let err = result.unwrap_err();
        assert!(matches!(err, LeadArcError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_leadarc_env();

        std::env::set_var("LEADARC_API_ENDPOINT", "https://api.leadarc.app/graphql");
        std::env::set_var("LEADARC_TOKEN_ENDPOINT", "https://auth.leadarc.app/token");
        std::env::set_var("LEADARC_API_TIMEOUT", "not-a-number");

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with invalid timeout");

        clear_leadarc_env();
    }

    #[test]
    fn test_load_from_env_invalid_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_leadarc_env();

        std::env::set_var("LEADARC_API_ENDPOINT", "not a url");
        std::env::set_var("LEADARC_TOKEN_ENDPOINT", "https://auth.leadarc.app/token");

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with invalid endpoint URL");

        clear_leadarc_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "api": {
                "endpoint": "https://api.leadarc.app/graphql",
                "timeout_seconds": 15,
                "max_attempts": 2
            },
            "session": {
                "token_endpoint": "https://auth.leadarc.app/token",
                "refresh_threshold_seconds": 60
            }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from JSON file");

        let config = result.unwrap();
        assert_eq!(config.api.endpoint, "https://api.leadarc.app/graphql");
        assert_eq!(config.api.timeout_seconds, 15);
        assert_eq!(config.session.refresh_threshold_seconds, 60);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[api]
endpoint = "https://api.leadarc.app/graphql"
timeout_seconds = 20

[session]
token_endpoint = "https://auth.leadarc.app/token"
revoke_endpoint = "https://auth.leadarc.app/revoke"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from TOML file");

        let config = result.unwrap();
        assert_eq!(config.api.timeout_seconds, 20);
        assert_eq!(
            config.session.revoke_endpoint,
            Some("https://auth.leadarc.app/revoke".to_string())
        );
        // Unset values fall back to serde defaults
        assert_eq!(config.api.max_attempts, DEFAULT_MAX_TRANSPORT_ATTEMPTS);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(result.is_err(), "Should fail when file not found");

        let err = result.unwrap_err();
        assert!(matches!(err, LeadArcError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let invalid_json = r#"{ "this is": "not valid json" "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_json.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_err(), "Should fail with invalid JSON");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let content = "some content";
        let path = PathBuf::from("test.yaml");
        let result = parse_config(content, &path);
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
