//! Configuration structures
//!
//! Consumed by the infra config loader; see `leadarc-infra` for the
//! environment/file loading strategy.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_TRANSPORT_ATTEMPTS, DEFAULT_REFRESH_THRESHOLD_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

/// GraphQL API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint URL (e.g., "https://api.leadarc.app/graphql")
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Total transport attempts (initial try + retries) for 5xx/network
    /// failures. Authentication retries are handled by the pipeline, not
    /// the transport.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

/// Identity-provider session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token refresh endpoint URL
    pub token_endpoint: String,

    /// Optional token revocation endpoint, called best-effort on sign-out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoke_endpoint: Option<String>,

    /// Refresh tokens this many seconds before expiry
    #[serde(default = "default_refresh_threshold")]
    pub refresh_threshold_seconds: i64,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_TRANSPORT_ATTEMPTS
}

fn default_refresh_threshold() -> i64 {
    DEFAULT_REFRESH_THRESHOLD_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/graphql".to_string(),
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_TRANSPORT_ATTEMPTS,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_endpoint: "http://localhost:4000/session/token".to_string(),
            revoke_endpoint: None,
            refresh_threshold_seconds: DEFAULT_REFRESH_THRESHOLD_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { api: ApiConfig::default(), session: SessionConfig::default() }
    }
}
