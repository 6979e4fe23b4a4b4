//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Wire-level authentication constants
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const BEARER_SCHEME: &str = "Bearer";
pub const HTTP_UNAUTHORIZED: u16 = 401;

// Sentinel error codes surfaced by the identity provider.
// Matching is exact and case-sensitive.
pub const ID_TOKEN_EXPIRED: &str = "ID_TOKEN_EXPIRED";
pub const ID_TOKEN_REVOKED: &str = "ID_TOKEN_REVOKED";
pub const INVALID_ID_TOKEN: &str = "INVALID_ID_TOKEN";

// Session configuration defaults
pub const DEFAULT_REFRESH_THRESHOLD_SECS: i64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_TRANSPORT_ATTEMPTS: usize = 3;
