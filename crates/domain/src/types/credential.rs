//! Credential and session token types
//!
//! A [`Credential`] is the per-request bearer token handed to the pipeline;
//! it is fetched on demand and discarded after attachment. [`SessionTokens`]
//! is the identity provider's stored session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::BEARER_SCHEME;

/// Opaque bearer credential for one outgoing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// The bearer token value
    pub token: String,

    /// Whether this credential was obtained through a forced
    /// (cache-bypassing) refresh
    pub forced: bool,

    /// When the credential was handed out
    pub obtained_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential from a cached (non-forced) token fetch
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), forced: false, obtained_at: Utc::now() }
    }

    /// Create a credential from a forced refresh
    #[must_use]
    pub fn forced(token: impl Into<String>) -> Self {
        Self { token: token.into(), forced: true, obtained_at: Utc::now() }
    }

    /// Render the exact `Authorization` header value: `Bearer <token>`
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("{} {}", BEARER_SCHEME, self.token)
    }
}

/// Session state held by the identity provider
///
/// Combines the short-lived id token with the long-lived refresh token and
/// the absolute expiry used to decide when a refresh is due.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    /// Short-lived id token presented as the bearer credential
    pub id_token: String,

    /// Refresh token for obtaining new id tokens
    /// Optional because a session seeded from a one-shot sign-in may not
    /// carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Absolute expiration timestamp (UTC), calculated from the provider's
    /// `expires_in` at issuance time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionTokens {
    /// Create session tokens with a calculated expiration time
    ///
    /// # Arguments
    /// * `id_token` - The id token
    /// * `refresh_token` - Optional refresh token
    /// * `expires_in` - Token lifetime in seconds (0 = no expiry)
    #[must_use]
    pub fn new(id_token: String, refresh_token: Option<String>, expires_in: i64) -> Self {
        let expires_at = if expires_in > 0 {
            Some(Utc::now() + chrono::Duration::seconds(expires_in))
        } else {
            None
        };

        Self { id_token, refresh_token, expires_at }
    }

    /// Check if the id token is expired or will expire within the given
    /// threshold
    ///
    /// Returns `false` when no expiry is set.
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let threshold = chrono::Duration::seconds(threshold_seconds);
                Utc::now() + threshold >= expires_at
            }
            None => false,
        }
    }

    /// Get seconds until token expiration, or `None` if no expiry is set
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }
}
