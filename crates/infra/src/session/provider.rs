//! HTTP-backed session provider
//!
//! Implements the core `IdentityProvider` port against the identity
//! provider's token-refresh endpoint. The provider owns the in-memory
//! session store; all mutation goes through one async lock so concurrent
//! pipeline instances observe a consistent session.

use async_trait::async_trait;
use leadarc_core::IdentityProvider;
use leadarc_domain::{Credential, LeadArcError, Result, SessionConfig, SessionTokens};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::http::HttpClient;

/// Token endpoint response (refresh_token grant)
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    id_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
}

/// Session provider backed by the identity provider's HTTP endpoints
pub struct SessionProvider {
    http: HttpClient,
    config: SessionConfig,
    session: RwLock<Option<SessionTokens>>,
}

impl SessionProvider {
    /// Create a provider with an empty session store
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: SessionConfig) -> Result<Self> {
        let http = HttpClient::new()?;
        Ok(Self { http, config, session: RwLock::new(None) })
    }

    /// Seed the session store after an external sign-in flow
    pub async fn install_session(&self, tokens: SessionTokens) {
        *self.session.write().await = Some(tokens);
        info!("session installed");
    }

    /// Whether a session is currently active
    pub async fn is_signed_in(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Exchange the refresh token for fresh session tokens
    ///
    /// Returns `Ok(None)` when the endpoint rejects the refresh token (the
    /// session is truly gone); the caller clears the store in that case.
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<Option<SessionTokens>> {
        let builder = self
            .http
            .request(Method::POST, &self.config.token_endpoint)
            .json(&json!({ "grant_type": "refresh_token", "refresh_token": refresh_token }));

        let response = self.http.send(builder).await?;
        let status = response.status();

        if status.is_client_error() {
            warn!(%status, "refresh token rejected by identity provider");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(LeadArcError::Auth(format!(
                "token endpoint returned status {status}"
            )));
        }

        let tokens: TokenEndpointResponse = response
            .json()
            .await
            .map_err(|err| LeadArcError::Auth(format!("failed to parse token response: {err}")))?;

        Ok(Some(SessionTokens::new(tokens.id_token, tokens.refresh_token, tokens.expires_in)))
    }

    /// Refresh the session and hand out a credential
    async fn refresh(&self, refresh_token: &str, forced: bool) -> Result<Option<Credential>> {
        match self.exchange_refresh_token(refresh_token).await? {
            Some(tokens) => {
                let credential = if forced {
                    Credential::forced(tokens.id_token.clone())
                } else {
                    Credential::new(tokens.id_token.clone())
                };

                *self.session.write().await = Some(tokens);
                debug!(forced, "session tokens refreshed");
                Ok(Some(credential))
            }
            None => {
                // Session gone; clear the stale store
                self.session.write().await.take();
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for SessionProvider {
    async fn get_token(&self, force_refresh: bool) -> Result<Option<Credential>> {
        let (cached, refresh_token, refresh_due) = {
            let guard = self.session.read().await;
            match guard.as_ref() {
                None => return Ok(None),
                Some(tokens) => (
                    tokens.id_token.clone(),
                    tokens.refresh_token.clone(),
                    tokens.is_expired(self.config.refresh_threshold_seconds),
                ),
            }
        };

        if !force_refresh && !refresh_due {
            return Ok(Some(Credential::new(cached)));
        }

        let Some(refresh_token) = refresh_token else {
            // Nothing to refresh with; the session cannot be renewed
            warn!("session has no refresh token; clearing");
            self.session.write().await.take();
            return Ok(None);
        };

        self.refresh(&refresh_token, force_refresh).await
    }

    async fn sign_out(&self) -> Result<()> {
        let tokens = self.session.write().await.take();
        info!("session cleared");

        // Best-effort revocation; failures are swallowed
        if let (Some(endpoint), Some(tokens)) = (self.config.revoke_endpoint.as_ref(), tokens) {
            let builder = self
                .http
                .request(Method::POST, endpoint)
                .json(&json!({ "refresh_token": tokens.refresh_token }));

            if let Err(error) = self.http.send(builder).await {
                debug!(error = %error, "token revocation failed");
            }
        }

        Ok(())
    }
}
