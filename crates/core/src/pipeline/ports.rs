//! Port interfaces for the request pipeline

use async_trait::async_trait;
use leadarc_domain::{Credential, GraphQlRequest, GraphQlResponse, RequestFailure, Result};

/// Trait for providing bearer credentials
///
/// This trait abstracts the identity provider to enable testing with mock
/// implementations. The provider owns the session store and serializes all
/// mutation of it; the pipeline never caches a credential beyond one
/// outgoing request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch a credential for an outgoing request
    ///
    /// # Arguments
    /// * `force_refresh` - When `true`, bypass any provider-side cache and
    ///   mint a fresh credential
    ///
    /// # Returns
    /// `Ok(None)` when no session is active (the request goes out
    /// unauthenticated)
    ///
    /// # Errors
    /// Returns error if the provider cannot be reached; callers treat this
    /// the same as `Ok(None)`
    async fn get_token(&self, force_refresh: bool) -> Result<Option<Credential>>;

    /// Tear down the active session
    ///
    /// # Errors
    /// Returns error if teardown fails; callers invoke this fire-and-forget
    /// and swallow failures
    async fn sign_out(&self) -> Result<()>;
}

/// Result of one dispatch attempt through the transport
#[derive(Debug, Clone)]
pub enum Dispatched {
    /// Response received with no protocol-level errors
    Completed(GraphQlResponse),

    /// The attempt failed; carries the normalized failure
    Failed(RequestFailure),
}

/// Trait for dispatching a GraphQL request over the wire
///
/// Implementations normalize protocol-level error payloads and
/// transport-level failures into [`RequestFailure`] before the pipeline
/// classifies them.
#[async_trait]
pub trait GraphQlDispatcher: Send + Sync {
    /// Send the request and normalize its result
    ///
    /// # Errors
    /// Returns error only for infrastructure misuse (e.g., a request body
    /// that cannot be serialized); failed attempts are reported as
    /// `Dispatched::Failed`, not as `Err`
    async fn dispatch(&self, request: &GraphQlRequest) -> Result<Dispatched>;
}
