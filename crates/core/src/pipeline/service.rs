//! Request pipeline service - core business logic

use std::sync::Arc;

use leadarc_domain::constants::AUTHORIZATION_HEADER;
use leadarc_domain::{Completion, GraphQlRequest, Outcome, Result};
use tracing::{debug, warn};

use super::classifier::classify_failure;
use super::diagnostics::report_diagnostics;
use super::ports::{Dispatched, GraphQlDispatcher, IdentityProvider};

/// Authenticated request pipeline
///
/// Ensures every outgoing API call carries a valid bearer credential and
/// recovers transparently from an expired credential (one forced refresh +
/// one retry) while escalating a revoked credential to session teardown.
///
/// Per-request state machine:
///
/// ```text
/// DISPATCHED --(success)--------------------> DONE
/// DISPATCHED --(failure, OtherError)--------> DONE(error)
/// DISPATCHED --(failure, AuthExpired)-------> REFRESHING
/// REFRESHING --(refresh ok)-----------------> RETRYING
/// REFRESHING --(refresh failed/empty)-------> DONE(abandoned)
/// RETRYING   --(any outcome)----------------> DONE
/// DISPATCHED --(failure, AuthInvalid)-------> SIGNING_OUT --> DONE(abandoned)
/// ```
///
/// No state is revisited, which bounds retries to exactly one.
pub struct RequestPipeline {
    identity: Arc<dyn IdentityProvider>,
    dispatcher: Arc<dyn GraphQlDispatcher>,
}

impl RequestPipeline {
    /// Create a new pipeline from injected capabilities
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        dispatcher: Arc<dyn GraphQlDispatcher>,
    ) -> Self {
        Self { identity, dispatcher }
    }

    /// Execute one originating request through the full pipeline
    ///
    /// Composes attach -> dispatch -> (classify -> handle)? and returns the
    /// terminal [`Completion`].
    ///
    /// # Errors
    /// Returns error only when the dispatcher reports infrastructure misuse;
    /// failed attempts surface as `Completion::Failed` or
    /// `Completion::Abandoned`.
    pub async fn execute(&self, mut request: GraphQlRequest) -> Result<Completion> {
        self.attach_credential(&mut request).await;

        match self.dispatcher.dispatch(&request).await? {
            Dispatched::Completed(response) => Ok(Completion::Success(response)),
            Dispatched::Failed(failure) => self.handle_failure(failure, request).await,
        }
    }

    /// Attach a non-forced credential to the outgoing request
    ///
    /// No active session (or a provider error, which is swallowed) forwards
    /// the request unmodified; otherwise the `Authorization` header is set
    /// to `Bearer <token>`, overriding any prior value. Never fails.
    pub async fn attach_credential(&self, request: &mut GraphQlRequest) {
        match self.identity.get_token(false).await {
            Ok(Some(credential)) => {
                request.set_header(AUTHORIZATION_HEADER, credential.authorization_value());
            }
            Ok(None) => {
                debug!(request_id = %request.id, "no active session; forwarding unauthenticated");
            }
            Err(error) => {
                // Provider errors degrade to "no credential attached"
                debug!(request_id = %request.id, error = %error, "credential fetch failed");
            }
        }
    }

    /// Handle a classified dispatch failure
    ///
    /// - `AuthExpired`: forced refresh, then exactly one re-dispatch whose
    ///   result is returned verbatim (never re-classified).
    /// - `AuthInvalid`: fire-and-forget sign-out, request abandoned.
    /// - `OtherError`: the failure is handed back untouched.
    ///
    /// # Errors
    /// Returns error only when the retry dispatch reports infrastructure
    /// misuse.
    pub async fn handle_failure(
        &self,
        failure: leadarc_domain::RequestFailure,
        mut request: GraphQlRequest,
    ) -> Result<Completion> {
        report_diagnostics(&failure);

        match classify_failure(&failure) {
            Outcome::AuthExpired => {
                let credential = match self.identity.get_token(true).await {
                    Ok(credential) => credential,
                    Err(error) => {
                        warn!(request_id = %request.id, error = %error, "forced refresh failed");
                        None
                    }
                };

                let Some(credential) = credential else {
                    // Session truly gone; the request is not retried
                    debug!(request_id = %request.id, "refresh yielded no credential; abandoning");
                    return Ok(Completion::Abandoned);
                };

                request.set_header(AUTHORIZATION_HEADER, credential.authorization_value());

                match self.dispatcher.dispatch(&request).await? {
                    Dispatched::Completed(response) => Ok(Completion::Success(response)),
                    Dispatched::Failed(retry_failure) => {
                        report_diagnostics(&retry_failure);
                        Ok(Completion::Failed(retry_failure))
                    }
                }
            }
            Outcome::AuthInvalid => {
                warn!(request_id = %request.id, "credential revoked; tearing down session");

                let identity = self.identity.clone();
                tokio::spawn(async move {
                    if let Err(error) = identity.sign_out().await {
                        debug!(error = %error, "sign-out failed");
                    }
                });

                Ok(Completion::Abandoned)
            }
            Outcome::OtherError => Ok(Completion::Failed(failure)),
        }
    }
}
