//! Failure classification and terminal pipeline results

use serde::{Deserialize, Serialize};

use super::graphql::{GraphQlResponse, RequestFailure};

/// Normalized classification of a failed request attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Expired credential; recoverable with one forced refresh + retry
    AuthExpired,

    /// Revoked or malformed credential; triggers session teardown
    AuthInvalid,

    /// Everything else; passed through to generic error handling
    OtherError,
}

/// Terminal result of the request pipeline for one originating request
///
/// The explicit rendition of the per-request state machine's terminal
/// states: `DONE(success)`, `DONE(error)`, `DONE(abandoned)`.
#[derive(Debug, Clone)]
pub enum Completion {
    /// The request (or its single retry) completed with a response
    Success(GraphQlResponse),

    /// The request failed and the failure is handed to the caller
    Failed(RequestFailure),

    /// The request was dropped: refresh yielded no credential, or the
    /// session was torn down
    Abandoned,
}

impl Completion {
    /// Whether the pipeline produced a successful response
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the request was abandoned without a result
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        matches!(self, Self::Abandoned)
    }
}
