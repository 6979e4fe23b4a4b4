//! Development-only failure diagnostics
//!
//! Logs protocol- and transport-level failure details to the tracing sink
//! in debug builds. No effect on control flow; must not panic or block.

use leadarc_domain::RequestFailure;
use tracing::debug;

/// Report failure details for development builds
pub fn report_diagnostics(failure: &RequestFailure) {
    if !cfg!(debug_assertions) {
        return;
    }

    for error in &failure.graphql_errors {
        debug!(
            message = %error.message,
            locations = ?error.locations,
            path = ?error.path,
            "graphql error"
        );
    }

    if let Some(transport) = &failure.transport {
        debug!(
            status = ?transport.status,
            message = ?transport.message,
            detail = ?transport.detail,
            "transport error"
        );
    }
}
