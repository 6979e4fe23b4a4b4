//! Failure classification
//!
//! Servers surface identical authentication failure semantics through
//! either a GraphQL-level error payload or an HTTP-level 401; this module
//! normalizes both channels into one [`Outcome`] before any branching
//! runs, because the retry/sign-out policy is the same regardless of
//! transport path.

use leadarc_domain::constants::{
    HTTP_UNAUTHORIZED, ID_TOKEN_EXPIRED, ID_TOKEN_REVOKED, INVALID_ID_TOKEN,
};
use leadarc_domain::{Outcome, RequestFailure};

/// Classify a failed dispatch attempt
///
/// Pure function of the failure: extraction takes the first protocol
/// error's message, falling back to the transport message. Sub-classification
/// runs when the status is 401 or any message was extracted; matching
/// against the sentinel codes is exact and case-sensitive.
#[must_use]
pub fn classify_failure(failure: &RequestFailure) -> Outcome {
    let message = failure.primary_message();
    let unauthorized = failure.status() == Some(HTTP_UNAUTHORIZED);

    if !unauthorized && message.is_none() {
        return Outcome::OtherError;
    }

    match message {
        Some(ID_TOKEN_EXPIRED) => Outcome::AuthExpired,
        Some(ID_TOKEN_REVOKED) | Some(INVALID_ID_TOKEN) => Outcome::AuthInvalid,
        _ => Outcome::OtherError,
    }
}

#[cfg(test)]
mod tests {
    use leadarc_domain::{GraphQlError, TransportFailure};

    use super::*;

    fn transport_failure(status: Option<u16>, message: Option<&str>) -> RequestFailure {
        RequestFailure::from_transport(TransportFailure {
            status,
            message: message.map(str::to_string),
            detail: None,
        })
    }

    #[test]
    fn expired_sentinel_in_protocol_errors_classifies_as_expired() {
        let failure =
            RequestFailure::from_graphql_errors(vec![GraphQlError::message("ID_TOKEN_EXPIRED")]);
        assert_eq!(classify_failure(&failure), Outcome::AuthExpired);
    }

    #[test]
    fn expired_sentinel_in_transport_message_classifies_as_expired() {
        let failure = transport_failure(Some(401), Some("ID_TOKEN_EXPIRED"));
        assert_eq!(classify_failure(&failure), Outcome::AuthExpired);
    }

    #[test]
    fn revoked_and_malformed_sentinels_classify_as_invalid() {
        let revoked = transport_failure(Some(401), Some("ID_TOKEN_REVOKED"));
        assert_eq!(classify_failure(&revoked), Outcome::AuthInvalid);

        let malformed =
            RequestFailure::from_graphql_errors(vec![GraphQlError::message("INVALID_ID_TOKEN")]);
        assert_eq!(classify_failure(&malformed), Outcome::AuthInvalid);
    }

    #[test]
    fn unauthorized_without_message_is_other_error() {
        // A bare 401 carries no sentinel to act on
        let failure = transport_failure(Some(401), None);
        assert_eq!(classify_failure(&failure), Outcome::OtherError);
    }

    #[test]
    fn unauthorized_with_unknown_message_is_other_error() {
        let failure = transport_failure(Some(401), Some("SOMETHING_ELSE"));
        assert_eq!(classify_failure(&failure), Outcome::OtherError);
    }

    #[test]
    fn sentinel_message_without_unauthorized_status_still_classifies() {
        // The sentinel may arrive on a 200 GraphQL envelope or a 500
        let failure = transport_failure(Some(500), Some("ID_TOKEN_EXPIRED"));
        assert_eq!(classify_failure(&failure), Outcome::AuthExpired);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let failure = transport_failure(Some(401), Some("id_token_expired"));
        assert_eq!(classify_failure(&failure), Outcome::OtherError);
    }

    #[test]
    fn connection_failure_without_status_or_message_is_other_error() {
        let failure = transport_failure(None, None);
        assert_eq!(classify_failure(&failure), Outcome::OtherError);
    }

    #[test]
    fn first_protocol_error_wins_over_transport_message() {
        let failure = RequestFailure {
            graphql_errors: vec![
                GraphQlError::message("ID_TOKEN_REVOKED"),
                GraphQlError::message("ID_TOKEN_EXPIRED"),
            ],
            transport: Some(TransportFailure {
                status: Some(401),
                message: Some("ID_TOKEN_EXPIRED".to_string()),
                detail: None,
            }),
        };
        assert_eq!(classify_failure(&failure), Outcome::AuthInvalid);
    }

    #[test]
    fn classification_is_idempotent() {
        let failures = vec![
            transport_failure(Some(401), Some("ID_TOKEN_EXPIRED")),
            transport_failure(Some(401), None),
            RequestFailure::from_graphql_errors(vec![GraphQlError::message("ID_TOKEN_REVOKED")]),
            transport_failure(None, None),
        ];

        for failure in &failures {
            assert_eq!(classify_failure(failure), classify_failure(failure));
        }
    }
}
