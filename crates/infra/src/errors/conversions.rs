//! Conversions from external infrastructure errors into domain errors.

use leadarc_domain::LeadArcError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LeadArcError);

impl From<InfraError> for LeadArcError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LeadArcError> for InfraError {
    fn from(value: LeadArcError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoLeadArcError {
    fn into_leadarc(self) -> LeadArcError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LeadArcError */
/* -------------------------------------------------------------------------- */

impl IntoLeadArcError for HttpError {
    fn into_leadarc(self) -> LeadArcError {
        if self.is_timeout() {
            return LeadArcError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return LeadArcError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => LeadArcError::Auth(message),
                400..=499 => LeadArcError::InvalidInput(message),
                500..=599 => LeadArcError::Network(message),
                _ => LeadArcError::Network(message),
            };
        }

        LeadArcError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_leadarc())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn status_errors_map_by_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let response = reqwest::get(server.uri()).await.expect("response");
        let err = response.error_for_status().expect_err("401 should be an error");

        let mapped: LeadArcError = InfraError::from(err).into();
        match mapped {
            LeadArcError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn connection_failures_map_to_network() {
        // Nothing is listening on this port
        let err = reqwest::get("http://127.0.0.1:1/never").await.expect_err("connect failure");

        let mapped: LeadArcError = InfraError::from(err).into();
        assert!(matches!(mapped, LeadArcError::Network(_)));
    }
}
