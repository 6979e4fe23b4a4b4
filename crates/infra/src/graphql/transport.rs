//! HTTP dispatch of GraphQL operations
//!
//! Implements the core `GraphQlDispatcher` port over reqwest. Both failure
//! channels are normalized here: protocol-level errors from the response
//! envelope and transport-level failures (non-2xx status, connection
//! errors) fold into one `RequestFailure` before the pipeline classifies
//! them.

use async_trait::async_trait;
use leadarc_core::{Dispatched, GraphQlDispatcher};
use leadarc_domain::{
    ApiConfig, GraphQlRequest, GraphQlResponse, LeadArcError, RequestFailure, Result,
    TransportFailure,
};
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;

use crate::http::HttpClient;

/// GraphQL transport over HTTP
pub struct GraphQlTransport {
    http: HttpClient,
    endpoint: String,
}

impl GraphQlTransport {
    /// Create a transport for the configured endpoint
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .max_attempts(config.max_attempts)
            .build()?;

        Ok(Self { http, endpoint: config.endpoint.clone() })
    }

    /// Build the JSON envelope: `{query, variables, operationName}`
    fn envelope(request: &GraphQlRequest) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), Value::String(request.query.clone()));

        if !request.variables.is_null() {
            body.insert("variables".to_string(), request.variables.clone());
        }

        if let Some(name) = &request.operation_name {
            body.insert("operationName".to_string(), Value::String(name.clone()));
        }

        Value::Object(body)
    }
}

#[async_trait]
impl GraphQlDispatcher for GraphQlTransport {
    async fn dispatch(&self, request: &GraphQlRequest) -> Result<Dispatched> {
        let mut builder = self
            .http
            .request(Method::POST, &self.endpoint)
            .header("Content-Type", "application/json")
            .json(&Self::envelope(request));

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        debug!(
            request_id = %request.id,
            operation = ?request.operation_name,
            "dispatching GraphQL request"
        );

        let response = match self.http.send(builder).await {
            Ok(response) => response,
            Err(error) => {
                // Connection-level failure: no status, no classifiable
                // message; classified OtherError downstream
                return Ok(Dispatched::Failed(RequestFailure::from_transport(
                    TransportFailure { status: None, message: None, detail: Some(error.to_string()) },
                )));
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            let envelope: GraphQlResponse = serde_json::from_str(&body).map_err(|err| {
                LeadArcError::Api(format!("failed to parse GraphQL response: {err}"))
            })?;

            if envelope.has_errors() {
                return Ok(Dispatched::Failed(RequestFailure::from_graphql_errors(
                    envelope.errors,
                )));
            }

            return Ok(Dispatched::Completed(envelope));
        }

        Ok(Dispatched::Failed(RequestFailure::from_transport(TransportFailure {
            status: Some(status.as_u16()),
            message: classifiable_message(&body),
            detail: Some(format!("{} returned status {}", self.endpoint, status)),
        })))
    }
}

/// Extract a classifiable message from a non-2xx response body
///
/// Accepts both shapes the server uses: `{"errors":[{"message":...}]}` and
/// `{"error":{"message":...}}`.
fn classifiable_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    value
        .pointer("/errors/0/message")
        .or_else(|| value.pointer("/error/message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
