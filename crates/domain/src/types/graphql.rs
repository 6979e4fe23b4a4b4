//! GraphQL wire types and the normalized request-failure shape
//!
//! Servers surface authentication failures through either a GraphQL-level
//! error payload or an HTTP-level status; [`RequestFailure`] folds both
//! channels into one shape so classification runs on a single input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An outgoing GraphQL operation
///
/// Only the header map is mutated by the request pipeline; everything else
/// is fixed at construction time.
#[derive(Debug, Clone)]
pub struct GraphQlRequest {
    /// Request id used for tracing/correlation
    pub id: Uuid,

    /// Operation name (e.g., "LeadsByStage")
    pub operation_name: Option<String>,

    /// GraphQL document text
    pub query: String,

    /// JSON variables object
    pub variables: Value,

    /// Outgoing headers; the pipeline overwrites `Authorization` here
    pub headers: HashMap<String, String>,
}

impl GraphQlRequest {
    /// Create a request for the given GraphQL document
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation_name: None,
            query: query.into(),
            variables: Value::Null,
            headers: HashMap::new(),
        }
    }

    /// Set the operation name
    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Set the variables object
    #[must_use]
    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }

    /// Insert a header, overriding any prior value
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Get a header value by name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Source position of a GraphQL error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// A single protocol-level error from the GraphQL response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,

    /// Response path segments (strings and indices)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    /// Construct an error carrying only a message
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self { message: message.into(), locations: Vec::new(), path: Vec::new(), extensions: None }
    }
}

/// GraphQL response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Whether the envelope carries protocol-level errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Transport-level failure detail for one dispatch attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportFailure {
    /// HTTP status code, if a response was received at all
    pub status: Option<u16>,

    /// Classifiable message extracted from the response body
    /// (e.g., a sentinel auth error code); `None` for connection-level
    /// failures
    pub message: Option<String>,

    /// Human-readable failure description for error reporting
    pub detail: Option<String>,
}

/// Normalized failure of a single dispatch attempt
///
/// Combines the protocol-level error list with the optional transport-level
/// failure; classification reads only the first protocol message, the
/// transport message, and the status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFailure {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graphql_errors: Vec<GraphQlError>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportFailure>,
}

impl RequestFailure {
    /// Build a failure from protocol-level errors alone
    #[must_use]
    pub fn from_graphql_errors(errors: Vec<GraphQlError>) -> Self {
        Self { graphql_errors: errors, transport: None }
    }

    /// Build a failure from a transport-level failure alone
    #[must_use]
    pub fn from_transport(transport: TransportFailure) -> Self {
        Self { graphql_errors: Vec::new(), transport: Some(transport) }
    }

    /// The message classification operates on: the first protocol error's
    /// message, falling back to the transport message
    #[must_use]
    pub fn primary_message(&self) -> Option<&str> {
        self.graphql_errors
            .first()
            .map(|e| e.message.as_str())
            .or_else(|| self.transport.as_ref().and_then(|t| t.message.as_deref()))
    }

    /// HTTP status of the failed attempt, if one was received
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.transport.as_ref().and_then(|t| t.status)
    }
}
