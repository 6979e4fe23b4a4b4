//! Domain types and models

pub mod credential;
pub mod graphql;
pub mod outcome;

pub use credential::{Credential, SessionTokens};
pub use graphql::{
    ErrorLocation, GraphQlError, GraphQlRequest, GraphQlResponse, RequestFailure, TransportFailure,
};
pub use outcome::{Completion, Outcome};
