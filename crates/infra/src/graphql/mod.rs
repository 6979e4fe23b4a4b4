//! GraphQL transport infrastructure

pub mod transport;

pub use transport::GraphQlTransport;
