//! Authenticated request pipeline
//!
//! Wraps every outgoing GraphQL operation with credential attachment,
//! failure classification, a single forced-refresh retry, and forced
//! sign-out on revoked sessions.

pub mod classifier;
pub mod diagnostics;
pub mod ports;
pub mod service;

pub use classifier::classify_failure;
pub use ports::*;
pub use service::RequestPipeline;
