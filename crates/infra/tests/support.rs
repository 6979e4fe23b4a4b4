//! Shared helpers for infra integration tests.

use std::sync::Once;

use leadarc_domain::GraphQlRequest;

/// Initialize a tracing subscriber once for the whole test binary.
///
/// Controlled by `RUST_LOG`; defaults to warnings only so test output stays
/// readable.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// A representative dashboard operation.
pub fn leads_by_stage_request() -> GraphQlRequest {
    GraphQlRequest::new(
        "query LeadsByStage($stage: String!) { leads(stage: $stage) { id name stage } }",
    )
    .with_operation_name("LeadsByStage")
    .with_variables(serde_json::json!({ "stage": "qualified" }))
}
