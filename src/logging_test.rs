//! Tests for tracing setup.

use crate::logging::init_tracing;

#[test]
fn init_tracing_installs_the_global_subscriber() {
    init_tracing("supanotes=debug");

    assert!(tracing::dispatcher::has_been_set());
    tracing::info!("subscriber installed");
}
