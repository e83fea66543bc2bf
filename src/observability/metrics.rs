//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatches by outcome (hit, miss, not_found)
//! - `router_compilations_total` (counter): handler chains built
//! - `router_registrations_total` (counter): entries inserted
//! - `router_cache_evictions_total` (counter): cached paths dropped by registration
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(outcome: &'static str) {
    ::metrics::counter!("router_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_compilation() {
    ::metrics::counter!("router_compilations_total").increment(1);
}

pub fn record_registration() {
    ::metrics::counter!("router_registrations_total").increment(1);
}

pub fn record_cache_evictions(count: usize) {
    ::metrics::counter!("router_cache_evictions_total").increment(count as u64);
}
