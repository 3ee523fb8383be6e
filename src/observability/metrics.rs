//! Metrics collection and exposition.
//!
//! # Metrics
//! - `faunakey_invocations_total` (counter): invocations by outcome
//! - `faunakey_invocation_duration_seconds` (histogram): handler latency
//!
//! Until `init_metrics` installs the Prometheus recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Label value for the outcome of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Authorized,
    Unauthorized,
}

impl Outcome {
    pub fn from_status(status_code: u16) -> Self {
        if status_code == 401 {
            Outcome::Unauthorized
        } else {
            Outcome::Authorized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Authorized => "authorized",
            Outcome::Unauthorized => "unauthorized",
        }
    }
}

/// Install the Prometheus exporter listening on `addr`. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one invocation.
pub fn record_invocation(outcome: Outcome, start: Instant) {
    metrics::counter!("faunakey_invocations_total", "outcome" => outcome.as_str()).increment(1);
    metrics::histogram!("faunakey_invocation_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
