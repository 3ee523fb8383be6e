//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler + http layer produce:
//!     → logging.rs (structured log events, one per invocation outcome)
//!     → metrics.rs (invocation counter and latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape), off by default
//! ```

pub mod logging;
pub mod metrics;
