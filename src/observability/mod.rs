//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request and rule load produces:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Log events carry fixed messages plus structured fields
//! - Request ID flows through the request span
//! - Metrics are off by default; recording is a no-op without an exporter

pub mod logging;
pub mod metrics;
