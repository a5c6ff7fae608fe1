//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, demo operation, outbound client:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span by the trace layer
//! - Metric calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
