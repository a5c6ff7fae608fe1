//! Demonstration web service library.
//!
//! Endpoints simulate latency and CPU load, relay a call to an internal
//! service, and echo a `MWHEADER`/`TRANRQ` envelope.

pub mod config;
pub mod demo;
pub mod envelope;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod outbound;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
