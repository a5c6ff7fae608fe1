//! The demo operation: simulated latency plus simulated CPU load.
//!
//! # Data Flow
//! ```text
//! /demo          → operation.rs (delay, busy loop, timing) → full payload
//! /demo/service  → service.rs → operation.rs (delay only) → helper's empty envelope
//! ```
//!
//! Both routes share [`DemoOperation::perform_delayed_operation`]; they differ
//! only in what they hand back and in how an aborted delay is treated
//! ([`AbortPolicy`]).

pub mod operation;
pub mod service;
pub mod types;

pub use operation::{burn_cpu, elapsed_message, AbortPolicy, DemoOperation};
pub use service::{DemoHelper, DemoService};
pub use types::{DemoRequestPayload, DemoResponsePayload, OperationError};
