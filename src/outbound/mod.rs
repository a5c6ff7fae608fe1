//! Outbound relay to the internal middleware endpoint.
//!
//! # Responsibilities
//! - POST an empty JSON body to the configured URL
//! - Return the response body verbatim, whatever the status
//! - Log request and response the way a client interceptor would

pub mod client;

pub use client::{OutboundCallError, OutboundClient, OutboundResponse};
