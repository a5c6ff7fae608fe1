//! Payload types and error definitions for the demo operation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::envelope::{null_as_default, Validate};

/// `TRANRQ` body of the demo operation. Missing or `null` values read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoRequestPayload {
    /// Seconds to sleep.
    #[serde(rename = "delay", deserialize_with = "null_as_default")]
    pub delay: i32,

    /// Busy-loop rounds.
    #[serde(rename = "forCount", deserialize_with = "null_as_default")]
    pub repeat_count: i32,
}

impl Validate for DemoRequestPayload {
    fn validate(&self, errors: &mut Vec<String>) {
        if self.delay < 0 {
            errors.push("delay must not be negative".to_string());
        }
        if self.repeat_count < 0 {
            errors.push("forCount must not be negative".to_string());
        }
    }
}

/// `TRANRS` body. Unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DemoResponsePayload {
    #[serde(rename = "env", default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl DemoResponsePayload {
    /// Payload carrying only `data`.
    pub fn data(data: impl Into<String>) -> Self {
        Self {
            environment: None,
            data: Some(data.into()),
        }
    }
}

/// Errors that can occur while running the demo operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The delay was cut short by server shutdown.
    #[error("operation aborted: delay interrupted by shutdown")]
    Aborted,

    /// The blocking busy-loop task panicked or was cancelled.
    #[error("busy loop task failed: {0}")]
    Worker(String),
}
