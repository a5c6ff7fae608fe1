//! Error responses.
//!
//! # Status Mapping
//! - validation failure → 400 with one message per violated constraint
//! - unreadable body → the extractor's status (400, 415, 422)
//! - aborted operation → 503
//! - outbound call failure → 502
//! - busy-loop worker failure → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::demo::OperationError;
use crate::outbound::OutboundCallError;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("malformed request body: {message}")]
    MalformedBody { status: StatusCode, message: String },

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Outbound(#[from] OutboundCallError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody { status, .. } => *status,
            ApiError::Operation(OperationError::Aborted) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Operation(OperationError::Worker(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Outbound(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::MalformedBody { .. } => "malformed_body",
            ApiError::Operation(OperationError::Aborted) => "operation_aborted",
            ApiError::Operation(OperationError::Worker(_)) => "internal_error",
            ApiError::Outbound(_) => "outbound_call_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
            details: match &self {
                ApiError::Validation(details) => details.clone(),
                _ => Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(OperationError::Aborted).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::from(OperationError::Worker("panic".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let malformed = ApiError::MalformedBody {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "no content type".into(),
        };
        assert_eq!(malformed.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let err = ApiError::Validation(vec!["MSGID is blank".into(), "TXNSEQ is blank".into()]);
        assert_eq!(err.to_string(), "validation failed: MSGID is blank, TXNSEQ is blank");
        assert_eq!(err.code(), "validation_failed");
    }

    #[tokio::test]
    async fn test_validation_body_lists_details() {
        let response = ApiError::Validation(vec!["MSGID is blank".into()]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "validation_failed");
        assert_eq!(json["details"][0], "MSGID is blank");
    }
}
