//! Request handling: request IDs and envelope extraction.
//!
//! # Responsibilities
//! - Assign a UUID request ID to every request and echo it on the response
//! - Deserialize the JSON envelope and validate it before any handler runs
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Validation reports every violated constraint, not just the first

use axum::{
    extract::{FromRequest, Request},
    http::HeaderName,
    Json,
};
use serde::de::DeserializeOwned;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::envelope::{Envelope, Validate, ValidatedEnvelope};
use crate::http::response::ApiError;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that assigns a request ID when the client did not send one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer that copies the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// Extractor yielding an envelope whose header and payload are valid.
///
/// Rejects with [`ApiError::MalformedBody`] when the body is not the expected
/// JSON and with [`ApiError::Validation`] when constraints are violated.
#[derive(Debug, Clone)]
pub struct ValidEnvelope<T>(pub ValidatedEnvelope<T>);

impl<S, T> FromRequest<S> for ValidEnvelope<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(envelope) = Json::<Envelope<T>>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        envelope
            .validate()
            .map(ValidEnvelope)
            .map_err(ApiError::Validation)
    }
}
