//! Endpoint handlers.

use axum::{extract::State, Json};

use crate::demo::{DemoRequestPayload, DemoResponsePayload};
use crate::envelope::ResponseEnvelope;
use crate::http::request::ValidEnvelope;
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// `data` returned by the health check.
pub const HEALTH_MESSAGE: &str = "health is good";

type DemoResponse = Json<ResponseEnvelope<DemoResponsePayload>>;

/// Values are validated non-negative before this point.
fn non_negative(value: i32) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// `POST /demo`: delay, burn CPU, report elapsed seconds and echo the header.
pub async fn demo(
    State(state): State<AppState>,
    ValidEnvelope(request): ValidEnvelope<DemoRequestPayload>,
) -> Result<DemoResponse, ApiError> {
    tracing::info!(
        msg_id = %request.header.msg_id,
        txn_seq = %request.header.txn_seq,
        delay = request.payload.delay,
        for_count = request.payload.repeat_count,
        "Demo request"
    );

    let payload = state
        .operation
        .perform_delayed_operation(
            non_negative(request.payload.delay),
            non_negative(request.payload.repeat_count),
        )
        .await?;

    Ok(Json(ResponseEnvelope::new(request.header, payload)))
}

/// `POST /demo/service`: delay only, through the service layer.
pub async fn demo_service(
    State(state): State<AppState>,
    ValidEnvelope(request): ValidEnvelope<DemoRequestPayload>,
) -> Result<DemoResponse, ApiError> {
    let response = state.service.run(&request.payload).await?;
    Ok(Json(response))
}

/// `POST /camel`: routing stub, echoes the header only.
pub async fn camel(
    ValidEnvelope(request): ValidEnvelope<serde_json::Value>,
) -> DemoResponse {
    tracing::debug!(msg_id = %request.header.msg_id, "Routing stub invoked");
    Json(ResponseEnvelope::header_only(request.header))
}

/// `POST /httpclient`: relay to the internal endpoint and return its body.
pub async fn httpclient(
    State(state): State<AppState>,
    ValidEnvelope(request): ValidEnvelope<serde_json::Value>,
) -> Result<DemoResponse, ApiError> {
    let relayed = state.outbound.relay().await?;

    tracing::info!(status_code = relayed.status.as_u16(), "Relay finished");

    Ok(Json(ResponseEnvelope::new(
        request.header,
        DemoResponsePayload::data(relayed.body),
    )))
}

/// `GET /health`: static payload.
pub async fn health() -> DemoResponse {
    match std::env::current_exe() {
        Ok(path) => tracing::debug!(executable = %path.display(), "Health check"),
        Err(e) => tracing::debug!(error = %e, "Health check; executable path unavailable"),
    }

    Json(ResponseEnvelope::payload_only(DemoResponsePayload::data(HEALTH_MESSAGE)))
}
