use crate::{
    dto::generation_dto::{GenerateMaterialPayload, GenerateMcqPayload, InvocationEvent},
    models::envelope::ResultEnvelope,
    AppState,
};
use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::Value as JsonValue;

// Unparseable bodies carry no fields and fall through to the 400 envelope.
fn body_json(raw: &Bytes) -> JsonValue {
    if raw.is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_slice(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Request body is not valid JSON");
        JsonValue::Null
    })
}

fn event_body(raw: &Bytes) -> JsonValue {
    serde_json::from_value::<InvocationEvent>(body_json(raw))
        .map(|event| event.body)
        .unwrap_or(JsonValue::Null)
}

#[utoipa::path(
    post,
    path = "/functions/v1/generate-material",
    request_body = GenerateMaterialPayload,
    responses(
        (status = 200, description = "Generated material as `{content}`", body = Json<serde_json::Value>),
        (status = 400, description = "Missing required parameters"),
        (status = 500, description = "Model API or response handling failed"),
    ),
)]
pub async fn generate_material(State(state): State<AppState>, raw: Bytes) -> ResultEnvelope {
    state.generation_service.handle_material(&body_json(&raw)).await
}

#[utoipa::path(
    post,
    path = "/functions/v1/generate-mcq",
    request_body = GenerateMcqPayload,
    responses(
        (status = 200, description = "Generated questions as `{questions}`", body = Json<serde_json::Value>),
        (status = 400, description = "Missing required parameters"),
        (status = 500, description = "Model API or response handling failed"),
    ),
)]
pub async fn generate_mcq(State(state): State<AppState>, raw: Bytes) -> ResultEnvelope {
    state.generation_service.handle_mcq(&body_json(&raw)).await
}

#[utoipa::path(
    post,
    path = "/invoke/generate-material",
    request_body = InvocationEvent,
    responses((status = 200, description = "Invocation envelope", body = ResultEnvelope)),
)]
pub async fn invoke_material(State(state): State<AppState>, raw: Bytes) -> Json<ResultEnvelope> {
    Json(state.generation_service.handle_material(&event_body(&raw)).await)
}

#[utoipa::path(
    post,
    path = "/invoke/generate-mcq",
    request_body = InvocationEvent,
    responses((status = 200, description = "Invocation envelope", body = ResultEnvelope)),
)]
pub async fn invoke_mcq(State(state): State<AppState>, raw: Bytes) -> Json<ResultEnvelope> {
    Json(state.generation_service.handle_mcq(&event_body(&raw)).await)
}
