use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use utoipa::ToSchema;

use crate::error::Error;

/// Uniform result of one handler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResultEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[schema(value_type = Object)]
    pub body: JsonValue,
}

impl ResultEnvelope {
    pub fn ok(body: JsonValue) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            body,
        }
    }

    pub fn from_error(err: &Error) -> Self {
        Self {
            status_code: err.status_code().as_u16(),
            body: json!({ "error": err.to_string() }),
        }
    }
}

impl IntoResponse for ResultEnvelope {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}
