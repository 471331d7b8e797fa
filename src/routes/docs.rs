use axum::Json;
use utoipa::OpenApi;

use crate::dto::generation_dto::{GenerateMaterialPayload, GenerateMcqPayload, InvocationEvent};
use crate::models::envelope::ResultEnvelope;
use crate::models::mcq::McqItem;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::generate::generate_material,
        crate::routes::generate::generate_mcq,
        crate::routes::generate::invoke_material,
        crate::routes::generate::invoke_mcq,
    ),
    components(schemas(
        GenerateMaterialPayload,
        GenerateMcqPayload,
        InvocationEvent,
        ResultEnvelope,
        McqItem,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
