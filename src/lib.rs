pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::{generation_service::GenerationService, model_client::ModelClient};
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub generation_service: GenerationService,
}

impl AppState {
    pub fn new(config: &Config) -> error::Result<Self> {
        let http_client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| error::Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let model_client = ModelClient::new(
            config.groq_api_url.clone(),
            config.groq_api_key.clone(),
            http_client,
        );
        let generation_service = GenerationService::new(
            model_client,
            config.material_model.clone(),
            config.mcq_model.clone(),
            config.mcq_item_policy,
        );

        Ok(Self { generation_service })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api-docs/openapi.json", get(routes::docs::openapi_json))
        .route(
            "/functions/v1/generate-material",
            post(routes::generate::generate_material),
        )
        .route(
            "/functions/v1/generate-mcq",
            post(routes::generate::generate_mcq),
        )
        .route(
            "/invoke/generate-material",
            post(routes::generate::invoke_material),
        )
        .route("/invoke/generate-mcq", post(routes::generate::invoke_mcq))
        .with_state(state)
        .layer(middleware::cors::generator_cors())
        .layer(TraceLayer::new_for_http())
}
