use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

/// Browser clients call the generators directly, so any origin is allowed.
pub fn generator_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
