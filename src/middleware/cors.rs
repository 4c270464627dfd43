use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin, restricted to the verbs and headers the JSON API uses.
pub fn workflow_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any)
}
