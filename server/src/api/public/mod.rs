pub mod landing;
pub mod ping;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing::landing))
        .route("/ping", get(ping::ping))
}

#[derive(OpenApi)]
#[openapi(
    paths(landing::landing, ping::ping),
    components(schemas(ping::PingResponse))
)]
pub struct ApiDoc;
