pub mod complete;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the /generate endpoint
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(complete::generate))
}

#[derive(OpenApi)]
#[openapi(
    paths(complete::generate),
    components(schemas(complete::GenerateRequest, complete::GenerateResponse))
)]
pub struct ApiDoc;
