pub mod describe;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the /ingredient endpoint
pub fn router() -> Router<AppState> {
    Router::new().route("/ingredient", post(describe::describe_ingredient))
}

#[derive(OpenApi)]
#[openapi(
    paths(describe::describe_ingredient),
    components(schemas(
        describe::DescribeIngredientRequest,
        describe::DescribeIngredientResponse,
        deening_core::types::IngredientProfile,
        deening_core::types::IngredientNutrition,
    ))
)]
pub struct ApiDoc;
