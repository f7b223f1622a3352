use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::generate;
use deening_core::types::IngredientProfile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DescribeIngredientRequest {
    pub ingredient_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DescribeIngredientResponse {
    pub ingredient: IngredientProfile,
    /// Remote URL of the generated illustration
    pub image_url: String,
}

/// Generate an ingredient profile. Nothing is stored, so every call is a fresh generation.
#[utoipa::path(
    post,
    path = "/ingredient",
    tag = "ingredients",
    request_body = DescribeIngredientRequest,
    responses(
        (status = 200, description = "Generated ingredient profile", body = DescribeIngredientResponse),
        (status = 400, description = "Empty name or generation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn describe_ingredient(
    State(state): State<AppState>,
    Json(request): Json<DescribeIngredientRequest>,
) -> Result<Json<DescribeIngredientResponse>, ApiError> {
    let (ingredient, image) =
        generate::describe_ingredient(&state.generator, &request.ingredient_name).await?;

    Ok(Json(DescribeIngredientResponse {
        ingredient,
        image_url: image.to_uri(),
    }))
}
