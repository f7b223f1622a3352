use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::generate;
use deening_core::types::SubstitutionSuggestion;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReplaceIngredientRequest {
    pub recipe_id: String,
    pub ingredient_name: String,
}

#[utoipa::path(
    post,
    path = "/recipe/replace-ingredient",
    tag = "recipes",
    request_body = ReplaceIngredientRequest,
    responses(
        (status = 200, description = "Suggested substitute and how the dish will change", body = SubstitutionSuggestion),
        (status = 400, description = "Generation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe or ingredient not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn replace_ingredient(
    State(state): State<AppState>,
    Json(request): Json<ReplaceIngredientRequest>,
) -> Result<Json<SubstitutionSuggestion>, ApiError> {
    let suggestion = generate::suggest_substitute(
        &state.generator,
        state.store.as_ref(),
        &request.recipe_id,
        &request.ingredient_name,
    )
    .await?;
    Ok(Json(suggestion))
}
