use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::generate::{self, Illustrated, Record};
use deening_core::types::Recipe;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub food_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub recipe: Recipe,
    pub image_base64: Option<String>,
}

impl From<Record<Illustrated<Recipe>>> for RecipeResponse {
    fn from(record: Record<Illustrated<Recipe>>) -> Self {
        Self {
            id: record.id,
            recipe: record.content.content,
            image_base64: record.content.image_base64,
        }
    }
}

#[utoipa::path(
    post,
    path = "/recipe",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 200, description = "Stored or newly generated recipe", body = RecipeResponse),
        (status = 400, description = "Empty food name or generation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let record =
        generate::create_recipe(&state.generator, state.store.as_ref(), &request.food_name)
            .await?;
    Ok(Json(record.into()))
}
