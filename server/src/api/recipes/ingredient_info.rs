use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::generate;
use deening_core::types::IngredientInfo;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientInfoRequest {
    pub ingredient_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientInfoResponse {
    pub id: Uuid,
    pub ingredient: IngredientInfo,
    pub image_base64: Option<String>,
}

#[utoipa::path(
    post,
    path = "/recipe/ingredient-info",
    tag = "recipes",
    request_body = IngredientInfoRequest,
    responses(
        (status = 200, description = "Stored or newly generated ingredient information", body = IngredientInfoResponse),
        (status = 400, description = "Empty name or generation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn ingredient_info(
    State(state): State<AppState>,
    Json(request): Json<IngredientInfoRequest>,
) -> Result<Json<IngredientInfoResponse>, ApiError> {
    let record = generate::ingredient_info(
        &state.generator,
        state.store.as_ref(),
        &request.ingredient_name,
    )
    .await?;

    Ok(Json(IngredientInfoResponse {
        id: record.id,
        ingredient: record.content.content,
        image_base64: record.content.image_base64,
    }))
}
