use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::generate;
use deening_core::types::CookingStep;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CookingStepRequest {
    pub recipe_id: String,
    /// 1-based instruction number
    pub step_number: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CookingStepResponse {
    pub id: Uuid,
    pub cooking_step: CookingStep,
    pub image_base64: Option<String>,
}

#[utoipa::path(
    post,
    path = "/recipe/cooking_step",
    tag = "recipes",
    request_body = CookingStepRequest,
    responses(
        (status = 200, description = "Stored or newly generated step explanation", body = CookingStepResponse),
        (status = 400, description = "Invalid step number or generation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn cooking_step(
    State(state): State<AppState>,
    Json(request): Json<CookingStepRequest>,
) -> Result<Json<CookingStepResponse>, ApiError> {
    let step_number = u32::try_from(request.step_number)
        .map_err(|_| ApiError::bad_request("step_number must be at least 1"))?;

    let record = generate::explain_step(
        &state.generator,
        state.store.as_ref(),
        &request.recipe_id,
        step_number,
    )
    .await?;

    Ok(Json(CookingStepResponse {
        id: record.id,
        cooking_step: record.content.content,
        image_base64: record.content.image_base64,
    }))
}
