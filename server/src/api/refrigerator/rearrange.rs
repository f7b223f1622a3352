use super::RefrigeratorResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::inventory;

/// Let the model regroup every item into sensible categories, replacing the stored layout.
#[utoipa::path(
    post,
    path = "/refrigerator/rearrange-refrigerator",
    tag = "refrigerator",
    responses(
        (status = 200, description = "Rearranged inventory", body = RefrigeratorResponse),
        (status = 400, description = "Generation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn rearrange(
    State(state): State<AppState>,
) -> Result<Json<RefrigeratorResponse>, ApiError> {
    let groups = inventory::rearrange(&state.generator, state.store.as_ref()).await?;
    Ok(Json(RefrigeratorResponse::new(groups)))
}
