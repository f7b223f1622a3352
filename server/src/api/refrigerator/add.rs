use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::inventory::{self, ItemForm};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddIngredientsRequest {
    pub ingredients: Vec<ItemForm>,
}

/// Add items. An item matching an existing name, category and unit increases its amount.
#[utoipa::path(
    put,
    path = "/refrigerator/ingredients",
    tag = "refrigerator",
    request_body = AddIngredientsRequest,
    responses(
        (status = 200, description = "Items added", body = MessageResponse),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_ingredients(
    State(state): State<AppState>,
    Json(request): Json<AddIngredientsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let submitted = request.ingredients.len();
    let created = inventory::add_items(state.store.as_ref(), request.ingredients).await?;
    tracing::info!(submitted, created, "Ingredients added");
    Ok(MessageResponse::new("Ingredients added successfully"))
}
