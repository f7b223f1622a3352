use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use deening_core::inventory::{self, ItemForm};

#[utoipa::path(
    put,
    path = "/refrigerator/ingredient/{id}",
    tag = "refrigerator",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    request_body = ItemForm,
    responses(
        (status = 200, description = "Item replaced", body = MessageResponse),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ItemForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    inventory::update_item(state.store.as_ref(), &id, form).await?;
    Ok(MessageResponse::new("Ingredient updated successfully"))
}
