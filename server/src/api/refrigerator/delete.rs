use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use deening_core::inventory;

#[utoipa::path(
    delete,
    path = "/refrigerator/ingredient/{id}",
    tag = "refrigerator",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    inventory::delete_item(state.store.as_ref(), &id).await?;
    Ok(MessageResponse::new("Ingredient deleted successfully"))
}
