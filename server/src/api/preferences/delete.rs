use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use deening_core::preference;

#[utoipa::path(
    delete,
    path = "/preferences/keyword/{id}",
    tag = "preferences",
    params(
        ("id" = String, Path, description = "Keyword ID")
    ),
    responses(
        (status = 200, description = "Keyword deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Keyword not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_keyword(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    preference::delete_keyword(state.store.as_ref(), &id).await?;
    Ok(MessageResponse::new("Keyword deleted successfully"))
}
