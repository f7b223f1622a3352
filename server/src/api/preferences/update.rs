use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use deening_core::preference::{self, KeywordType, UpdateOutcome};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateKeywordRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub keyword_type: Option<KeywordType>,
}

#[utoipa::path(
    patch,
    path = "/preferences/keyword/{id}",
    tag = "preferences",
    params(
        ("id" = String, Path, description = "Keyword ID")
    ),
    request_body = UpdateKeywordRequest,
    responses(
        (status = 200, description = "Keyword updated, or nothing to change", body = MessageResponse),
        (status = 400, description = "Empty name or duplicate keyword", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Keyword not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_keyword(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateKeywordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = preference::update_keyword(
        state.store.as_ref(),
        &id,
        request.name.as_deref(),
        request.keyword_type,
    )
    .await?;

    Ok(match outcome {
        UpdateOutcome::Updated => MessageResponse::new("Keyword updated successfully"),
        UpdateOutcome::Unchanged => MessageResponse::new("No changes were made"),
    })
}
