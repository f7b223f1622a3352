use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::preference::{self, KeywordType};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddKeywordRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub keyword_type: KeywordType,
}

#[utoipa::path(
    put,
    path = "/preferences/keywords",
    tag = "preferences",
    request_body = AddKeywordRequest,
    responses(
        (status = 200, description = "Keyword added", body = MessageResponse),
        (status = 400, description = "Empty or duplicate keyword", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_keyword(
    State(state): State<AppState>,
    Json(request): Json<AddKeywordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    preference::add_keyword(state.store.as_ref(), &request.name, request.keyword_type).await?;
    Ok(MessageResponse::new("Keyword added successfully"))
}
