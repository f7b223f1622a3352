use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use deening_core::preference::{self, Keyword};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Preference {
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct KeywordsResponse {
    pub preference: Preference,
}

#[utoipa::path(
    get,
    path = "/preferences/keywords",
    tag = "preferences",
    responses(
        (status = 200, description = "All liked and disliked keywords", body = KeywordsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_keywords(State(state): State<AppState>) -> Result<Json<KeywordsResponse>, ApiError> {
    let keywords = preference::list_keywords(state.store.as_ref()).await?;
    Ok(Json(KeywordsResponse {
        preference: Preference { keywords },
    }))
}
