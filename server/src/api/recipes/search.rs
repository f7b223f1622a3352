use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use deening_core::generate::{self, RecipeSummary};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Text to look for in recipe names and descriptions
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResult {
    pub id: Uuid,
    pub name: String,
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub search_results: Vec<SearchResult>,
}

impl From<RecipeSummary> for SearchResult {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            image_base64: summary.image_base64,
        }
    }
}

#[utoipa::path(
    get,
    path = "/recipe/search",
    tag = "recipes",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes ordered by name", body = SearchResponse),
        (status = 400, description = "Empty query", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = generate::search_recipes(state.store.as_ref(), &params.query).await?;
    Ok(Json(SearchResponse {
        search_results: results.into_iter().map(SearchResult::from).collect(),
    }))
}
