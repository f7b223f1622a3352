use super::RefrigeratorResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use deening_core::inventory::{self, InventoryItem};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub category: String,
    pub ingredients: Vec<InventoryItem>,
}

#[utoipa::path(
    get,
    path = "/refrigerator/ingredients",
    tag = "refrigerator",
    responses(
        (status = 200, description = "All items grouped by category", body = RefrigeratorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<RefrigeratorResponse>, ApiError> {
    let groups = inventory::list_grouped(state.store.as_ref()).await?;
    Ok(Json(RefrigeratorResponse::new(groups)))
}

#[utoipa::path(
    get,
    path = "/refrigerator/ingredients/{category}",
    tag = "refrigerator",
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Items in one category", body = CategoryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let ingredients = inventory::list_category(state.store.as_ref(), &category).await?;
    Ok(Json(CategoryResponse {
        category,
        ingredients,
    }))
}
