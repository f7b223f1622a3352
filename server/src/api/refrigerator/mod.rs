pub mod add;
pub mod delete;
pub mod detect;
pub mod list;
pub mod rearrange;
pub mod update;

use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use deening_core::inventory::CategoryGroup;

/// Every item, grouped by category
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Refrigerator {
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefrigeratorResponse {
    pub refrigerator: Refrigerator,
}

impl RefrigeratorResponse {
    pub fn new(categories: Vec<CategoryGroup>) -> Self {
        Self {
            refrigerator: Refrigerator { categories },
        }
    }
}

/// Returns the router for /refrigerator endpoints (mounted at /refrigerator)
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/ingredients", get(list::list_all).put(add::add_ingredients))
        .route("/ingredients/{category}", get(list::list_category))
        .route(
            "/ingredient/{id}",
            put(update::update_ingredient).delete(delete::delete_ingredient),
        )
        .route("/rearrange-refrigerator", post(rearrange::rearrange))
        .route(
            "/ingredient-detect",
            post(detect::detect_ingredients).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_all,
        list::list_category,
        add::add_ingredients,
        update::update_ingredient,
        delete::delete_ingredient,
        rearrange::rearrange,
        detect::detect_ingredients,
    ),
    components(schemas(
        Refrigerator,
        RefrigeratorResponse,
        list::CategoryResponse,
        add::AddIngredientsRequest,
        detect::DetectRequest,
        detect::DetectResponse,
        detect::DetectedIngredient,
        deening_core::inventory::CategoryGroup,
        deening_core::inventory::InventoryItem,
        deening_core::inventory::ItemForm,
        deening_core::inventory::StorageType,
    ))
)]
pub struct ApiDoc;
