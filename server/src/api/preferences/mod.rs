pub mod add;
pub mod delete;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{get, patch};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /preferences endpoints (mounted at /preferences)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/keywords", get(list::list_keywords).put(add::add_keyword))
        .route(
            "/keyword/{id}",
            patch(update::update_keyword).delete(delete::delete_keyword),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_keywords,
        add::add_keyword,
        update::update_keyword,
        delete::delete_keyword,
    ),
    components(schemas(
        list::Preference,
        list::KeywordsResponse,
        add::AddKeywordRequest,
        update::UpdateKeywordRequest,
        deening_core::preference::Keyword,
        deening_core::preference::KeywordType,
    ))
)]
pub struct ApiDoc;
