pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod raw_sql;
pub mod schema;
pub mod store;
pub mod telemetry;

use axum::middleware;
use axum::Router;
use deening_core::store::DocumentStore;
use deening_core::ContentGenerator;
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;

/// Everything a handler needs.
pub struct AppContext {
    pub generator: ContentGenerator,
    pub store: Arc<dyn DocumentStore>,
    pub config: ServerConfig,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

/// Assemble the full HTTP surface: public routes, bearer-protected routes,
/// Swagger UI and per-request tracing.
pub fn build_router(state: AppState) -> Router {
    let protected_router = Router::new()
        .merge(api::recipes::router())
        .merge(api::ingredients::router())
        .merge(api::generate::router())
        .nest(
            "/refrigerator",
            api::refrigerator::router(state.config.max_upload_bytes),
        )
        .nest("/preferences", api::preferences::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .merge(api::public::router())
        .merge(protected_router)
        .merge(swagger_ui)
        .with_state(state);

    telemetry::with_request_tracing(app)
}
