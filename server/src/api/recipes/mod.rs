pub mod chat;
pub mod cooking_step;
pub mod create;
pub mod get;
pub mod ingredient_info;
pub mod replace_ingredient;
pub mod search;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /recipe endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipe", post(create::create_recipe))
        .route("/recipe/search", get(search::search_recipes))
        .route("/recipe/{id}", get(get::get_recipe))
        .route(
            "/recipe/ingredient-info",
            post(ingredient_info::ingredient_info),
        )
        .route("/recipe/cooking_step", post(cooking_step::cooking_step))
        .route("/recipe/chat", post(chat::chat))
        .route(
            "/recipe/replace-ingredient",
            post(replace_ingredient::replace_ingredient),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        get::get_recipe,
        search::search_recipes,
        ingredient_info::ingredient_info,
        cooking_step::cooking_step,
        chat::chat,
        replace_ingredient::replace_ingredient,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        create::RecipeResponse,
        search::SearchResponse,
        search::SearchResult,
        ingredient_info::IngredientInfoRequest,
        ingredient_info::IngredientInfoResponse,
        cooking_step::CookingStepRequest,
        cooking_step::CookingStepResponse,
        chat::ChatRequest,
        chat::ChatResponse,
        replace_ingredient::ReplaceIngredientRequest,
        deening_core::types::Recipe,
        deening_core::types::RecipeIngredient,
        deening_core::types::Instruction,
        deening_core::types::Nutrition,
        deening_core::types::IngredientInfo,
        deening_core::types::CookingStep,
        deening_core::types::SubstitutionSuggestion,
    ))
)]
pub struct ApiDoc;
