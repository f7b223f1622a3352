//! Recipes, cached by requested food name.

use serde_json::Value;

use super::{find_or_create, load, ContentGenerator, Generation, Illustrated, Record};
use super::RECIPE_NOT_FOUND;
use crate::ai::prompts::recipe::{
    render_recipe_image_prompt, render_recipe_prompt, RECIPE_PROMPT_NAME, RECIPE_SYSTEM_PROMPT,
};
use crate::error::ContentError;
use crate::store::{Collection, DocumentStore};
use crate::types::Recipe;

#[derive(Debug)]
pub struct RecipeGeneration<'a> {
    pub food_name: &'a str,
}

impl Generation for RecipeGeneration<'_> {
    type Output = Recipe;

    fn prompt_name(&self) -> &'static str {
        RECIPE_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        RECIPE_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        render_recipe_prompt(self.food_name)
    }

    fn image_prompt(&self, recipe: &Recipe) -> Option<String> {
        Some(render_recipe_image_prompt(recipe))
    }
}

/// Return the stored recipe for `food_name`, generating it on first request.
pub async fn create_recipe(
    generator: &ContentGenerator,
    store: &dyn DocumentStore,
    food_name: &str,
) -> Result<Record<Illustrated<Recipe>>, ContentError> {
    let food_name = food_name.trim();
    if food_name.is_empty() {
        return Err(ContentError::Input("food_name must not be empty".to_string()));
    }

    find_or_create(store, Collection::Recipes, food_name, || async move {
        generator
            .generate_embedded(&RecipeGeneration { food_name })
            .await
    })
    .await
}

pub async fn get_recipe(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<Record<Illustrated<Recipe>>, ContentError> {
    load(store, Collection::Recipes, id, RECIPE_NOT_FOUND).await
}

/// One search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub id: uuid::Uuid,
    pub name: String,
    pub image_base64: Option<String>,
}

/// Recipes whose name or description contains `query`, case-insensitively, ordered by name.
pub async fn search_recipes(
    store: &dyn DocumentStore,
    query: &str,
) -> Result<Vec<RecipeSummary>, ContentError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ContentError::Input("Search query must not be empty".to_string()));
    }

    let docs = store
        .search(Collection::Recipes, &["name", "description"], query)
        .await?;

    Ok(docs
        .into_iter()
        .map(|doc| RecipeSummary {
            id: doc.id,
            name: doc.str_field("name").unwrap_or_default().to_string(),
            image_base64: doc
                .body
                .get("image_base64")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
        .collect())
}
