//! Cooking step explanations, cached per (recipe, step number).

use serde::Deserialize;
use uuid::Uuid;

use super::{find_or_create, load, ContentGenerator, Generation, Illustrated, Record};
use super::RECIPE_NOT_FOUND;
use crate::ai::prompts::cooking_step::{
    render_cooking_step_image_prompt, render_cooking_step_prompt, COOKING_STEP_PROMPT_NAME,
    COOKING_STEP_SYSTEM_PROMPT,
};
use crate::error::ContentError;
use crate::extract::parse_json_object;
use crate::store::{parse_id, Collection, DocumentStore};
use crate::types::{CookingStep, Recipe, Schema};

/// The only part of a step the model is trusted with.
#[derive(Debug, Deserialize)]
struct StepDescription {
    description: String,
}

#[derive(Debug)]
pub struct CookingStepGeneration<'a> {
    pub recipe_id: &'a str,
    pub step_number: u32,
    pub recipe: &'a Recipe,
}

impl Generation for CookingStepGeneration<'_> {
    type Output = CookingStep;

    fn prompt_name(&self) -> &'static str {
        COOKING_STEP_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        COOKING_STEP_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        render_cooking_step_prompt(self.recipe_id, self.step_number, self.recipe)
    }

    /// The step's identity always comes from the request, whatever the model echoed.
    fn parse(&self, text: &str) -> Result<CookingStep, ContentError> {
        let StepDescription { description } = parse_json_object(text)?;
        let step = CookingStep {
            recipe_id: self.recipe_id.to_string(),
            step_number: self.step_number,
            description: description.trim().to_string(),
        };
        step.validate().map_err(ContentError::Invalid)?;
        Ok(step)
    }

    fn image_prompt(&self, step: &CookingStep) -> Option<String> {
        Some(render_cooking_step_image_prompt(&self.recipe.name, step))
    }
}

/// Lookup key for a step of a recipe.
pub fn step_key(recipe_id: Uuid, step_number: u32) -> String {
    format!("{}#{}", recipe_id, step_number)
}

pub async fn explain_step(
    generator: &ContentGenerator,
    store: &dyn DocumentStore,
    recipe_id: &str,
    step_number: u32,
) -> Result<Record<Illustrated<CookingStep>>, ContentError> {
    if step_number == 0 {
        return Err(ContentError::Input("step_number starts at 1".to_string()));
    }
    let recipe_id =
        parse_id(recipe_id).ok_or_else(|| ContentError::NotFound(RECIPE_NOT_FOUND.to_string()))?;
    let key = step_key(recipe_id, step_number);

    find_or_create(store, Collection::CookingSteps, &key, || async move {
        let recipe: Record<Illustrated<Recipe>> =
            load(store, Collection::Recipes, &recipe_id.to_string(), RECIPE_NOT_FOUND).await?;
        let recipe_id = recipe_id.to_string();
        generator
            .generate_embedded(&CookingStepGeneration {
                recipe_id: &recipe_id,
                step_number,
                recipe: &recipe.content.content,
            })
            .await
    })
    .await
}
