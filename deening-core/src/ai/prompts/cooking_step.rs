//! Cooking step prompts.

use serde_json::json;

use crate::types::{CookingStep, Recipe};

pub const COOKING_STEP_PROMPT_NAME: &str = "cooking_step";

pub const COOKING_STEP_SYSTEM_PROMPT: &str = "You are a professional chef. You provide detailed information about a specific step of the given recipe in JSON format.";

/// Render the instruction for one step of a stored recipe.
///
/// Only the recipe name, its ingredients and the matching instruction (if the
/// step exists) are included.
pub fn render_cooking_step_prompt(recipe_id: &str, step_number: u32, recipe: &Recipe) -> String {
    let instruction = step_number
        .checked_sub(1)
        .and_then(|index| recipe.instructions.get(index as usize))
        .map(|i| json!(i))
        .unwrap_or(serde_json::Value::Null);

    let context = json!({
        "name": recipe.name,
        "ingredients": recipe.ingredients,
        "instructions": instruction,
    });

    format!(
        r#"Describe the cooking step below in detail, as JSON with exactly this structure:

{{
  "recipe_id": "{recipe_id}",
  "step_number": {step_number},
  "description": "detailed description of the step, with tips"
}}

Recipe ID: {recipe_id}
Step number: {step_number}
Recipe: {context}

Respond with valid JSON only, no other text or code blocks."#,
        recipe_id = recipe_id,
        step_number = step_number,
        context = context,
    )
}

pub fn render_cooking_step_image_prompt(recipe_name: &str, step: &CookingStep) -> String {
    format!(
        r#"A high-quality, detailed photo demonstrating the cooking step for {recipe_name}, step number {step_number}:

- Description: {description}

The image should clearly show the action being performed.
Ensure the lighting is bright and even, showcasing the details of the cooking process.
The image should be from a slightly elevated angle to give a clear view of the cooking surface and the chef's hands (if applicable)."#,
        recipe_name = recipe_name,
        step_number = step.step_number,
        description = step.description,
    )
}
