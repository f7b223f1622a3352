//! Recipe generation prompts.

use crate::types::Recipe;

pub const RECIPE_PROMPT_NAME: &str = "recipe";

pub const RECIPE_SYSTEM_PROMPT: &str =
    "You are a culinary expert. You provide detailed recipes for the requested dish in JSON format.";

/// Render the recipe instruction for a food name.
pub fn render_recipe_prompt(food_name: &str) -> String {
    format!(
        r#"Create a recipe for the food named below, as JSON with exactly this structure:

{{
  "name": "recipe name",
  "description": "short description of the dish",
  "servings": number of servings (integer),
  "prepTime": "preparation time",
  "cookTime": "cooking time",
  "totalTime": "total time",
  "difficulty": "difficulty",
  "ingredients": [
    {{"name": "ingredient name", "amount": quantity (number), "unit": "unit"}}
  ],
  "instructions": [
    {{"step": step number (integer, starting at 1), "description": "what to do"}}
  ],
  "nutrition": {{
    "calories": calories per serving (integer),
    "protein": "protein in grams",
    "carbohydrates": "carbohydrates in grams",
    "fat": "fat in grams"
  }},
  "tags": ["tag1", "tag2", "tag3"],
  "source": "origin or author"
}}

Food name: {food_name}

Include at least one ingredient and one instruction. Respond with valid JSON only, no other text."#,
        food_name = food_name
    )
}

/// Render the photo prompt for a generated recipe.
pub fn render_recipe_image_prompt(recipe: &Recipe) -> String {
    let main_ingredients = recipe
        .ingredients
        .iter()
        .take(5)
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"A high-quality, appetizing photo of {name}, as described in the recipe.
The dish should look professionally plated and photographed, with attention to detail and presentation.

Recipe details:
- Description: {description}
- Main ingredients: {main_ingredients}
- Cuisine tags: {tags}

The image should clearly show the main ingredients and reflect the cuisine style indicated by the tags.
Ensure the presentation matches the difficulty level of '{difficulty}' and serves {servings}."#,
        name = recipe.name,
        description = recipe.description,
        main_ingredients = main_ingredients,
        tags = recipe.tags.join(", "),
        difficulty = recipe.difficulty,
        servings = recipe.servings,
    )
}
