//! Ingredient substitution prompts.

use crate::types::Recipe;

pub const SUBSTITUTION_PROMPT_NAME: &str = "replace_ingredient";

pub const SUBSTITUTION_SYSTEM_PROMPT: &str =
    "You are a culinary expert with professional knowledge of ingredient substitution.";

/// Marker the model adds when the ingredient can simply be left out.
pub const OMITTABLE_MARKER: &str = "(omittable)";

pub fn render_substitution_prompt(recipe: &Recipe, ingredient_name: &str) -> String {
    format!(
        r#"Suggest the most suitable replacement for '{ingredient_name}' in the recipe below, and describe how the taste changes.

Recipe: {name}
Recipe description: {description}

Ingredient to replace: {ingredient_name}

Consider:
1. An ingredient with a similar taste and texture to the original
2. An ingredient that does not spoil the overall character of the recipe
3. An ingredient that does not change the cooking method much
4. If the ingredient can be left out without much difference, write "{marker}" in the description.

Answer in this JSON format:
{{
    "replaced_ingredient": "replacement ingredient name",
    "taste_change_description": "how the taste changes"
}}"#,
        ingredient_name = ingredient_name,
        name = recipe.name,
        description = recipe.description,
        marker = OMITTABLE_MARKER,
    )
}
