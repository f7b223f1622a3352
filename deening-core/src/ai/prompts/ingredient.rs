//! Ingredient profile prompts (nutrition-focused, not cached).

use crate::types::IngredientProfile;

pub const INGREDIENT_PROMPT_NAME: &str = "ingredient";

pub const INGREDIENT_SYSTEM_PROMPT: &str =
    "You are a nutrition expert. You provide detailed information about the given ingredient in JSON format.";

pub fn render_ingredient_prompt(ingredient_name: &str) -> String {
    format!(
        r#"Describe the ingredient named below as JSON with exactly this structure:

{{
  "name": "ingredient name",
  "description": "short description of the ingredient",
  "category": "ingredient category",
  "nutritional_info": {{
    "calories": calories per 100g (integer),
    "protein": protein in grams (number),
    "carbohydrates": carbohydrates in grams (number),
    "fat": fat in grams (number),
    "fiber": dietary fiber in grams (number),
    "vitamins": "main vitamins",
    "minerals": "main minerals"
  }},
  "storage_tips": "how to store it",
  "culinary_uses": ["use1", "use2", "use3"]
}}

Ingredient name: {ingredient_name}

Respond with valid JSON only, no other text."#,
        ingredient_name = ingredient_name
    )
}

pub fn render_ingredient_image_prompt(profile: &IngredientProfile) -> String {
    format!(
        r#"A high-quality, detailed photo of {name}, as described:

- Category: {category}
- Description: {description}

The image should clearly show the ingredient in its natural or commonly found form.
Ensure the lighting is bright and even, showcasing the ingredient's texture and color.
If applicable, include some context that hints at its culinary uses or storage method."#,
        name = profile.name,
        category = profile.category,
        description = profile.description,
    )
}
