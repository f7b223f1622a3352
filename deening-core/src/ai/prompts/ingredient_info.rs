//! Ingredient info prompts (encyclopedia entry, cached by name).

use crate::types::IngredientInfo;

pub const INGREDIENT_INFO_PROMPT_NAME: &str = "ingredient_info";

pub const INGREDIENT_INFO_SYSTEM_PROMPT: &str = "You are an expert in food science, nutrition and cooking. Drawing on deep knowledge of a wide range of ingredients, you provide accurate and useful information.";

pub fn render_ingredient_info_prompt(ingredient_name: &str) -> String {
    format!(
        r#"Produce detailed information about '{ingredient_name}' as JSON with exactly this structure:

{{
  "name": "{ingredient_name}",
  "description": "detailed description covering: 1. general characteristics (appearance, taste, aroma) 2. nutritional value and health benefits 3. common cooking methods and uses 4. storage and shelf life 5. what to look for when buying",
  "category": "broad category (e.g. vegetable, fruit, meat, seafood, dairy, grain)",
  "season": "peak season, or 'year-round' where applicable",
  "alternatives": ["2-3 ingredients that can substitute for it"]
}}

Notes:
1. Be accurate and objective; give information with a scientific basis.
2. Be specific and useful for every field.
3. Respond with valid JSON only. No extra explanation or comments."#,
        ingredient_name = ingredient_name
    )
}

pub fn render_ingredient_info_image_prompt(info: &IngredientInfo) -> String {
    let detail: String = info.description.chars().take(100).collect();

    format!(
        r#"Create a high-quality, photorealistic image of {name} with the following specifications:

1. Subject: A fresh, pristine {name} in its most commonly found or used form.
2. Setting: Place the ingredient in a context that suggests its culinary use or natural environment.
3. Lighting: Use bright, even lighting to clearly show the ingredient's color, texture, and details.
4. Composition: The {name} should occupy about 70% of the frame, with a few complementary elements that hint at its use or origin (a cutting board, a knife, typical accompanying ingredients).
5. Style: Clean, professional food photography, as if for a high-end cookbook.
6. Detail: Capture the characteristics described: {detail}...

Avoid any text or labels in the image."#,
        name = info.name,
        detail = detail,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt_echoes_name() {
        let prompt = render_ingredient_info_prompt("perilla leaf");
        assert!(prompt.contains("'perilla leaf'"));
        assert!(prompt.contains("\"name\": \"perilla leaf\""));
    }

    #[test]
    fn test_image_prompt_truncates_description() {
        let info = IngredientInfo {
            name: "leek".to_string(),
            description: "x".repeat(500),
            category: "vegetable".to_string(),
            season: "autumn".to_string(),
            alternatives: vec!["scallion".to_string()],
        };
        let prompt = render_ingredient_info_image_prompt(&info);
        assert!(prompt.contains(&format!("{}...", "x".repeat(100))));
        assert!(!prompt.contains(&"x".repeat(101)));
    }
}
