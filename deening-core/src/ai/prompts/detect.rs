//! Ingredient detection prompts (multimodal).

pub const DETECT_PROMPT_NAME: &str = "ingredient_detect";

pub const DETECT_SYSTEM_PROMPT: &str = "You are an expert in cooking and ingredients. You can accurately identify and analyze every ingredient and food item in the provided image.";

pub fn render_detect_prompt() -> String {
    r#"Analyze the provided image in detail and identify the ingredients in it. Follow these guidelines and answer in JSON:

1. List every identifiable ingredient.
2. Treat processed foods, cooked dishes and drinks as ingredients too.
3. If an ingredient is in an unusual state or form (sliced carrot, mashed potato), list it by its base ingredient name.
4. List each ingredient only once, even if it appears several times.
5. Use the most general, basic name possible (e.g. 'lettuce' rather than 'romaine lettuce').

Answer with this JSON structure:

{
  "ingredients": ["ingredient1", "ingredient2", "ingredient3"]
}

If no ingredients can be found in the image, return an empty list:
{
  "ingredients": []
}

Notes:
1. Respond with valid JSON only, no other text or code blocks.
2. If you are unsure whether something is an ingredient or food, give your most likely guess.
3. Ignore objects in the image that are not ingredients or food."#
        .to_string()
}
