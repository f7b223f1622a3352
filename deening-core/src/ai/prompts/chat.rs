//! Recipe Q&A prompts.

use crate::types::Recipe;

pub const CHAT_PROMPT_NAME: &str = "recipe_chat";

pub const CHAT_SYSTEM_PROMPT: &str = "You are a culinary expert. Answer questions about recipes and cooking methods kindly and professionally.";

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

pub fn render_chat_prompt(recipe: &Recipe, question: &str) -> String {
    let nutrition = format!(
        "calories: {}kcal, protein: {}g, carbohydrates: {}g, fat: {}g",
        recipe.nutrition.calories,
        recipe.nutrition.protein,
        recipe.nutrition.carbohydrates,
        recipe.nutrition.fat,
    );

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| format!("- {}: {}{}", i.name, format_amount(i.amount), i.unit))
        .collect::<Vec<_>>()
        .join("\n");

    let instructions = recipe
        .instructions
        .iter()
        .map(|s| format!("{}. {}", s.step, s.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Here is the recipe for '{name}':

Description: {description}
Cooking time: {cook_time}
Nutrition: {nutrition}

Ingredients:
{ingredients}

Steps:
{instructions}

User question: {question}

Notes:
1. Answer kindly, clearly and concisely.
2. Write in a chat style, without line breaks or markdown."#,
        name = recipe.name,
        description = recipe.description,
        cook_time = recipe.cook_time,
        nutrition = nutrition,
        ingredients = ingredients,
        instructions = instructions,
        question = question,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(200.0), "200");
        assert_eq!(format_amount(0.5), "0.5");
    }
}
