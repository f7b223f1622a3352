//! Ingredient substitution suggestions for a stored recipe.

use super::{load, ContentGenerator, Generation, Illustrated, Record};
use super::RECIPE_NOT_FOUND;
use crate::ai::prompts::substitution::{
    render_substitution_prompt, SUBSTITUTION_PROMPT_NAME, SUBSTITUTION_SYSTEM_PROMPT,
};
use crate::error::ContentError;
use crate::store::{Collection, DocumentStore};
use crate::types::{Recipe, SubstitutionSuggestion};

#[derive(Debug)]
pub struct SubstitutionGeneration<'a> {
    pub recipe: &'a Recipe,
    pub ingredient_name: &'a str,
}

impl Generation for SubstitutionGeneration<'_> {
    type Output = SubstitutionSuggestion;

    fn prompt_name(&self) -> &'static str {
        SUBSTITUTION_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        SUBSTITUTION_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        render_substitution_prompt(self.recipe, self.ingredient_name)
    }

    fn temperature(&self) -> Option<f32> {
        Some(0.7)
    }
}

pub async fn suggest_substitute(
    generator: &ContentGenerator,
    store: &dyn DocumentStore,
    recipe_id: &str,
    ingredient_name: &str,
) -> Result<SubstitutionSuggestion, ContentError> {
    let recipe: Record<Illustrated<Recipe>> =
        load(store, Collection::Recipes, recipe_id, RECIPE_NOT_FOUND).await?;
    let recipe = &recipe.content.content;

    if !recipe.has_ingredient(ingredient_name) {
        return Err(ContentError::NotFound(
            "Ingredient not found in recipe".to_string(),
        ));
    }

    generator
        .generate(&SubstitutionGeneration {
            recipe,
            ingredient_name,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::create_recipe;
    use super::*;
    use crate::ai::FakeAiClient;
    use crate::store::MemoryStore;

    const SUGGESTION: &str = r#"Sure! {"replaced_ingredient": "canned tuna", "taste_change_description": "Lighter and more briny."}"#;

    #[tokio::test]
    async fn test_suggest_substitute() {
        let store = MemoryStore::new();
        let ai = FakeAiClient::with_response("ingredient to replace", SUGGESTION);
        ai.add_response("kimchi stew", KIMCHI_STEW);
        let harness = Harness::new(ai);
        let recipe = create_recipe(&harness.generator, &store, "kimchi stew")
            .await
            .unwrap();

        let suggestion = suggest_substitute(
            &harness.generator,
            &store,
            &recipe.id.to_string(),
            "pork belly",
        )
        .await
        .unwrap();

        assert_eq!(suggestion.replaced_ingredient, "canned tuna");
        assert_eq!(harness.ai.requests()[1].temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_ingredient_not_in_recipe() {
        let store = MemoryStore::new();
        let harness = Harness::new(FakeAiClient::new().with_default_response(KIMCHI_STEW));
        let recipe = create_recipe(&harness.generator, &store, "kimchi stew")
            .await
            .unwrap();

        let err = suggest_substitute(&harness.generator, &store, &recipe.id.to_string(), "beef")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
        assert_eq!(harness.ai.calls(), 1);
    }
}
