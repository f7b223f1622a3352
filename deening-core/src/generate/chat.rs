//! Questions about a stored recipe.

use super::{load, ContentGenerator, Generation, Illustrated, Record};
use super::RECIPE_NOT_FOUND;
use crate::ai::prompts::chat::{render_chat_prompt, CHAT_PROMPT_NAME, CHAT_SYSTEM_PROMPT};
use crate::error::ContentError;
use crate::store::{Collection, DocumentStore};
use crate::types::{ChatAnswer, Recipe};

#[derive(Debug)]
pub struct ChatGeneration<'a> {
    pub recipe: &'a Recipe,
    pub question: &'a str,
}

impl Generation for ChatGeneration<'_> {
    type Output = ChatAnswer;

    fn prompt_name(&self) -> &'static str {
        CHAT_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        CHAT_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        render_chat_prompt(self.recipe, self.question)
    }
}

pub async fn answer_question(
    generator: &ContentGenerator,
    store: &dyn DocumentStore,
    recipe_id: &str,
    question: &str,
) -> Result<ChatAnswer, ContentError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ContentError::Input("question must not be empty".to_string()));
    }

    let recipe: Record<Illustrated<Recipe>> =
        load(store, Collection::Recipes, recipe_id, RECIPE_NOT_FOUND).await?;

    generator
        .generate(&ChatGeneration {
            recipe: &recipe.content.content,
            question,
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

    #[tokio::test]
    async fn test_answer_question_about_recipe() {
        let store = MemoryStore::new();
        let ai = FakeAiClient::with_response("user question", "  Yes, swap the pork for tuna.  ");
        ai.add_response("kimchi stew", KIMCHI_STEW);
        let harness = Harness::new(ai);

        let recipe = create_recipe(&harness.generator, &store, "kimchi stew")
            .await
            .unwrap();
        let answer = answer_question(
            &harness.generator,
            &store,
            &recipe.id.to_string(),
            "Can I use tuna?",
        )
        .await
        .unwrap();

        assert_eq!(answer.answer, "Yes, swap the pork for tuna.");

        let request = &harness.ai.requests()[1];
        assert!(!request.json_response);
        let prompt = &request.messages[1].content;
        assert!(prompt.contains("- kimchi: 200g"));
        assert!(prompt.contains("- tofu: 0.5block"));
        assert!(prompt.contains("2. Add water and tofu, then simmer."));
        assert!(prompt.contains("protein: 25g"));
    }

    #[tokio::test]
    async fn test_answer_question_unknown_recipe() {
        let store = MemoryStore::new();
        let harness = Harness::new(FakeAiClient::new().with_default_response("hi"));
        let err = answer_question(
            &harness.generator,
            &store,
            &uuid::Uuid::new_v4().to_string(),
            "why?",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
        assert_eq!(harness.ai.calls(), 0);
    }
}
