//! Free-form completions with a generic assistant persona.

use super::{ContentGenerator, Generation};
use crate::ai::prompts::{GENERIC_PROMPT_NAME, GENERIC_SYSTEM_PROMPT};
use crate::error::ContentError;
use crate::types::ChatAnswer;

#[derive(Debug)]
pub struct FreeformGeneration<'a> {
    pub prompt: &'a str,
}

impl Generation for FreeformGeneration<'_> {
    type Output = ChatAnswer;

    fn prompt_name(&self) -> &'static str {
        GENERIC_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        GENERIC_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        self.prompt.to_string()
    }
}

pub async fn complete_prompt(
    generator: &ContentGenerator,
    prompt: &str,
) -> Result<String, ContentError> {
    if prompt.trim().is_empty() {
        return Err(ContentError::Input("prompt must not be empty".to_string()));
    }
    let answer = generator.generate(&FreeformGeneration { prompt }).await?;
    Ok(answer.answer)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::ai::FakeAiClient;

    #[tokio::test]
    async fn test_complete_prompt_passes_text_through() {
        let harness = Harness::new(FakeAiClient::with_response("haiku", "Steam curls from the pot"));
        let text = complete_prompt(&harness.generator, "Write a haiku about stew")
            .await
            .unwrap();
        assert_eq!(text, "Steam curls from the pot");
        assert_eq!(
            harness.ai.requests()[0].messages[0].content,
            "You are a helpful assistant."
        );
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let harness = Harness::new(FakeAiClient::failing("quota exceeded"));
        let err = complete_prompt(&harness.generator, "hello").await.unwrap_err();
        assert!(matches!(err, ContentError::Upstream(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
