//! Fake AI collaborators for testing.
//!
//! These return deterministic responses and count their calls, so tests can
//! run without network access and assert on how often a model was consulted.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use super::client::{AiClient, AiError};
use super::images::{GeneratedImage, ImageError, ImageGenerator};
use super::types::{ChatRequest, ChatResponse, Role, Usage};

/// A fake chat client.
///
/// Responses are matched by checking whether the user message contains a
/// registered substring (case-insensitive, first registration wins). If no
/// pattern matches, the default response is returned, or an error if none is set.
#[derive(Debug, Default)]
pub struct FakeAiClient {
    responses: RwLock<Vec<(String, String)>>,
    default_response: Option<String>,
    failure: Option<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeAiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that returns `response` for user messages containing `pattern`.
    pub fn with_response(pattern: &str, response: &str) -> Self {
        let client = Self::new();
        client.add_response(pattern, response);
        client
    }

    pub fn add_response(&self, pattern: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .push((pattern.to_lowercase(), response.to_string()));
    }

    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Make every call fail as if the upstream API were down.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        _prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let user_text = request
            .messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");

        self.requests.lock().unwrap().push(request);

        if let Some(message) = &self.failure {
            return Err(AiError::Api(message.clone()));
        }

        let matched = self
            .responses
            .read()
            .unwrap()
            .iter()
            .find(|(pattern, _)| user_text.contains(pattern))
            .map(|(_, response)| response.clone());

        let content = match matched.or_else(|| self.default_response.clone()) {
            Some(content) => content,
            None => {
                return Err(AiError::RequestFailed(format!(
                    "FakeAiClient: no response configured for prompt (first 100 chars): {}",
                    user_text.chars().take(100).collect::<String>()
                )))
            }
        };

        Ok(ChatResponse {
            content,
            usage: Usage::default(),
        })
    }
}

/// A fake image generator that always hands back the same URL.
#[derive(Debug)]
pub struct FakeImageGenerator {
    url: String,
    failure: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeImageGenerator {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            failure: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for FakeImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(ImageError::Api(message.clone()));
        }

        Ok(GeneratedImage {
            url: self.url.clone(),
            revised_prompt: None,
        })
    }
}
