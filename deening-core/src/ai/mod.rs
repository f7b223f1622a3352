//! AI clients for text and image generation.
//!
//! This module provides:
//! - `AiClient` trait for chat completions, with an OpenAI-compatible implementation
//! - `ImageGenerator` trait for text-to-image, with an OpenAI-compatible implementation
//! - Fakes for both, for tests
//! - Configuration via environment variables
//! - Prompt templates for each kind of generated content
//!
//! # Configuration
//!
//! - `OPENAI_API_KEY` (required): API key
//! - `DEENING_AI_MODEL` (optional): Chat model, e.g. "gpt-4o"
//! - `DEENING_AI_BASE_URL` (optional): API base URL
//! - `DEENING_IMAGE_MODEL` (optional): Image model, e.g. "dall-e-3"
//! - `DEENING_IMAGE_SIZE` / `DEENING_IMAGE_QUALITY` (optional)
//! - `DEENING_HTTP_TIMEOUT_SECS` (optional): Timeout for fetching generated images
//!
//! # Example
//!
//! ```ignore
//! use deening_core::ai::{AiClient, ChatMessage, ChatRequest, OpenAiClient};
//!
//! let client = OpenAiClient::from_env()?;
//!
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::user("Hello!")],
//!     ..Default::default()
//! };
//!
//! let response = client.complete("test", request).await?;
//! println!("Response: {}", response.content);
//! ```

mod client;
mod config;
pub mod fake;
mod images;
pub mod prompts;
mod types;

pub use client::{AiClient, AiError, OpenAiClient};
pub use config::{AiConfig, ConfigError};
pub use fake::{FakeAiClient, FakeImageGenerator};
pub use images::{GeneratedImage, ImageError, ImageGenerator, OpenAiImageGenerator};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ImageData, Role, Usage};
