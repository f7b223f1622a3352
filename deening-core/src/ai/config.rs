//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default OpenAI-compatible base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Generated images are always square at this size.
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

pub const DEFAULT_IMAGE_QUALITY: &str = "standard";

/// Default timeout for fetching generated images.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Chat model name (e.g., "gpt-4o").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Image generation model name.
    pub image_model: String,
    pub image_size: String,
    pub image_quality: String,
    /// Timeout for fetching generated images, in seconds.
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`: API key
    ///
    /// Optional:
    /// - `DEENING_AI_MODEL`: Chat model (default: "gpt-4o")
    /// - `DEENING_AI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    /// - `DEENING_IMAGE_MODEL`: Image model (default: "dall-e-3")
    /// - `DEENING_IMAGE_SIZE`: Image size (default: "1024x1024")
    /// - `DEENING_IMAGE_QUALITY`: Image quality (default: "standard")
    /// - `DEENING_HTTP_TIMEOUT_SECS`: Image fetch timeout (default: 120)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = env::var("DEENING_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("DEENING_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let image_model =
            env::var("DEENING_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());

        let image_size =
            env::var("DEENING_IMAGE_SIZE").unwrap_or_else(|_| DEFAULT_IMAGE_SIZE.to_string());

        let image_quality = env::var("DEENING_IMAGE_QUALITY")
            .unwrap_or_else(|_| DEFAULT_IMAGE_QUALITY.to_string());

        let timeout_secs = match env::var("DEENING_HTTP_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "DEENING_HTTP_TIMEOUT_SECS".to_string(),
                    value,
                })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            image_model,
            image_size,
            image_quality,
            timeout_secs,
        })
    }
}
