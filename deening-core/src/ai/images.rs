//! Image generation through an OpenAI-compatible `/images/generations` endpoint.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::images::{
        CreateImageRequestArgs, Image, ImageModel, ImageQuality, ImageResponseFormat, ImageSize,
    },
    Client,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::config::AiConfig;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid image setting {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Response contained no image")]
    NoImage,
}

impl From<OpenAIError> for ImageError {
    fn from(e: OpenAIError) -> Self {
        match e {
            OpenAIError::ApiError(api) => ImageError::Api(api.message),
            other => ImageError::RequestFailed(other.to_string()),
        }
    }
}

/// A freshly generated image, referenced by a short-lived URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: String,
    pub revised_prompt: Option<String>,
}

/// Trait for text-to-image generators.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageError>;
}

pub struct OpenAiImageGenerator {
    client: Client<OpenAIConfig>,
    model: ImageModel,
    size: ImageSize,
    quality: ImageQuality,
}

/// Read a configured string the way the API spells it, e.g. "1024x1024" or "hd".
fn setting<T: DeserializeOwned>(name: &'static str, value: &str) -> Result<T, ImageError> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).map_err(|_| {
        ImageError::InvalidSetting {
            name,
            value: value.to_string(),
        }
    })
}

impl OpenAiImageGenerator {
    pub fn new(config: AiConfig) -> Result<Self, ImageError> {
        let model = setting("DEENING_IMAGE_MODEL", &config.image_model)?;
        let size = setting("DEENING_IMAGE_SIZE", &config.image_size)?;
        let quality = setting("DEENING_IMAGE_QUALITY", &config.image_quality)?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model,
            size,
            quality,
        })
    }
}

/// The first image in the response that came back as a URL.
fn first_url(images: &[impl AsRef<Image>]) -> Option<GeneratedImage> {
    images.iter().find_map(|image| match image.as_ref() {
        Image::Url {
            url,
            revised_prompt,
        } => Some(GeneratedImage {
            url: url.clone(),
            revised_prompt: revised_prompt.clone(),
        }),
        _ => None,
    })
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageError> {
        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(self.model.clone())
            .size(self.size.clone())
            .quality(self.quality.clone())
            .response_format(ImageResponseFormat::Url)
            .n(1)
            .build()?;

        tracing::debug!(model = ?self.model, "Requesting image generation");

        let response = self.client.images().generate(request).await?;
        first_url(&response.data).ok_or(ImageError::NoImage)
    }
}
