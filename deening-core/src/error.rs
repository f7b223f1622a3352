use thiserror::Error;

use crate::ai::{AiError, ImageError};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    Status { status: u16, url: String },

    #[error("Invalid media: {0}")]
    InvalidMedia(String),
}

/// Failure of a content operation, classified the way callers report it.
///
/// `NotFound` and `Input` describe the caller's request, `Invalid` and
/// `Upstream` describe what came back from a generative collaborator, and
/// `Store` is an internal persistence failure.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{0}")]
    NotFound(String),

    #[error("Generated content is malformed: {0}")]
    Invalid(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Input(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<AiError> for ContentError {
    fn from(e: AiError) -> Self {
        ContentError::Upstream(format!("AI service error: {}", e))
    }
}

impl From<ImageError> for ContentError {
    fn from(e: ImageError) -> Self {
        ContentError::Upstream(format!("Image generation failed: {}", e))
    }
}

impl From<FetchError> for ContentError {
    fn from(e: FetchError) -> Self {
        ContentError::Upstream(format!("Failed to fetch generated image: {}", e))
    }
}
