//! Image validation, fetching and embedding.
//!
//! Generated images are referenced by short-lived URLs. Before a record is
//! persisted its image is fetched, validated and embedded as a `data:` URI so
//! the record stays self-contained after the URL expires.

use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, ImageReader};

use crate::error::FetchError;
use crate::http::HttpClient;

/// Allowed image formats for generated and uploaded images.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum file size for images (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Result of successfully fetching and validating an image.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// The raw image bytes.
    pub data: Vec<u8>,
    /// The detected content type (e.g., "image/jpeg").
    pub content_type: String,
}

/// An image attached to generated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaAsset {
    /// Image still hosted by the generator.
    Remote { url: String },
    /// Self-contained copy, base64 encoded.
    Embedded { content_type: String, data: String },
}

impl MediaAsset {
    pub fn embed(image: &FetchedImage) -> Self {
        MediaAsset::Embedded {
            content_type: image.content_type.clone(),
            data: base64::engine::general_purpose::STANDARD.encode(&image.data),
        }
    }

    /// Render for the wire: the URL for remote assets, a `data:` URI for embedded ones.
    pub fn to_uri(&self) -> String {
        match self {
            MediaAsset::Remote { url } => url.clone(),
            MediaAsset::Embedded { content_type, data } => {
                format!("data:{};base64,{}", content_type, data)
            }
        }
    }
}

/// Validate image data: check format is allowed and detect content type.
///
/// Returns the content type on success (e.g., "image/jpeg").
pub fn validate_image(data: &[u8]) -> Result<String, String> {
    if data.len() > MAX_FILE_SIZE {
        return Err(format!(
            "Image too large: {} bytes (max {})",
            data.len(),
            MAX_FILE_SIZE
        ));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader
        .format()
        .ok_or_else(|| "Could not detect image format".to_string())?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    Ok(format.to_mime_type().to_string())
}

/// Fetch an image from a URL and validate its size and format.
pub async fn fetch_and_validate_image(
    client: &dyn HttpClient,
    url: &str,
) -> Result<FetchedImage, FetchError> {
    let data = client.fetch_bytes(url).await?;
    let content_type = validate_image(&data).map_err(FetchError::InvalidMedia)?;

    Ok(FetchedImage { data, content_type })
}
