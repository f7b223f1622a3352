//! Ingredient detection from a photo. Nothing is stored.

use super::{ContentGenerator, Generation};
use crate::ai::prompts::detect::{render_detect_prompt, DETECT_PROMPT_NAME, DETECT_SYSTEM_PROMPT};
use crate::ai::ImageData;
use crate::error::ContentError;
use crate::image::validate_image;
use crate::types::IngredientList;

#[derive(Debug)]
pub struct DetectGeneration {
    pub image: ImageData,
}

impl Generation for DetectGeneration {
    type Output = IngredientList;

    fn prompt_name(&self) -> &'static str {
        DETECT_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        DETECT_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        render_detect_prompt()
    }

    fn images(&self) -> Vec<ImageData> {
        vec![self.image.clone()]
    }
}

/// Identify ingredients in an uploaded photo. An empty list means none were found.
pub async fn detect_ingredients(
    generator: &ContentGenerator,
    image: &[u8],
) -> Result<IngredientList, ContentError> {
    if image.is_empty() {
        return Err(ContentError::Input("Uploaded image is empty".to_string()));
    }
    let content_type = validate_image(image).map_err(ContentError::Input)?;

    let list = generator
        .generate(&DetectGeneration {
            image: ImageData::from_bytes(content_type, image),
        })
        .await?;

    tracing::info!(count = list.ingredients.len(), "Ingredients detected");
    Ok(list)
}
