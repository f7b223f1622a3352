//! Ingredient profiles. Generated fresh on every request and never stored,
//! so the illustration is handed back as the generator's URL.

use super::{ContentGenerator, Generation};
use crate::ai::prompts::ingredient::{
    render_ingredient_image_prompt, render_ingredient_prompt, INGREDIENT_PROMPT_NAME,
    INGREDIENT_SYSTEM_PROMPT,
};
use crate::error::ContentError;
use crate::image::MediaAsset;
use crate::types::IngredientProfile;

#[derive(Debug)]
pub struct IngredientGeneration<'a> {
    pub ingredient_name: &'a str,
}

impl Generation for IngredientGeneration<'_> {
    type Output = IngredientProfile;

    fn prompt_name(&self) -> &'static str {
        INGREDIENT_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        INGREDIENT_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        render_ingredient_prompt(self.ingredient_name)
    }

    fn image_prompt(&self, profile: &IngredientProfile) -> Option<String> {
        Some(render_ingredient_image_prompt(profile))
    }
}

pub async fn describe_ingredient(
    generator: &ContentGenerator,
    ingredient_name: &str,
) -> Result<(IngredientProfile, MediaAsset), ContentError> {
    let ingredient_name = ingredient_name.trim();
    if ingredient_name.is_empty() {
        return Err(ContentError::Input(
            "ingredient_name must not be empty".to_string(),
        ));
    }

    let generation = IngredientGeneration { ingredient_name };
    let (profile, image) = generator.generate_illustrated(&generation).await?;
    let image = image.ok_or_else(|| ContentError::Upstream("No image was generated".to_string()))?;
    Ok((profile, image))
}
