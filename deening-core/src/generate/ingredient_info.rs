//! Ingredient info entries, cached by ingredient name.

use super::{find_or_create, ContentGenerator, Generation, Illustrated, Record};
use crate::ai::prompts::ingredient_info::{
    render_ingredient_info_image_prompt, render_ingredient_info_prompt,
    INGREDIENT_INFO_PROMPT_NAME, INGREDIENT_INFO_SYSTEM_PROMPT,
};
use crate::error::ContentError;
use crate::store::{Collection, DocumentStore};
use crate::types::IngredientInfo;

#[derive(Debug)]
pub struct IngredientInfoGeneration<'a> {
    pub ingredient_name: &'a str,
}

impl Generation for IngredientInfoGeneration<'_> {
    type Output = IngredientInfo;

    fn prompt_name(&self) -> &'static str {
        INGREDIENT_INFO_PROMPT_NAME
    }

    fn system_prompt(&self) -> &'static str {
        INGREDIENT_INFO_SYSTEM_PROMPT
    }

    fn build_prompt(&self) -> String {
        render_ingredient_info_prompt(self.ingredient_name)
    }

    fn image_prompt(&self, info: &IngredientInfo) -> Option<String> {
        Some(render_ingredient_info_image_prompt(info))
    }
}

pub async fn ingredient_info(
    generator: &ContentGenerator,
    store: &dyn DocumentStore,
    ingredient_name: &str,
) -> Result<Record<Illustrated<IngredientInfo>>, ContentError> {
    let ingredient_name = ingredient_name.trim();
    if ingredient_name.is_empty() {
        return Err(ContentError::Input(
            "ingredient_name must not be empty".to_string(),
        ));
    }

    find_or_create(store, Collection::Ingredients, ingredient_name, || async move {
        generator
            .generate_embedded(&IngredientInfoGeneration { ingredient_name })
            .await
    })
    .await
}
