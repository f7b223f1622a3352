//! Structured content produced by the text model.
//!
//! Every schema is parsed strictly: required fields carry no serde defaults,
//! so missing or mistyped fields are rejected. Unknown fields are ignored.
//! After parsing, [`Schema::validate`] enforces the semantic minimums.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::ContentError;
use crate::extract::parse_json_object;

/// Semantic checks that run after a schema has been deserialized.
pub trait Schema {
    fn validate(&self) -> Result<(), String>;
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} must not be blank", field))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub servings: u32,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub difficulty: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<Instruction>,
    pub nutrition: Nutrition,
    pub tags: Vec<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecipeIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Instruction {
    pub step: u32,
    pub description: String,
}

/// Per-serving nutrition. Macronutrients are grams, kept as the model wrote them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Nutrition {
    pub calories: u32,
    pub protein: String,
    pub carbohydrates: String,
    pub fat: String,
}

impl Recipe {
    pub fn has_ingredient(&self, name: &str) -> bool {
        self.ingredients.iter().any(|i| i.name == name)
    }
}

impl Schema for Recipe {
    fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        if self.ingredients.is_empty() {
            return Err("recipe has no ingredients".to_string());
        }
        if self.instructions.is_empty() {
            return Err("recipe has no instructions".to_string());
        }
        for ingredient in &self.ingredients {
            require("ingredient name", &ingredient.name)?;
        }
        for instruction in &self.instructions {
            if instruction.step == 0 {
                return Err("instruction steps start at 1".to_string());
            }
            require("instruction description", &instruction.description)?;
        }
        Ok(())
    }
}

/// Nutrition-oriented profile of a single ingredient (not persisted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IngredientProfile {
    pub name: String,
    pub description: String,
    pub category: String,
    pub nutritional_info: IngredientNutrition,
    pub storage_tips: String,
    pub culinary_uses: Vec<String>,
}

/// Nutrition per 100g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IngredientNutrition {
    pub calories: u32,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub fiber: f64,
    pub vitamins: String,
    pub minerals: String,
}

impl Schema for IngredientProfile {
    fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        if self.culinary_uses.is_empty() {
            return Err("ingredient has no culinary uses".to_string());
        }
        Ok(())
    }
}

/// Encyclopedia-style ingredient entry, cached by ingredient name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IngredientInfo {
    pub name: String,
    pub description: String,
    pub category: String,
    pub season: String,
    pub alternatives: Vec<String>,
}

impl Schema for IngredientInfo {
    fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        if self.alternatives.is_empty() {
            return Err("ingredient info has no alternatives".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CookingStep {
    pub recipe_id: String,
    pub step_number: u32,
    pub description: String,
}

impl Schema for CookingStep {
    fn validate(&self) -> Result<(), String> {
        require("description", &self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubstitutionSuggestion {
    pub replaced_ingredient: String,
    pub taste_change_description: String,
}

impl Schema for SubstitutionSuggestion {
    fn validate(&self) -> Result<(), String> {
        require("replaced_ingredient", &self.replaced_ingredient)?;
        require("taste_change_description", &self.taste_change_description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatAnswer {
    pub answer: String,
}

impl Schema for ChatAnswer {
    fn validate(&self) -> Result<(), String> {
        require("answer", &self.answer)
    }
}

/// Ingredients detected in a photo. An empty list means nothing was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientList {
    pub ingredients: Vec<String>,
}

impl IngredientList {
    /// Trim names and drop blanks and duplicates, keeping first-seen order.
    pub fn normalized(self) -> Self {
        let mut seen = HashSet::new();
        let ingredients = self
            .ingredients
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty() && seen.insert(name.to_lowercase()))
            .collect();
        Self { ingredients }
    }
}

impl Schema for IngredientList {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Category grouping suggested by the model when rearranging the refrigerator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefrigeratorLayout {
    pub categories: Vec<LayoutCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCategory {
    pub category: String,
    pub ingredients: Vec<LayoutItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl Schema for RefrigeratorLayout {
    fn validate(&self) -> Result<(), String> {
        for category in &self.categories {
            require("category", &category.category)?;
            for item in &category.ingredients {
                require("ingredient name", &item.name)?;
                if !item.amount.is_finite() || item.amount <= 0.0 {
                    return Err(format!("amount for {} must be positive", item.name.trim()));
                }
            }
        }
        Ok(())
    }
}

/// Names each kind of structured content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Recipe,
    IngredientProfile,
    IngredientInfo,
    CookingStep,
    SubstitutionSuggestion,
    ChatAnswer,
    IngredientList,
    RefrigeratorLayout,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Recipe => "recipe",
            ContentKind::IngredientProfile => "ingredient_profile",
            ContentKind::IngredientInfo => "ingredient_info",
            ContentKind::CookingStep => "cooking_step",
            ContentKind::SubstitutionSuggestion => "substitution",
            ContentKind::ChatAnswer => "chat_answer",
            ContentKind::IngredientList => "ingredient_list",
            ContentKind::RefrigeratorLayout => "refrigerator_layout",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema-validated result of a text generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredContent {
    Recipe(Recipe),
    IngredientProfile(IngredientProfile),
    IngredientInfo(IngredientInfo),
    CookingStep(CookingStep),
    SubstitutionSuggestion(SubstitutionSuggestion),
    ChatAnswer(ChatAnswer),
    IngredientList(IngredientList),
    RefrigeratorLayout(RefrigeratorLayout),
}

fn strict<T>(text: &str) -> Result<T, ContentError>
where
    T: serde::de::DeserializeOwned + Schema,
{
    let parsed: T = parse_json_object(text)?;
    parsed.validate().map_err(ContentError::Invalid)?;
    Ok(parsed)
}

impl StructuredContent {
    /// Parse raw model output as the given kind. Fails closed: any missing
    /// or mistyped field, or a failed semantic check, is `ContentError::Invalid`.
    pub fn parse(kind: ContentKind, text: &str) -> Result<Self, ContentError> {
        Ok(match kind {
            ContentKind::Recipe => StructuredContent::Recipe(strict(text)?),
            ContentKind::IngredientProfile => StructuredContent::IngredientProfile(strict(text)?),
            ContentKind::IngredientInfo => StructuredContent::IngredientInfo(strict(text)?),
            ContentKind::CookingStep => StructuredContent::CookingStep(strict(text)?),
            ContentKind::SubstitutionSuggestion => {
                StructuredContent::SubstitutionSuggestion(strict(text)?)
            }
            ContentKind::ChatAnswer => {
                let answer = ChatAnswer {
                    answer: text.trim().to_string(),
                };
                answer.validate().map_err(ContentError::Invalid)?;
                StructuredContent::ChatAnswer(answer)
            }
            ContentKind::IngredientList => {
                let list: IngredientList = strict(text)?;
                StructuredContent::IngredientList(list.normalized())
            }
            ContentKind::RefrigeratorLayout => {
                StructuredContent::RefrigeratorLayout(strict(text)?)
            }
        })
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            StructuredContent::Recipe(_) => ContentKind::Recipe,
            StructuredContent::IngredientProfile(_) => ContentKind::IngredientProfile,
            StructuredContent::IngredientInfo(_) => ContentKind::IngredientInfo,
            StructuredContent::CookingStep(_) => ContentKind::CookingStep,
            StructuredContent::SubstitutionSuggestion(_) => ContentKind::SubstitutionSuggestion,
            StructuredContent::ChatAnswer(_) => ContentKind::ChatAnswer,
            StructuredContent::IngredientList(_) => ContentKind::IngredientList,
            StructuredContent::RefrigeratorLayout(_) => ContentKind::RefrigeratorLayout,
        }
    }
}

/// Lets a generation pull its own variant back out of a [`StructuredContent`].
pub trait ContentVariant: Sized {
    const KIND: ContentKind;

    fn from_content(content: StructuredContent) -> Option<Self>;
}

macro_rules! content_variant {
    ($ty:ident) => {
        impl ContentVariant for $ty {
            const KIND: ContentKind = ContentKind::$ty;

            fn from_content(content: StructuredContent) -> Option<Self> {
                match content {
                    StructuredContent::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

content_variant!(Recipe);
content_variant!(IngredientProfile);
content_variant!(IngredientInfo);
content_variant!(CookingStep);
content_variant!(SubstitutionSuggestion);
content_variant!(ChatAnswer);
content_variant!(IngredientList);
content_variant!(RefrigeratorLayout);
