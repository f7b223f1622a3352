//! Content generation pipeline.
//!
//! Each kind of generated content is a struct implementing [`Generation`]:
//! it knows its persona, how to build the instruction from its context, and
//! (optionally) how to describe an illustration of the result.
//! [`ContentGenerator`] runs a generation against the injected collaborators
//! and [`find_or_create`] puts a store lookup in front of it, so a subject is
//! generated at most once.

mod chat;
mod cooking_step;
mod detect;
mod freeform;
mod ingredient;
mod ingredient_info;
pub(crate) mod rearrange;
mod recipe;
mod substitution;

pub use chat::{answer_question, ChatGeneration};
pub use cooking_step::{explain_step, step_key, CookingStepGeneration};
pub use detect::{detect_ingredients, DetectGeneration};
pub use freeform::{complete_prompt, FreeformGeneration};
pub use ingredient::{describe_ingredient, IngredientGeneration};
pub use ingredient_info::{ingredient_info, IngredientInfoGeneration};
pub use recipe::{create_recipe, get_recipe, search_recipes, RecipeGeneration, RecipeSummary};
pub use substitution::{suggest_substitute, SubstitutionGeneration};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::ai::{AiClient, ChatMessage, ChatRequest, ImageData, ImageGenerator};
use crate::error::ContentError;
use crate::http::HttpClient;
use crate::image::{fetch_and_validate_image, MediaAsset};
use crate::store::{parse_id, Collection, DocumentStore, NewDocument, StoreError};
use crate::types::{ContentKind, ContentVariant, StructuredContent};

/// One kind of generated content.
pub trait Generation: Send + Sync {
    type Output: ContentVariant + Send;

    /// Name used in logs for this prompt.
    fn prompt_name(&self) -> &'static str;

    fn system_prompt(&self) -> &'static str;

    /// Build the user instruction from this generation's context.
    fn build_prompt(&self) -> String;

    fn kind(&self) -> ContentKind {
        Self::Output::KIND
    }

    /// Images sent alongside the instruction.
    fn images(&self) -> Vec<ImageData> {
        Vec::new()
    }

    fn temperature(&self) -> Option<f32> {
        None
    }

    /// Parse and validate the model's raw output.
    fn parse(&self, text: &str) -> Result<Self::Output, ContentError> {
        let content = StructuredContent::parse(self.kind(), text)?;
        Self::Output::from_content(content).ok_or_else(|| {
            ContentError::Invalid(format!("expected {} content", Self::Output::KIND))
        })
    }

    /// Prompt for an illustration of the result, if this content has one.
    fn image_prompt(&self, _output: &Self::Output) -> Option<String> {
        None
    }
}

/// Generated content plus its embedded illustration, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Illustrated<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

/// A stored value together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    pub id: Uuid,
    pub content: T,
}

/// Runs generations against the text model, the image model and the media fetcher.
#[derive(Clone)]
pub struct ContentGenerator {
    ai: Arc<dyn AiClient>,
    images: Arc<dyn ImageGenerator>,
    http: Arc<dyn HttpClient>,
}

impl ContentGenerator {
    pub fn new(
        ai: Arc<dyn AiClient>,
        images: Arc<dyn ImageGenerator>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self { ai, images, http }
    }

    /// Prompt, complete, extract, parse, validate. No retries.
    pub async fn generate<G: Generation>(&self, generation: &G) -> Result<G::Output, ContentError> {
        let kind = generation.kind();
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(generation.system_prompt()),
                ChatMessage::user_with_images(generation.build_prompt(), generation.images()),
            ],
            max_tokens: None,
            temperature: generation.temperature(),
            json_response: kind != ContentKind::ChatAnswer,
        };

        tracing::debug!(kind = %kind, "Generating content");
        let response = self.ai.complete(generation.prompt_name(), request).await?;

        generation.parse(&response.content).inspect_err(|e| {
            tracing::warn!(kind = %kind, error = %e, "Generated content rejected");
        })
    }

    /// Generate an image and return its remote reference.
    pub async fn illustrate(&self, prompt: &str) -> Result<MediaAsset, ContentError> {
        let image = self.images.generate(prompt).await?;
        tracing::debug!("Image generated");
        Ok(MediaAsset::Remote { url: image.url })
    }

    /// Fetch a remote asset and embed it. Embedded assets pass through.
    pub async fn embed(&self, asset: MediaAsset) -> Result<MediaAsset, ContentError> {
        match asset {
            MediaAsset::Remote { url } => {
                let image = fetch_and_validate_image(self.http.as_ref(), &url).await?;
                Ok(MediaAsset::embed(&image))
            }
            embedded @ MediaAsset::Embedded { .. } => Ok(embedded),
        }
    }

    /// Generate content and, if it has one, its illustration as a remote reference.
    pub async fn generate_illustrated<G: Generation>(
        &self,
        generation: &G,
    ) -> Result<(G::Output, Option<MediaAsset>), ContentError> {
        let content = self.generate(generation).await?;
        let image = match generation.image_prompt(&content) {
            Some(prompt) => Some(self.illustrate(&prompt).await?),
            None => None,
        };
        Ok((content, image))
    }

    /// Generate content with a self-contained illustration, ready to persist.
    pub async fn generate_embedded<G: Generation>(
        &self,
        generation: &G,
    ) -> Result<Illustrated<G::Output>, ContentError> {
        let (content, image) = self.generate_illustrated(generation).await?;
        let image_base64 = match image {
            Some(asset) => Some(self.embed(asset).await?.to_uri()),
            None => None,
        };
        Ok(Illustrated {
            content,
            image_base64,
        })
    }
}

/// Return the record stored under `key`, or create, insert and return it.
///
/// A hit returns the stored record without calling `create`. A miss calls it
/// once and inserts exactly one document; if `create` fails nothing is stored.
pub async fn find_or_create<T, F, Fut>(
    store: &dyn DocumentStore,
    collection: Collection,
    key: &str,
    create: F,
) -> Result<Record<T>, ContentError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ContentError>>,
{
    if let Some(doc) = store.find_by_key(collection, key).await? {
        tracing::debug!(collection = collection.as_str(), id = %doc.id, "Cache hit");
        return Ok(Record {
            id: doc.id,
            content: doc.decode()?,
        });
    }

    tracing::debug!(collection = collection.as_str(), "Cache miss");
    let content = create().await?;
    let body = serde_json::to_value(&content)
        .map_err(|e| StoreError::Query(format!("Failed to encode document: {}", e)))?;
    let id = store
        .insert(collection, NewDocument::keyed(key, body))
        .await?;

    tracing::info!(collection = collection.as_str(), id = %id, "Stored generated content");
    Ok(Record { id, content })
}

/// Load a typed record by client-supplied id. Unknown or malformed ids are `NotFound`.
pub async fn load<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
    not_found: &str,
) -> Result<Record<T>, ContentError> {
    let id = parse_id(id).ok_or_else(|| ContentError::NotFound(not_found.to_string()))?;
    let doc = store
        .find_by_id(collection, id)
        .await?
        .ok_or_else(|| ContentError::NotFound(not_found.to_string()))?;
    Ok(Record {
        id,
        content: doc.decode()?,
    })
}

pub(crate) const RECIPE_NOT_FOUND: &str = "Recipe not found";

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ai::{FakeAiClient, FakeImageGenerator};
    use crate::http::MockClient;

    pub const IMAGE_URL: &str = "https://images.example/generated.png";

    pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    pub const KIMCHI_STEW: &str = r#"```json
{
  "name": "kimchi stew",
  "description": "A spicy, comforting Korean stew",
  "servings": 2,
  "prepTime": "10 minutes",
  "cookTime": "20 minutes",
  "totalTime": "30 minutes",
  "difficulty": "easy",
  "ingredients": [
    {"name": "kimchi", "amount": 200, "unit": "g"},
    {"name": "pork belly", "amount": 150, "unit": "g"},
    {"name": "tofu", "amount": 0.5, "unit": "block"}
  ],
  "instructions": [
    {"step": 1, "description": "Saute the pork and kimchi."},
    {"step": 2, "description": "Add water and tofu, then simmer."}
  ],
  "nutrition": {"calories": 420, "protein": "25", "carbohydrates": "12", "fat": "30"},
  "tags": ["korean", "stew"],
  "source": "traditional"
}
```"#;

    pub struct Harness {
        pub ai: Arc<FakeAiClient>,
        pub images: Arc<FakeImageGenerator>,
        pub http: Arc<MockClient>,
        pub generator: ContentGenerator,
    }

    impl Harness {
        pub fn new(ai: FakeAiClient) -> Self {
            Self::with_images(ai, FakeImageGenerator::new(IMAGE_URL))
        }

        pub fn with_images(ai: FakeAiClient, images: FakeImageGenerator) -> Self {
            let ai = Arc::new(ai);
            let images = Arc::new(images);
            let http = Arc::new(MockClient::new().with_bytes(IMAGE_URL, PNG_BYTES.to_vec()));
            let generator = ContentGenerator::new(ai.clone(), images.clone(), http.clone());
            Self {
                ai,
                images,
                http,
                generator,
            }
        }
    }
}
