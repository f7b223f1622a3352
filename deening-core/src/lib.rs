pub mod ai;
pub mod error;
pub mod extract;
pub mod generate;
pub mod http;
pub mod image;
pub mod inventory;
pub mod preference;
pub mod store;
pub mod types;

pub use error::{ContentError, FetchError};
pub use generate::{ContentGenerator, Generation, Illustrated, Record};
pub use http::{HttpClient, MockClient, MockResponse, ReqwestClient};
pub use image::{fetch_and_validate_image, validate_image, FetchedImage, MediaAsset, MAX_FILE_SIZE};
pub use inventory::{CategoryGroup, InventoryItem, ItemForm, StorageType};
pub use preference::{Keyword, KeywordType, UpdateOutcome};
pub use store::{Collection, Document, DocumentStore, MemoryStore, NewDocument, StoreError};
pub use types::{
    ChatAnswer, ContentKind, CookingStep, IngredientInfo, IngredientList, IngredientProfile,
    Recipe, StructuredContent, SubstitutionSuggestion,
};
