//! Liked and disliked keywords.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::error::ContentError;
use crate::store::{parse_id, Collection, DocumentStore, NewDocument};

const KEYWORD_NOT_FOUND: &str = "Keyword not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum KeywordType {
    Like,
    Dislike,
}

impl KeywordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordType::Like => "LIKE",
            KeywordType::Dislike => "DISLIKE",
        }
    }
}

impl fmt::Display for KeywordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Keyword {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub keyword_type: KeywordType,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredKeyword {
    name: String,
    #[serde(rename = "type")]
    keyword_type: KeywordType,
}

/// Result of a keyword update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Unchanged,
}

/// Dedup key for a keyword.
pub fn keyword_key(name: &str, keyword_type: KeywordType) -> String {
    format!("{}|{}", name, keyword_type)
}

fn clean_name(name: &str) -> Result<String, ContentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ContentError::Input("Keyword must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn duplicate() -> ContentError {
    ContentError::Input("Keyword already exists".to_string())
}

pub async fn list_keywords(store: &dyn DocumentStore) -> Result<Vec<Keyword>, ContentError> {
    let docs = store.find_all(Collection::Preferences).await?;
    let mut keywords = Vec::with_capacity(docs.len());
    for doc in docs {
        let stored: StoredKeyword = doc.decode()?;
        keywords.push(Keyword {
            id: doc.id,
            name: stored.name,
            keyword_type: stored.keyword_type,
        });
    }
    Ok(keywords)
}

/// Add a keyword. The same name may be both liked and disliked, but each pair only once.
pub async fn add_keyword(
    store: &dyn DocumentStore,
    name: &str,
    keyword_type: KeywordType,
) -> Result<Uuid, ContentError> {
    let name = clean_name(name)?;
    let key = keyword_key(&name, keyword_type);

    if store
        .find_by_key(Collection::Preferences, &key)
        .await?
        .is_some()
    {
        return Err(duplicate());
    }

    let body = json!(StoredKeyword { name, keyword_type });
    Ok(store
        .insert(Collection::Preferences, NewDocument::keyed(key, body))
        .await?)
}

/// Change a keyword's name and/or type. Fields left `None` keep their value.
pub async fn update_keyword(
    store: &dyn DocumentStore,
    id: &str,
    name: Option<&str>,
    keyword_type: Option<KeywordType>,
) -> Result<UpdateOutcome, ContentError> {
    let id = parse_id(id).ok_or_else(|| ContentError::NotFound(KEYWORD_NOT_FOUND.to_string()))?;
    let doc = store
        .find_by_id(Collection::Preferences, id)
        .await?
        .ok_or_else(|| ContentError::NotFound(KEYWORD_NOT_FOUND.to_string()))?;
    let current: StoredKeyword = doc.decode()?;

    let name = match name {
        Some(name) => clean_name(name)?,
        None => current.name.clone(),
    };
    let keyword_type = keyword_type.unwrap_or(current.keyword_type);

    if name == current.name && keyword_type == current.keyword_type {
        return Ok(UpdateOutcome::Unchanged);
    }

    let key = keyword_key(&name, keyword_type);
    if let Some(other) = store.find_by_key(Collection::Preferences, &key).await? {
        if other.id != id {
            return Err(duplicate());
        }
    }

    let patch = match json!(StoredKeyword { name, keyword_type }) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let matched = store
        .update(Collection::Preferences, id, Some(key), patch)
        .await?;
    if !matched {
        return Err(ContentError::NotFound(KEYWORD_NOT_FOUND.to_string()));
    }

    Ok(UpdateOutcome::Updated)
}

pub async fn delete_keyword(store: &dyn DocumentStore, id: &str) -> Result<(), ContentError> {
    let id = parse_id(id).ok_or_else(|| ContentError::NotFound(KEYWORD_NOT_FOUND.to_string()))?;
    if !store.delete(Collection::Preferences, id).await? {
        return Err(ContentError::NotFound(KEYWORD_NOT_FOUND.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_add_and_list() {
        let store = MemoryStore::new();
        add_keyword(&store, "spicy", KeywordType::Like).await.unwrap();
        add_keyword(&store, "spicy", KeywordType::Dislike).await.unwrap();

        let keywords = list_keywords(&store).await.unwrap();
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].name, "spicy");
        assert_eq!(keywords[1].keyword_type, KeywordType::Dislike);
    }

    #[tokio::test]
    async fn test_duplicate_pair_is_rejected() {
        let store = MemoryStore::new();
        add_keyword(&store, "cilantro", KeywordType::Dislike)
            .await
            .unwrap();
        let err = add_keyword(&store, " cilantro ", KeywordType::Dislike)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Input(_)));
    }

    #[tokio::test]
    async fn test_update_keyword() {
        let store = MemoryStore::new();
        let id = add_keyword(&store, "garlic", KeywordType::Like)
            .await
            .unwrap()
            .to_string();
        add_keyword(&store, "onion", KeywordType::Dislike)
            .await
            .unwrap();

        let outcome = update_keyword(&store, &id, Some("garlic"), None)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Unchanged);

        let outcome = update_keyword(&store, &id, None, Some(KeywordType::Dislike))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);

        let err = update_keyword(&store, &id, Some("onion"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Input(_)));

        let keywords = list_keywords(&store).await.unwrap();
        assert_eq!(keywords[0].keyword_type, KeywordType::Dislike);

        // The old pair is free again
        add_keyword(&store, "garlic", KeywordType::Like).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4().to_string();
        assert!(matches!(
            update_keyword(&store, &missing, Some("x"), None).await,
            Err(ContentError::NotFound(_))
        ));
        assert!(matches!(
            delete_keyword(&store, &missing).await,
            Err(ContentError::NotFound(_))
        ));
        assert!(matches!(
            delete_keyword(&store, "nope").await,
            Err(ContentError::NotFound(_))
        ));
    }
}
