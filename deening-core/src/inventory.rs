//! Refrigerator inventory.
//!
//! Items are deduplicated by name, category and unit: adding an item that
//! matches an existing one increases its amount instead of creating a row.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ContentError;
use crate::generate::rearrange::RearrangeGeneration;
use crate::generate::ContentGenerator;
use crate::store::{parse_id, Collection, Document, DocumentStore, NewDocument, StoreError};

const ITEM_NOT_FOUND: &str = "Ingredient not found";
const DUPLICATE_ITEM: &str = "An ingredient with the same name, category and unit already exists";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageType {
    #[default]
    Refrigerated,
    Frozen,
    RoomTemperature,
}

/// An item as clients submit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ItemForm {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub storage_type: StorageType,
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub category: String,
    pub storage_type: StorageType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CategoryGroup {
    pub category: String,
    pub ingredients: Vec<InventoryItem>,
}

impl ItemForm {
    fn normalized(self) -> Result<Self, ContentError> {
        let form = ItemForm {
            name: self.name.trim().to_string(),
            unit: self.unit.trim().to_string(),
            category: self.category.trim().to_string(),
            ..self
        };
        if form.name.is_empty() {
            return Err(ContentError::Input(
                "Ingredient name must not be empty".to_string(),
            ));
        }
        if !form.amount.is_finite() || form.amount <= 0.0 {
            return Err(ContentError::Input(format!(
                "Amount for {} must be positive",
                form.name
            )));
        }
        Ok(form)
    }

    fn key(&self) -> String {
        item_key(&self.name, &self.category, &self.unit)
    }

    fn to_document(&self) -> NewDocument {
        NewDocument::keyed(self.key(), json!(self))
    }
}

/// Dedup key for an inventory item.
pub fn item_key(name: &str, category: &str, unit: &str) -> String {
    format!("{}|{}|{}", name, category, unit)
}

fn decode_item(doc: &Document) -> Result<InventoryItem, StoreError> {
    let form: ItemForm = doc.decode()?;
    Ok(InventoryItem {
        id: doc.id,
        name: form.name,
        amount: form.amount,
        unit: form.unit,
        category: form.category,
        storage_type: form.storage_type,
    })
}

async fn all_items(store: &dyn DocumentStore) -> Result<Vec<InventoryItem>, ContentError> {
    let docs = store.find_all(Collection::Refrigerator).await?;
    Ok(docs
        .iter()
        .map(decode_item)
        .collect::<Result<Vec<_>, StoreError>>()?)
}

fn as_patch(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Add items, accumulating onto existing ones with the same name, category and unit.
///
/// Every item is checked before anything is written. Returns how many new
/// rows were created.
pub async fn add_items(
    store: &dyn DocumentStore,
    items: Vec<ItemForm>,
) -> Result<usize, ContentError> {
    let items = items
        .into_iter()
        .map(ItemForm::normalized)
        .collect::<Result<Vec<_>, _>>()?;

    let mut created = 0;
    for item in items {
        if let Some(doc) = store
            .find_by_key(Collection::Refrigerator, &item.key())
            .await?
        {
            // The row may have been deleted since the lookup; fall through to insert.
            if let Some(amount) = store
                .increment(Collection::Refrigerator, doc.id, "amount", item.amount)
                .await?
            {
                tracing::debug!(name = %item.name, amount, "Accumulated inventory item");
                continue;
            }
        }

        store
            .insert(Collection::Refrigerator, item.to_document())
            .await?;
        created += 1;
    }

    Ok(created)
}

/// Collapse forms sharing a name, category and unit into one, summing amounts.
/// First-seen order is kept.
fn merge_duplicates(forms: Vec<ItemForm>) -> Vec<ItemForm> {
    let mut merged: Vec<ItemForm> = Vec::with_capacity(forms.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for form in forms {
        match positions.get(&form.key()) {
            Some(&at) => merged[at].amount += form.amount,
            None => {
                positions.insert(form.key(), merged.len());
                merged.push(form);
            }
        }
    }
    merged
}

fn group(items: Vec<InventoryItem>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.ingredients.push(item),
            None => groups.push(CategoryGroup {
                category: item.category.clone(),
                ingredients: vec![item],
            }),
        }
    }
    groups
}

/// All items grouped by category, categories in ascending order.
pub async fn list_grouped(store: &dyn DocumentStore) -> Result<Vec<CategoryGroup>, ContentError> {
    let mut groups = group(all_items(store).await?);
    groups.sort_by(|a, b| a.category.cmp(&b.category));
    Ok(groups)
}

pub async fn list_category(
    store: &dyn DocumentStore,
    category: &str,
) -> Result<Vec<InventoryItem>, ContentError> {
    Ok(all_items(store)
        .await?
        .into_iter()
        .filter(|item| item.category == category)
        .collect())
}

/// Replace every field of an item.
///
/// Fails with an input error when the new name, category and unit already
/// belong to a different item.
pub async fn update_item(
    store: &dyn DocumentStore,
    id: &str,
    form: ItemForm,
) -> Result<(), ContentError> {
    let id = parse_id(id).ok_or_else(|| ContentError::NotFound(ITEM_NOT_FOUND.to_string()))?;
    let form = form.normalized()?;

    if store
        .find_by_id(Collection::Refrigerator, id)
        .await?
        .is_none()
    {
        return Err(ContentError::NotFound(ITEM_NOT_FOUND.to_string()));
    }
    if let Some(other) = store
        .find_by_key(Collection::Refrigerator, &form.key())
        .await?
    {
        if other.id != id {
            return Err(ContentError::Input(DUPLICATE_ITEM.to_string()));
        }
    }

    let matched = store
        .update(
            Collection::Refrigerator,
            id,
            Some(form.key()),
            as_patch(json!(form)),
        )
        .await?;

    if !matched {
        return Err(ContentError::NotFound(ITEM_NOT_FOUND.to_string()));
    }
    Ok(())
}

pub async fn delete_item(store: &dyn DocumentStore, id: &str) -> Result<(), ContentError> {
    let id = parse_id(id).ok_or_else(|| ContentError::NotFound(ITEM_NOT_FOUND.to_string()))?;
    if !store.delete(Collection::Refrigerator, id).await? {
        return Err(ContentError::NotFound(ITEM_NOT_FOUND.to_string()));
    }
    Ok(())
}

/// Ask the model for a better category layout and replace the inventory with it.
///
/// Storage types are carried over by item name. Groups come back in the
/// model's category order. An empty refrigerator is returned as-is.
pub async fn rearrange(
    generator: &ContentGenerator,
    store: &dyn DocumentStore,
) -> Result<Vec<CategoryGroup>, ContentError> {
    let items = all_items(store).await?;
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let layout = generator
        .generate(&RearrangeGeneration { items: &items })
        .await?;

    let storage: HashMap<String, StorageType> = items
        .iter()
        .map(|item| (item.name.to_lowercase(), item.storage_type))
        .collect();

    let suggested: Vec<ItemForm> = layout
        .categories
        .iter()
        .flat_map(|category| {
            category.ingredients.iter().map(|item| ItemForm {
                name: item.name.trim().to_string(),
                amount: item.amount,
                unit: item.unit.trim().to_string(),
                category: category.category.trim().to_string(),
                storage_type: storage
                    .get(&item.name.trim().to_lowercase())
                    .copied()
                    .unwrap_or_default(),
            })
        })
        .collect();
    let forms = merge_duplicates(suggested);

    let ids = store
        .replace_all(
            Collection::Refrigerator,
            forms.iter().map(ItemForm::to_document).collect(),
        )
        .await?;

    tracing::info!(
        before = items.len(),
        after = forms.len(),
        categories = layout.categories.len(),
        "Refrigerator rearranged"
    );

    let rearranged = ids
        .into_iter()
        .zip(forms)
        .map(|(id, form)| InventoryItem {
            id,
            name: form.name,
            amount: form.amount,
            unit: form.unit,
            category: form.category,
            storage_type: form.storage_type,
        })
        .collect();

    Ok(group(rearranged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;
    use crate::generate::test_support::Harness;
    use crate::store::MemoryStore;

    fn form(name: &str, amount: f64, unit: &str, category: &str) -> ItemForm {
        ItemForm {
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
            category: category.to_string(),
            storage_type: StorageType::default(),
        }
    }

    #[tokio::test]
    async fn test_add_accumulates_matching_item() {
        let store = MemoryStore::new();
        add_items(&store, vec![form("milk", 1.0, "L", "dairy")])
            .await
            .unwrap();
        let created = add_items(
            &store,
            vec![form("milk", 0.5, "L", "dairy"), form("milk", 200.0, "ml", "dairy")],
        )
        .await
        .unwrap();
        assert_eq!(created, 1);

        let dairy = list_category(&store, "dairy").await.unwrap();
        assert_eq!(dairy.len(), 2);
        assert_eq!(dairy[0].amount, 1.5);
        assert_eq!(dairy[0].unit, "L");
        assert_eq!(dairy[1].amount, 200.0);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_items_without_writing() {
        let store = MemoryStore::new();
        let err = add_items(
            &store,
            vec![form("egg", 6.0, "ea", "dairy"), form("milk", 0.0, "L", "dairy")],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ContentError::Input(_)));

        let err = add_items(&store, vec![form("  ", 1.0, "ea", "dairy")])
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Input(_)));

        assert!(list_grouped(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_grouped_sorts_categories() {
        let store = MemoryStore::new();
        add_items(
            &store,
            vec![
                form("pork", 300.0, "g", "meat"),
                form("egg", 6.0, "ea", "dairy"),
                form("beef", 200.0, "g", "meat"),
            ],
        )
        .await
        .unwrap();

        let groups = list_grouped(&store).await.unwrap();
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["dairy", "meat"]);
        assert_eq!(groups[1].ingredients.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        add_items(&store, vec![form("egg", 6.0, "ea", "dairy")])
            .await
            .unwrap();
        let id = list_category(&store, "dairy").await.unwrap()[0].id.to_string();

        let mut replacement = form("egg", 10.0, "ea", "protein");
        replacement.storage_type = StorageType::RoomTemperature;
        update_item(&store, &id, replacement).await.unwrap();

        let moved = list_category(&store, "protein").await.unwrap();
        assert_eq!(moved[0].amount, 10.0);
        assert_eq!(moved[0].storage_type, StorageType::RoomTemperature);

        // The dedup key follows the new fields
        add_items(&store, vec![form("egg", 2.0, "ea", "protein")])
            .await
            .unwrap();
        assert_eq!(list_category(&store, "protein").await.unwrap()[0].amount, 12.0);

        delete_item(&store, &id).await.unwrap();
        let err = delete_item(&store, &id).await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));

        let err = update_item(&store, &id, form("egg", 1.0, "ea", "dairy"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_onto_existing_key_is_rejected() {
        let store = MemoryStore::new();
        add_items(
            &store,
            vec![form("milk", 1.0, "L", "dairy"), form("oat milk", 1.0, "L", "dairy")],
        )
        .await
        .unwrap();
        let oat_id = list_category(&store, "dairy").await.unwrap()[1].id.to_string();

        let err = update_item(&store, &oat_id, form("milk", 2.0, "L", "dairy"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Input(_)));

        add_items(&store, vec![form("milk", 1.0, "L", "dairy")])
            .await
            .unwrap();
        let dairy = list_category(&store, "dairy").await.unwrap();
        let rows: Vec<_> = dairy
            .iter()
            .map(|item| (item.name.as_str(), item.amount))
            .collect();
        assert_eq!(rows, vec![("milk", 2.0), ("oat milk", 1.0)]);

        // Keeping its own key is fine
        update_item(&store, &oat_id, form(" oat milk ", 3.0, "L", "dairy"))
            .await
            .unwrap();
        assert_eq!(list_category(&store, "dairy").await.unwrap()[1].amount, 3.0);
    }

    #[tokio::test]
    async fn test_concurrent_adds_all_accumulate() {
        let store = MemoryStore::new();
        add_items(&store, vec![form("milk", 1.0, "L", "dairy")])
            .await
            .unwrap();

        let (a, b, c) = tokio::join!(
            add_items(&store, vec![form("milk", 1.0, "L", "dairy")]),
            add_items(&store, vec![form("milk", 1.0, "L", "dairy")]),
            add_items(&store, vec![form("milk", 1.0, "L", "dairy")]),
        );
        assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), (0, 0, 0));

        let dairy = list_category(&store, "dairy").await.unwrap();
        assert_eq!(dairy.len(), 1);
        assert_eq!(dairy[0].amount, 4.0);
    }

    #[tokio::test]
    async fn test_delete_malformed_id() {
        let store = MemoryStore::new();
        let err = delete_item(&store, "64f1c2").await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rearrange_replaces_inventory() {
        let store = MemoryStore::new();
        let mut ice_cream = form("ice cream", 1.0, "tub", "snacks");
        ice_cream.storage_type = StorageType::Frozen;
        add_items(&store, vec![form("egg", 6.0, "ea", "misc"), ice_cream])
            .await
            .unwrap();

        let harness = Harness::new(FakeAiClient::new().with_default_response(
            r#"{"categories": [
                {"category": "frozen", "ingredients": [{"name": "Ice cream", "amount": 1, "unit": "tub"}]},
                {"category": "dairy", "ingredients": [{"name": "egg", "amount": 6, "unit": "ea"}]}
            ]}"#,
        ));

        let groups = rearrange(&harness.generator, &store).await.unwrap();
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["frozen", "dairy"]);
        assert_eq!(groups[0].ingredients[0].storage_type, StorageType::Frozen);

        let stored = list_grouped(&store).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(list_category(&store, "misc").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rearrange_malformed_layout_keeps_inventory() {
        let store = MemoryStore::new();
        add_items(&store, vec![form("egg", 6.0, "ea", "misc")])
            .await
            .unwrap();
        let harness =
            Harness::new(FakeAiClient::new().with_default_response(r#"{"shelves": []}"#));

        let err = rearrange(&harness.generator, &store).await.unwrap_err();
        assert!(matches!(err, ContentError::Invalid(_)));
        assert_eq!(list_category(&store, "misc").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rearrange_merges_repeated_items() {
        let store = MemoryStore::new();
        add_items(
            &store,
            vec![form("egg", 3.0, "ea", "misc"), form("egg", 2.0, "ea", "protein")],
        )
        .await
        .unwrap();

        let harness = Harness::new(FakeAiClient::new().with_default_response(
            r#"{"categories": [{"category": "dairy", "ingredients": [
                {"name": "egg", "amount": 3, "unit": "ea"},
                {"name": "milk", "amount": 1, "unit": "L"},
                {"name": " egg", "amount": 2, "unit": "ea"}
            ]}]}"#,
        ));

        let groups = rearrange(&harness.generator, &store).await.unwrap();
        assert_eq!(groups.len(), 1);
        let rows: Vec<_> = groups[0]
            .ingredients
            .iter()
            .map(|item| (item.name.as_str(), item.amount))
            .collect();
        assert_eq!(rows, vec![("egg", 5.0), ("milk", 1.0)]);
        assert_eq!(list_category(&store, "dairy").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_rearrange_rejects_negative_amount() {
        let store = MemoryStore::new();
        add_items(&store, vec![form("egg", 3.0, "ea", "misc")])
            .await
            .unwrap();

        let harness = Harness::new(FakeAiClient::new().with_default_response(
            r#"{"categories": [{"category": "dairy", "ingredients": [
                {"name": "egg", "amount": 3, "unit": "ea"},
                {"name": "egg", "amount": -3, "unit": "ea"}
            ]}]}"#,
        ));

        let err = rearrange(&harness.generator, &store).await.unwrap_err();
        assert!(matches!(err, ContentError::Invalid(_)));
        let misc = list_category(&store, "misc").await.unwrap();
        assert_eq!(misc.len(), 1);
        assert_eq!(misc[0].amount, 3.0);
    }

    #[tokio::test]
    async fn test_rearrange_empty_skips_model() {
        let store = MemoryStore::new();
        let harness = Harness::new(FakeAiClient::new());
        assert!(rearrange(&harness.generator, &store).await.unwrap().is_empty());
        assert_eq!(harness.ai.calls(), 0);
    }
}
