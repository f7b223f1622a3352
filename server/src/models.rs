use chrono::{DateTime, Utc};
use deening_core::store::Document;
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

#[derive(Queryable, QueryableByName, Selectable, Debug)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct DocumentRow {
    pub id: Uuid,
    pub seq: i64,
    pub collection: String,
    pub lookup_key: Option<String>,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            key: row.lookup_key,
            body: row.body,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::documents)]
pub struct NewDocumentRow {
    pub id: Uuid,
    pub collection: String,
    pub lookup_key: Option<String>,
    pub body: Value,
}
