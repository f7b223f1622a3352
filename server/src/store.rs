//! PostgreSQL document store.
//!
//! Every collection lives in the single `documents` table, distinguished by
//! the `collection` column. Diesel is synchronous, so each operation runs on
//! the blocking pool with its own pooled connection.

use async_trait::async_trait;
use deening_core::store::{Collection, Document, DocumentStore, NewDocument, StoreError};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Array, Double, Jsonb, Nullable, Text, Uuid as DieselUuid};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{DocumentRow, NewDocumentRow};
use crate::raw_sql;
use crate::schema::documents;

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, op: &'static str, collection: Collection, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> QueryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let _span =
                tracing::debug_span!("db.query", op, collection = collection.as_str()).entered();
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            f(&mut conn).map_err(|e| {
                tracing::error!(op, error = %e, "Query failed");
                StoreError::Query(e.to_string())
            })
        })
        .await
        .map_err(|e| StoreError::Connection(format!("Store task failed: {}", e)))?
    }
}

#[derive(QueryableByName)]
struct IncrementedValue {
    #[diesel(sql_type = Double)]
    value: f64,
}

fn new_row(collection: Collection, doc: NewDocument) -> NewDocumentRow {
    NewDocumentRow {
        id: Uuid::new_v4(),
        collection: collection.as_str().to_string(),
        lookup_key: doc.key,
        body: doc.body,
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_by_key(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<Document>, StoreError> {
        let key = key.to_string();
        let row = self
            .run("find_by_key", collection, move |conn| {
                documents::table
                    .filter(documents::collection.eq(collection.as_str()))
                    .filter(documents::lookup_key.eq(key))
                    .order(documents::seq.asc())
                    .select(DocumentRow::as_select())
                    .first(conn)
                    .optional()
            })
            .await?;
        Ok(row.map(Document::from))
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let row = self
            .run("find_by_id", collection, move |conn| {
                documents::table
                    .filter(documents::collection.eq(collection.as_str()))
                    .filter(documents::id.eq(id))
                    .select(DocumentRow::as_select())
                    .first(conn)
                    .optional()
            })
            .await?;
        Ok(row.map(Document::from))
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let rows = self
            .run("find_all", collection, move |conn| {
                documents::table
                    .filter(documents::collection.eq(collection.as_str()))
                    .order(documents::seq.asc())
                    .select(DocumentRow::as_select())
                    .load(conn)
            })
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn search(
        &self,
        collection: Collection,
        fields: &[&str],
        needle: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let pattern = raw_sql::like_pattern(needle);
        let rows: Vec<DocumentRow> = self
            .run("search", collection, move |conn| {
                sql_query(raw_sql::SEARCH_QUERY)
                    .bind::<Text, _>(collection.as_str())
                    .bind::<Array<Text>, _>(fields)
                    .bind::<Text, _>(pattern)
                    .load(conn)
            })
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn insert(&self, collection: Collection, doc: NewDocument) -> Result<Uuid, StoreError> {
        let row = new_row(collection, doc);
        let id = row.id;
        self.run("insert", collection, move |conn| {
            diesel::insert_into(documents::table)
                .values(&row)
                .execute(conn)
        })
        .await?;
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        key: Option<String>,
        patch: Map<String, Value>,
    ) -> Result<bool, StoreError> {
        let updated = self
            .run("update", collection, move |conn| {
                sql_query(raw_sql::MERGE_BODY_QUERY)
                    .bind::<Jsonb, _>(Value::Object(patch))
                    .bind::<Nullable<Text>, _>(key)
                    .bind::<DieselUuid, _>(id)
                    .bind::<Text, _>(collection.as_str())
                    .execute(conn)
            })
            .await?;
        Ok(updated > 0)
    }

    async fn increment(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        delta: f64,
    ) -> Result<Option<f64>, StoreError> {
        let field = field.to_string();
        let row = self
            .run("increment", collection, move |conn| {
                sql_query(raw_sql::INCREMENT_FIELD_QUERY)
                    .bind::<Text, _>(field)
                    .bind::<Double, _>(delta)
                    .bind::<DieselUuid, _>(id)
                    .bind::<Text, _>(collection.as_str())
                    .get_result::<IncrementedValue>(conn)
                    .optional()
            })
            .await?;
        Ok(row.map(|r| r.value))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let deleted = self
            .run("delete", collection, move |conn| {
                diesel::delete(
                    documents::table
                        .filter(documents::collection.eq(collection.as_str()))
                        .filter(documents::id.eq(id)),
                )
                .execute(conn)
            })
            .await?;
        Ok(deleted > 0)
    }

    async fn replace_all(
        &self,
        collection: Collection,
        docs: Vec<NewDocument>,
    ) -> Result<Vec<Uuid>, StoreError> {
        let rows: Vec<NewDocumentRow> = docs
            .into_iter()
            .map(|doc| new_row(collection, doc))
            .collect();
        let ids = rows.iter().map(|row| row.id).collect();

        self.run("replace_all", collection, move |conn| {
            conn.transaction(|conn| {
                diesel::delete(
                    documents::table.filter(documents::collection.eq(collection.as_str())),
                )
                .execute(conn)?;
                if !rows.is_empty() {
                    diesel::insert_into(documents::table)
                        .values(&rows)
                        .execute(conn)?;
                }
                Ok(())
            })
        })
        .await?;

        Ok(ids)
    }
}
