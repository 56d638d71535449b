// src/store/postgres.rs
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, info, instrument};

use super::{generate_id, Document, DocumentStore, Fields, SortDirection, StoreError};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            fields: row.data.0,
        }
    }
}

/// Equal sort keys fall back to insertion order in the same direction,
/// matching the memory store.
fn list_sql(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => {
            "SELECT id, data FROM documents WHERE collection = $1 ORDER BY data -> $2 ASC, seq ASC"
        }
        SortDirection::Descending => {
            "SELECT id, data FROM documents WHERE collection = $1 ORDER BY data -> $2 DESC, seq DESC"
        }
    }
}

/// Documents kept as JSONB rows keyed by `(collection, id)`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = create_pool(database_url).await.map_err(|e| {
            error!(?e, "Failed to create database pool");
            StoreError::from(e)
        })?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id         TEXT NOT NULL,
                data       JSONB NOT NULL,
                seq        BIGSERIAL,
                PRIMARY KEY (collection, id)
             )",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("ALTER TABLE documents ADD COLUMN IF NOT EXISTS seq BIGSERIAL")
            .execute(&self.pool)
            .await?;
        info!("Document table ready");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self))]
    async fn list(
        &self,
        collection: &str,
        sort_key: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>, StoreError> {
        let sql = list_sql(direction);

        let rows = sqlx::query_as::<_, DocumentRow>(sql)
            .bind(collection)
            .bind(sort_key)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    #[instrument(skip(self))]
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }

    #[instrument(skip(self, fields))]
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = generate_id();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(Json(fields))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_follow_insertion_order_in_sort_direction() {
        assert!(list_sql(SortDirection::Descending).ends_with("DESC, seq DESC"));
        assert!(list_sql(SortDirection::Ascending).ends_with("ASC, seq ASC"));
    }
}
