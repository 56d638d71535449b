// src/store/mod.rs
//! Document store collaborator.
//!
//! The catalog only needs a handful of operations from its backing store:
//! list a collection sorted on one field, fetch/create/update/delete a
//! single document by its generated id. Backends implement
//! [`DocumentStore`] and are handed to the repository as
//! `Arc<dyn DocumentStore>`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Field map of a stored document (the record shape on the wire).
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("document {0} not found")]
    NotFound(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(
        &self,
        collection: &str,
        sort_key: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Persists a new document and returns the id the store generated for it.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Merges `fields` into an existing document. Keys not present in
    /// `fields` keep their stored value.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Removes a document. Deleting an id that does not exist succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
