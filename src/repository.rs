// src/repository.rs
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, instrument, warn};

use crate::models::product::{Product, ProductRecord};
use crate::store::{DocumentStore, SortDirection, StoreError};
use crate::validation::NewProduct;

pub const DEFAULT_COLLECTION: &str = "products";
const SORT_KEY: &str = "createdAt";

/// What an edit does to a product's creation timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    #[default]
    PreserveOnEdit,
    ResetOnEdit,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    StoreUnavailable(String),

    #[error("Product not found")]
    NotFound,
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => RepositoryError::NotFound,
            StoreError::Unavailable(msg) => RepositoryError::StoreUnavailable(msg),
        }
    }
}

/// Translates catalog operations into document-store calls.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
    timestamps: TimestampPolicy,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            collection: DEFAULT_COLLECTION.to_string(),
            timestamps: TimestampPolicy::default(),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.timestamps = policy;
        self
    }

    /// All products, newest first.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let docs = self
            .store
            .list(&self.collection, SORT_KEY, SortDirection::Descending)
            .await
            .map_err(|e| {
                error!(?e, "Failed to fetch products");
                RepositoryError::from(e)
            })?;

        docs.into_iter()
            .map(|doc| {
                let id = doc.id.clone();
                Product::try_from(doc).map_err(|e| {
                    error!(%id, ?e, "Stored product has an unexpected shape");
                    RepositoryError::StoreUnavailable(format!("Product {id} could not be read"))
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Product, RepositoryError> {
        let doc = self
            .store
            .get(&self.collection, id)
            .await
            .map_err(|e| {
                error!(?e, "Failed to fetch product");
                RepositoryError::from(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        Product::try_from(doc).map_err(|e| {
            error!(?e, "Stored product has an unexpected shape");
            RepositoryError::StoreUnavailable(format!("Product {id} could not be read"))
        })
    }

    #[instrument(skip(self, product))]
    pub async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let record = ProductRecord {
            name: product.name,
            image_url: product.image_url,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            created_at: Utc::now(),
        };
        let fields = record.clone().into_fields().map_err(|e| {
            RepositoryError::StoreUnavailable(format!("Failed to encode product: {e}"))
        })?;

        let id = self.store.create(&self.collection, fields).await.map_err(|e| {
            error!(?e, "Failed to create product");
            RepositoryError::from(e)
        })?;

        Ok(Product {
            id,
            name: record.name,
            image_url: record.image_url,
            description: record.description,
            price: record.price,
            quantity: record.quantity,
            created_at: record.created_at,
        })
    }

    /// Overwrites the five business fields of `id`. Whether `createdAt`
    /// is rewritten depends on the configured [`TimestampPolicy`].
    #[instrument(skip(self, product))]
    pub async fn update(&self, id: &str, product: NewProduct) -> Result<(), RepositoryError> {
        let record = ProductRecord {
            name: product.name,
            image_url: product.image_url,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            created_at: Utc::now(),
        };
        let mut fields = record.into_fields().map_err(|e| {
            RepositoryError::StoreUnavailable(format!("Failed to encode product: {e}"))
        })?;
        if self.timestamps == TimestampPolicy::PreserveOnEdit {
            fields.remove(SORT_KEY);
        }

        self.store
            .update(&self.collection, id, fields)
            .await
            .map_err(|e| {
                match &e {
                    StoreError::NotFound(_) => warn!("Product vanished before update"),
                    StoreError::Unavailable(_) => error!(?e, "Failed to update product"),
                }
                RepositoryError::from(e)
            })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        match self.store.delete(&self.collection, id).await {
            // Already gone is the state the caller asked for.
            Ok(()) | Err(StoreError::NotFound(_)) => Ok(()),
            Err(e) => {
                error!(?e, "Failed to delete product");
                Err(e.into())
            }
        }
    }
}
