// src/view/list.rs
use crate::models::product::Product;
use crate::repository::ProductRepository;

use super::format::{truncate, CurrencyFormat, DESCRIPTION_PREVIEW_CHARS};

pub const LOAD_ERROR: &str = "Could not load the products. Please try again.";

/// Why the table has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoProducts,
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoProducts => "No products yet. Add your first product!",
            EmptyState::NoMatches => "No products match your search.",
        }
    }
}

/// One table row, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: String,
    pub thumbnail: Option<String>,
    pub name: String,
    pub description_preview: String,
    pub price: String,
    pub quantity: i64,
}

/// Catalog table state: the last fetched products plus the search term.
#[derive(Debug, Default)]
pub struct ListView {
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
    search_term: String,
}

impl ListView {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Self::default()
        }
    }

    /// Re-fetches the whole collection. A failed fetch clears the
    /// previous products rather than showing stale data.
    pub async fn load(&mut self, repo: &ProductRepository) {
        self.loading = true;
        match repo.list_all().await {
            Ok(products) => {
                self.products = products;
                self.error = None;
            }
            Err(_) => {
                self.products.clear();
                self.error = Some(LOAD_ERROR.to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn filtered(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| matches_search(p, &self.search_term))
            .collect()
    }

    /// `None` while there is something to show, or while an error banner
    /// takes the table's place.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.error.is_some() || !self.filtered().is_empty() {
            return None;
        }
        Some(if self.search_term.is_empty() {
            EmptyState::NoProducts
        } else {
            EmptyState::NoMatches
        })
    }

    pub fn rows(&self, currency: &CurrencyFormat) -> Vec<ProductRow> {
        self.filtered()
            .into_iter()
            .map(|p| ProductRow {
                id: p.id.clone(),
                thumbnail: Some(p.image_url.clone()).filter(|url| !url.is_empty()),
                name: p.name.clone(),
                description_preview: truncate(&p.description, DESCRIPTION_PREVIEW_CHARS),
                price: currency.format(p.price),
                quantity: p.quantity,
            })
            .collect()
    }
}

/// Case-insensitive substring match on name or description. An empty
/// term matches everything.
pub fn matches_search(product: &Product, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, name: &str, description: &str) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            image_url: String::new(),
            description: description.into(),
            price: 1000.0,
            quantity: 1,
            created_at: Utc::now(),
        }
    }

    fn view_with(term: &str) -> ListView {
        ListView {
            products: vec![
                product("1", "Rosa", "Flor roja"),
                product("2", "Tulipán", "Flor amarilla"),
            ],
            loading: false,
            error: None,
            search_term: term.into(),
        }
    }

    fn ids(view: &ListView) -> Vec<&str> {
        view.filtered().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn search_matches_name_or_description_ignoring_case() {
        assert_eq!(ids(&view_with("flor")), vec!["1", "2"]);
        assert_eq!(ids(&view_with("rosa")), vec!["1"]);
        assert_eq!(ids(&view_with("TULIPÁN")), vec!["2"]);
        assert_eq!(ids(&view_with("")), vec!["1", "2"]);
    }

    #[test]
    fn no_match_reports_no_matches_not_no_products() {
        let view = view_with("xyz");
        assert!(view.filtered().is_empty());
        assert_eq!(view.empty_state(), Some(EmptyState::NoMatches));
    }

    #[test]
    fn empty_catalog_reports_no_products() {
        let view = ListView::new("");
        assert_eq!(view.empty_state(), Some(EmptyState::NoProducts));
    }

    #[test]
    fn error_suppresses_empty_state() {
        let mut view = ListView::new("");
        view.error = Some(LOAD_ERROR.into());
        assert_eq!(view.empty_state(), None);
    }

    #[test]
    fn rows_truncate_and_format() {
        let mut view = view_with("");
        view.products[0].description = "x".repeat(60);
        view.products[0].image_url = "https://example.com/rosa.jpg".into();

        let rows = view.rows(&CurrencyFormat::default());
        assert_eq!(rows[0].description_preview, format!("{}...", "x".repeat(50)));
        assert_eq!(rows[0].thumbnail.as_deref(), Some("https://example.com/rosa.jpg"));
        assert_eq!(rows[0].price, "$\u{a0}1.000");
        assert_eq!(rows[1].thumbnail, None);
    }

    mod loading {
        use super::*;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        use async_trait::async_trait;

        use crate::store::{Document, DocumentStore, Fields, MemoryStore, SortDirection, StoreError};
        use crate::validation::NewProduct;

        /// Memory store that can be switched into an outage.
        #[derive(Default)]
        struct FlakyStore {
            inner: MemoryStore,
            down: AtomicBool,
        }

        impl FlakyStore {
            fn check(&self) -> Result<(), StoreError> {
                if self.down.load(Ordering::SeqCst) {
                    return Err(StoreError::Unavailable("offline".into()));
                }
                Ok(())
            }
        }

        #[async_trait]
        impl DocumentStore for FlakyStore {
            async fn list(&self, c: &str, k: &str, d: SortDirection) -> Result<Vec<Document>, StoreError> {
                self.check()?;
                self.inner.list(c, k, d).await
            }
            async fn get(&self, c: &str, id: &str) -> Result<Option<Document>, StoreError> {
                self.check()?;
                self.inner.get(c, id).await
            }
            async fn create(&self, c: &str, f: Fields) -> Result<String, StoreError> {
                self.check()?;
                self.inner.create(c, f).await
            }
            async fn update(&self, c: &str, id: &str, f: Fields) -> Result<(), StoreError> {
                self.check()?;
                self.inner.update(c, id, f).await
            }
            async fn delete(&self, c: &str, id: &str) -> Result<(), StoreError> {
                self.check()?;
                self.inner.delete(c, id).await
            }
        }

        #[tokio::test]
        async fn failed_reload_drops_stale_products() {
            let store = Arc::new(FlakyStore::default());
            let repo = ProductRepository::new(store.clone());
            repo.create(NewProduct {
                name: "Rosa".into(),
                image_url: "u".into(),
                description: "Flor roja".into(),
                price: 1.0,
                quantity: 1,
            })
            .await
            .unwrap();

            let mut view = ListView::new("");
            view.load(&repo).await;
            assert_eq!(view.products().len(), 1);
            assert!(!view.is_loading());
            assert_eq!(view.error(), None);

            store.down.store(true, Ordering::SeqCst);
            view.load(&repo).await;
            assert!(view.products().is_empty());
            assert_eq!(view.error(), Some(LOAD_ERROR));

            store.down.store(false, Ordering::SeqCst);
            view.set_search_term("xyz");
            view.load(&repo).await;
            assert_eq!(view.error(), None);
            assert_eq!(view.empty_state(), Some(EmptyState::NoMatches));
        }
    }
}
