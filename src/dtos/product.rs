// src/dtos/product.rs
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::product::{timestamp, Product};

/// Unvalidated product input, as typed into the form or posted to the API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    #[serde(deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub image_url: String,
    #[serde(deserialize_with = "text_or_number")]
    pub description: String,
    #[serde(deserialize_with = "text_or_number")]
    pub price: String,
    #[serde(deserialize_with = "text_or_number")]
    pub quantity: String,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }
}

// JSON clients send numbers, HTML forms send text; both end up as the raw text.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            created_at: timestamp::format(&product.created_at),
            id: product.id,
            name: product.name,
            image_url: product.image_url,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_accepts_numbers_and_text() {
        let draft: ProductDraft = serde_json::from_str(
            r#"{"name":"Rosa","imageUrl":"u","description":"d","price":1500.5,"quantity":"7"}"#,
        )
        .unwrap();
        assert_eq!(draft.price, "1500.5");
        assert_eq!(draft.quantity, "7");
    }

    #[test]
    fn draft_missing_keys_default_to_empty() {
        let draft: ProductDraft = serde_json::from_str(r#"{"name":"Rosa","price":null}"#).unwrap();
        assert_eq!(draft.name, "Rosa");
        assert!(draft.price.is_empty());
        assert!(draft.description.is_empty());
    }
}
