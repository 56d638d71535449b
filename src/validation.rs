// src/validation.rs
//! Client-side checks run on a [`ProductDraft`] before anything is written.
//!
//! Rules are applied in order and the first failure wins:
//! 1. every field is present (non-blank after trimming),
//! 2. price is a finite number greater than zero,
//! 3. quantity is a whole number greater than zero.
//!
//! A zero price or quantity counts as present and fails rule 2 or 3.
//! Text fields are stored exactly as typed; trimming only decides presence.

use thiserror::Error;

use crate::dtos::product::ProductDraft;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Price must be a number greater than 0")]
    InvalidPrice,

    #[error("Quantity must be a whole number greater than 0")]
    InvalidQuantity,
}

/// A draft that passed validation. Only this type reaches the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

pub fn validate(draft: &ProductDraft) -> Result<NewProduct, ValidationError> {
    let fields = [
        &draft.name,
        &draft.image_url,
        &draft.description,
        &draft.price,
        &draft.quantity,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError::MissingFields);
    }

    let price = draft
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or(ValidationError::InvalidPrice)?;

    let quantity = draft
        .quantity
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|q| *q > 0)
        .ok_or(ValidationError::InvalidQuantity)?;

    Ok(NewProduct {
        name: draft.name.clone(),
        image_url: draft.image_url.clone(),
        description: draft.description.clone(),
        price,
        quantity,
    })
}
