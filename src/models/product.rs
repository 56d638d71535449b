use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::store::{Document, Fields};

/// A catalog product as loaded from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// Stored record shape. Keys are the camelCase names used on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl ProductRecord {
    pub fn into_fields(self) -> Result<Fields, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => unreachable!("ProductRecord serializes to a JSON object"),
        }
    }
}

impl TryFrom<Document> for Product {
    type Error = serde_json::Error;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        let record: ProductRecord = serde_json::from_value(serde_json::Value::Object(doc.fields))?;
        Ok(Self {
            id: doc.id,
            name: record.name,
            image_url: record.image_url,
            description: record.description,
            price: record.price,
            quantity: record.quantity,
            created_at: record.created_at,
        })
    }
}

/// Fixed-width RFC 3339 (UTC, microseconds) so that lexical order of the
/// stored string is chronological order.
pub mod timestamp {
    use super::*;

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn record_uses_wire_field_names() {
        let record = ProductRecord {
            name: "Rosa".into(),
            image_url: "https://img/rosa.jpg".into(),
            description: "Flor roja".into(),
            price: 1000.0,
            quantity: 3,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let fields = record.into_fields().unwrap();
        assert_eq!(fields["imageUrl"], json!("https://img/rosa.jpg"));
        assert_eq!(fields["createdAt"], json!("2024-05-01T12:00:00.000000Z"));
        assert!(fields.get("image_url").is_none());
    }

    #[test]
    fn document_without_required_field_fails_to_decode() {
        let mut fields = Fields::new();
        fields.insert("name".into(), json!("Rosa"));
        let doc = Document { id: "x".into(), fields };
        assert!(Product::try_from(doc).is_err());
    }
}
