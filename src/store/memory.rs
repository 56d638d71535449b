// src/store/memory.rs
use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{generate_id, Document, DocumentStore, Fields, SortDirection, StoreError};

struct Entry {
    seq: u64,
    fields: Fields,
}

#[derive(Default)]
struct Collections {
    next_seq: u64,
    by_name: HashMap<String, HashMap<String, Entry>>,
}

/// In-process document store. Used for local runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Orders JSON values the way a document store orders a sort key:
/// missing/null first, then booleans, numbers, strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(
        &self,
        collection: &str,
        sort_key: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.inner.read().await;
        let Some(docs) = guard.by_name.get(collection) else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<(&String, &Entry)> = docs.iter().collect();
        entries.sort_by(|(_, a), (_, b)| {
            compare_values(a.fields.get(sort_key), b.fields.get(sort_key))
                .then(a.seq.cmp(&b.seq))
        });
        if direction == SortDirection::Descending {
            entries.reverse();
        }

        Ok(entries
            .into_iter()
            .map(|(id, entry)| Document {
                id: id.clone(),
                fields: entry.fields.clone(),
            })
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard
            .by_name
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|entry| Document {
                id: id.to_string(),
                fields: entry.fields.clone(),
            }))
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let mut guard = self.inner.write().await;
        let seq = guard.next_seq;
        guard.next_seq += 1;

        let id = generate_id();
        guard
            .by_name
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), Entry { seq, fields });
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let entry = guard
            .by_name
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        if let Some(docs) = guard.by_name.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}
