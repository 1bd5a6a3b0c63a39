//! # In-memory document store
//!
//! Collection-keyed store over `RwLock<HashMap<String, Vec<Value>>>`.
//! Supports per-collection unique-field indexes; uniqueness is checked
//! under the same write lock as the mutation, so the index is the final
//! arbiter when concurrent writes interleave.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::sort::{sort_documents, SortSpec};
use super::{DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome, ID_FIELD};

/// In-memory store
pub struct MemoryStore {
    /// Data store: collection -> documents
    data: RwLock<HashMap<String, Vec<Value>>>,

    /// Unique indexes: collection -> fields
    unique: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            unique: RwLock::new(HashMap::new()),
        }
    }

    /// Register a unique index on a field of a collection
    pub fn ensure_unique_index(
        &self,
        collection: impl Into<String>,
        field: impl Into<String>,
    ) -> StoreResult<()> {
        let mut unique = self.unique.write().map_err(|_| StoreError::LockPoisoned)?;
        let fields = unique.entry(collection.into()).or_default();
        let field = field.into();
        if !fields.contains(&field) {
            fields.push(field);
        }
        Ok(())
    }

    /// Unique fields registered for a collection
    fn unique_fields(&self, collection: &str) -> StoreResult<Vec<String>> {
        let unique = self.unique.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(unique.get(collection).cloned().unwrap_or_default())
    }

    /// Check a candidate document against the unique indexes.
    ///
    /// `skip` is the position of the document being replaced, if any.
    fn check_unique(
        fields: &[String],
        documents: &[Value],
        candidate: &Value,
        skip: Option<usize>,
    ) -> StoreResult<()> {
        for field in fields {
            let value = match candidate.get(field) {
                Some(v) if !v.is_null() => v,
                _ => continue,
            };

            let conflict = documents
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != skip)
                .any(|(_, doc)| doc.get(field) == Some(value));

            if conflict {
                return Err(StoreError::DuplicateKey {
                    field: field.clone(),
                    value: value_display(value),
                });
            }
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<&SortSpec>,
    ) -> StoreResult<Vec<Value>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut documents: Vec<Value> = data
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();

        if let Some(spec) = sort {
            sort_documents(&mut documents, spec);
        }

        Ok(documents)
    }

    fn insert_one(&self, collection: &str, mut document: Value) -> StoreResult<InsertOutcome> {
        if !document.is_object() {
            return Err(StoreError::InvalidDocument);
        }

        let unique_fields = self.unique_fields(collection)?;
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        let documents = data.entry(collection.to_string()).or_default();

        Self::check_unique(&unique_fields, documents, &document, None)?;

        // Assign an id when the client did not provide one
        let inserted_id = match document.get(ID_FIELD).and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                if let Some(obj) = document.as_object_mut() {
                    obj.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                }
                id
            }
        };

        documents.push(document);

        Ok(InsertOutcome { inserted_id })
    }

    fn update_one(&self, collection: &str, id: &str, set: &Value) -> StoreResult<UpdateOutcome> {
        Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))?;

        let set_obj = set.as_object().ok_or(StoreError::InvalidDocument)?;

        let unique_fields = self.unique_fields(collection)?;
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        let documents = match data.get_mut(collection) {
            Some(docs) => docs,
            None => {
                return Ok(UpdateOutcome {
                    matched_count: 0,
                    modified_count: 0,
                })
            }
        };

        let position = documents
            .iter()
            .position(|d| d.get(ID_FIELD).and_then(Value::as_str) == Some(id));

        let position = match position {
            Some(p) => p,
            None => {
                return Ok(UpdateOutcome {
                    matched_count: 0,
                    modified_count: 0,
                })
            }
        };

        // Build the merged document before touching the stored one
        let mut merged = documents[position].clone();
        if let Some(obj) = merged.as_object_mut() {
            for (key, value) in set_obj {
                obj.insert(key.clone(), value.clone());
            }
        }

        Self::check_unique(&unique_fields, documents, &merged, Some(position))?;

        let modified = if merged != documents[position] { 1 } else { 0 };
        documents[position] = merged;

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: modified,
        })
    }

    fn delete_one(&self, collection: &str, id: &str) -> StoreResult<DeleteOutcome> {
        Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))?;

        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        let documents = match data.get_mut(collection) {
            Some(docs) => docs,
            None => return Ok(DeleteOutcome { deleted_count: 0 }),
        };

        let position = documents
            .iter()
            .position(|d| d.get(ID_FIELD).and_then(Value::as_str) == Some(id));

        match position {
            Some(p) => {
                documents.remove(p);
                Ok(DeleteOutcome { deleted_count: 1 })
            }
            None => Ok(DeleteOutcome { deleted_count: 0 }),
        }
    }
}

/// Renders a JSON value for error messages (strings without quotes)
fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLLECTION: &str = "prestadores";

    fn store_with_unique_cnpj() -> MemoryStore {
        let store = MemoryStore::new();
        store.ensure_unique_index(COLLECTION, "cnpj").unwrap();
        store
    }

    #[test]
    fn test_insert_assigns_id() {
        let store = MemoryStore::new();
        let outcome = store
            .insert_one(COLLECTION, json!({"razao_social": "Alfa"}))
            .unwrap();

        assert!(Uuid::parse_str(&outcome.inserted_id).is_ok());

        let docs = store.find(COLLECTION, &Filter::All, None).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(
            docs[0][ID_FIELD].as_str().unwrap(),
            outcome.inserted_id.as_str()
        );
    }

    #[test]
    fn test_insert_preserves_passthrough_fields() {
        let store = MemoryStore::new();
        store
            .insert_one(
                COLLECTION,
                json!({"razao_social": "Alfa", "nota": {"livre": true}}),
            )
            .unwrap();

        let docs = store.find(COLLECTION, &Filter::All, None).unwrap();
        assert_eq!(docs[0]["nota"]["livre"], json!(true));
    }

    #[test]
    fn test_insert_rejects_non_object() {
        let store = MemoryStore::new();
        let result = store.insert_one(COLLECTION, json!([1, 2, 3]));
        assert_eq!(result.unwrap_err(), StoreError::InvalidDocument);
    }

    #[test]
    fn test_unique_index_rejects_duplicate_insert() {
        let store = store_with_unique_cnpj();
        store
            .insert_one(COLLECTION, json!({"cnpj": "12345678000100"}))
            .unwrap();

        let result = store.insert_one(COLLECTION, json!({"cnpj": "12345678000100"}));
        assert!(matches!(
            result,
            Err(StoreError::DuplicateKey { ref field, .. }) if field == "cnpj"
        ));
    }

    #[test]
    fn test_unique_index_ignores_absent_field() {
        let store = store_with_unique_cnpj();
        store.insert_one(COLLECTION, json!({"a": 1})).unwrap();
        store.insert_one(COLLECTION, json!({"a": 2})).unwrap();

        let docs = store.find(COLLECTION, &Filter::All, None).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(COLLECTION, json!({"razao_social": "Alfa", "cnae_fiscal": 1}))
            .unwrap()
            .inserted_id;

        let outcome = store
            .update_one(COLLECTION, &id, &json!({"razao_social": "Alfa Ltda"}))
            .unwrap();

        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 1);

        let docs = store.find(COLLECTION, &Filter::All, None).unwrap();
        assert_eq!(docs[0]["razao_social"], "Alfa Ltda");
        // Untouched fields survive the merge
        assert_eq!(docs[0]["cnae_fiscal"], 1);
    }

    #[test]
    fn test_update_nonexistent_id_matches_zero() {
        let store = MemoryStore::new();
        let outcome = store
            .update_one(
                COLLECTION,
                &Uuid::new_v4().to_string(),
                &json!({"razao_social": "X"}),
            )
            .unwrap();

        assert_eq!(outcome.matched_count, 0);
        assert_eq!(outcome.modified_count, 0);
    }

    #[test]
    fn test_update_noop_counts_zero_modified() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(COLLECTION, json!({"razao_social": "Alfa"}))
            .unwrap()
            .inserted_id;

        let outcome = store
            .update_one(COLLECTION, &id, &json!({"razao_social": "Alfa"}))
            .unwrap();

        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 0);
    }

    #[test]
    fn test_update_rejects_malformed_id() {
        let store = MemoryStore::new();
        let result = store.update_one(COLLECTION, "bogus", &json!({}));
        assert!(matches!(result, Err(StoreError::InvalidId(_))));
    }

    #[test]
    fn test_update_to_conflicting_unique_value_rejected() {
        let store = store_with_unique_cnpj();
        store
            .insert_one(COLLECTION, json!({"cnpj": "11111111111111"}))
            .unwrap();
        let id = store
            .insert_one(COLLECTION, json!({"cnpj": "22222222222222"}))
            .unwrap()
            .inserted_id;

        let result = store.update_one(COLLECTION, &id, &json!({"cnpj": "11111111111111"}));
        assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));
    }

    #[test]
    fn test_update_keeping_own_unique_value_allowed() {
        let store = store_with_unique_cnpj();
        let id = store
            .insert_one(COLLECTION, json!({"cnpj": "11111111111111"}))
            .unwrap()
            .inserted_id;

        let outcome = store
            .update_one(
                COLLECTION,
                &id,
                &json!({"cnpj": "11111111111111", "razao_social": "Alfa"}),
            )
            .unwrap();

        assert_eq!(outcome.matched_count, 1);
    }

    #[test]
    fn test_delete_counts() {
        let store = MemoryStore::new();
        let id = store
            .insert_one(COLLECTION, json!({"razao_social": "Alfa"}))
            .unwrap()
            .inserted_id;

        let outcome = store.delete_one(COLLECTION, &id).unwrap();
        assert_eq!(outcome.deleted_count, 1);

        // Second delete matches nothing, still a success
        let outcome = store.delete_one(COLLECTION, &id).unwrap();
        assert_eq!(outcome.deleted_count, 0);
    }

    #[test]
    fn test_delete_rejects_malformed_id() {
        let store = MemoryStore::new();
        let result = store.delete_one(COLLECTION, "bogus");
        assert!(matches!(result, Err(StoreError::InvalidId(_))));
    }

    #[test]
    fn test_find_filtered_and_sorted() {
        let store = MemoryStore::new();
        for name in ["Gama", "Alfa", "Beta"] {
            store
                .insert_one(COLLECTION, json!({"razao_social": name}))
                .unwrap();
        }

        let docs = store
            .find(
                COLLECTION,
                &Filter::All,
                Some(&SortSpec::asc("razao_social")),
            )
            .unwrap();

        let names: Vec<&str> = docs
            .iter()
            .map(|d| d["razao_social"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alfa", "Beta", "Gama"]);
    }

    #[test]
    fn test_find_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        let docs = store.find("nothing", &Filter::All, None).unwrap();
        assert!(docs.is_empty());
    }
}
