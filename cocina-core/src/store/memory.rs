//! In-memory recipe store.
//!
//! Keeps documents in insertion order. Reads and writes can be made to fail,
//! which lets tests exercise the error paths of the repository and views.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use super::{RecipeDocument, RecipeFields, RecipeStore, RecipeUpdate};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<RecipeDocument>>,
    next_id: AtomicU64,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `fields`, assigning ids in order.
    pub fn with_documents(fields: impl IntoIterator<Item = RecipeFields>) -> Self {
        let store = Self::new();
        {
            let mut documents = store.documents.write().unwrap_or_else(PoisonError::into_inner);
            for fields in fields {
                let id = store.allocate_id();
                documents.push(RecipeDocument { id, fields });
            }
        }
        store
    }

    /// Make every subsequent `list` fail until reset.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `insert`, `update` and `delete` fail until reset.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("mem-{:06}", n)
    }

    fn check_writes(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "MemoryStore: writes disabled".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn list(&self, category: Option<&str>) -> Result<Vec<RecipeDocument>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "MemoryStore: reads disabled".to_string(),
            ));
        }

        let documents = self.documents.read().unwrap_or_else(PoisonError::into_inner);
        Ok(documents
            .iter()
            .filter(|doc| category.map_or(true, |c| doc.fields.category == c))
            .cloned()
            .collect())
    }

    async fn insert(&self, fields: &RecipeFields) -> Result<String, StoreError> {
        self.check_writes()?;

        let id = self.allocate_id();
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecipeDocument {
                id: id.clone(),
                fields: fields.clone(),
            });
        Ok(id)
    }

    async fn update(&self, id: &str, update: &RecipeUpdate) -> Result<(), StoreError> {
        self.check_writes()?;

        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);
        let doc = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        doc.fields.name = update.name.clone();
        doc.fields.ingredients = update.ingredients.clone();
        doc.fields.instructions = update.instructions.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_writes()?;

        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|doc| doc.id != id);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, category: &str) -> RecipeFields {
        RecipeFields {
            name: name.to_string(),
            ingredients: vec!["sal".to_string()],
            category: category.to_string(),
            instructions: "Cocinar".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&fields("A", "x")).await.unwrap();
        let b = store.insert(&fields("B", "x")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let store = MemoryStore::with_documents(vec![
            fields("A", "Postres"),
            fields("B", "Sopas"),
            fields("C", "Postres"),
        ]);
        let postres = store.list(Some("Postres")).await.unwrap();
        let names: Vec<_> = postres.iter().map(|d| d.fields.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let update = RecipeUpdate {
            name: "X".to_string(),
            ingredients: vec![],
            instructions: "Y".to_string(),
        };
        let result = store.update("nope", &update).await;
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("nope").await.is_ok());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::new();
        store.fail_reads(true);
        assert!(store.list(None).await.is_err());
        store.fail_reads(false);
        assert!(store.list(None).await.is_ok());

        store.fail_writes(true);
        assert!(store.insert(&fields("A", "x")).await.is_err());
        assert!(store.delete("any").await.is_err());
        assert!(store.is_empty());
    }
}
