use crate::domain::catalog::CatalogEntity;
use crate::domain::ports::{CatalogRepository, KeyValueStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory key-value store.
///
/// Uses `Arc<RwLock<HashMap<String, String>>>` so clones share state.
/// Nothing survives the process; use it for tests or one-shot CLI runs.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A catalog table fixed at construction.
#[derive(Clone)]
pub struct StaticCatalog<E> {
    entries: Arc<Vec<E>>,
}

impl<E> StaticCatalog<E> {
    pub fn new(entries: Vec<E>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

#[async_trait]
impl<E> CatalogRepository<E> for StaticCatalog<E>
where
    E: CatalogEntity + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<E>> {
        Ok(self.entries.as_ref().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<E>> {
        Ok(self.entries.iter().find(|e| e.id() == id).cloned())
    }
}
