use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use super::{CacheBackend, CacheError};
use crate::models::cache::CacheEntry;

/// Process-local cache. Expired entries are purged lazily when touched.
#[derive(Default)]
pub struct MemoryBackend {
    entries: DashMap<String, CacheEntry<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Ok(Some(entry.value.clone()));
            }
        }
        self.entries.remove_if(key, |_, entry| entry.is_expired());
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self
            .entries
            .remove(key)
            .is_some_and(|(_, entry)| !entry.is_expired()))
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key).await?.is_some())
    }

    async fn clear_matching(&self, pattern: &str) -> Result<usize, CacheError> {
        let mut removed = 0;
        self.entries.retain(|key, entry| {
            if entry.is_expired() {
                return false;
            }
            if key.contains(pattern) {
                removed += 1;
                return false;
            }
            true
        });
        Ok(removed)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
