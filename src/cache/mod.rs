//! Response cache.
//!
//! [`ResponseCache`] is the only type handlers talk to. It sits on top of a
//! [`CacheBackend`] with two implementations:
//! - [`RedisBackend`] - shared store reachable over the network
//! - [`MemoryBackend`] - process-local fallback
//!
//! Backends report failures as [`CacheError`]; `ResponseCache` logs them and
//! degrades to a miss, so a broken cache never fails a request.

pub mod keys;
mod memory;
mod redis;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("timed out connecting to the cache")]
    ConnectTimeout,
}

/// Key/value store holding serialized JSON with a per-entry TTL.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrites any previous value and restarts its TTL.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    async fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// Removes every live key containing `pattern` as a substring.
    async fn clear_matching(&self, pattern: &str) -> Result<usize, CacheError>;

    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct ResponseCache {
    backend: Arc<dyn CacheBackend>,
}

impl ResponseCache {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Picks the backend once for the lifetime of the process. An unreachable
    /// shared store means the process-local cache is used from then on.
    pub async fn connect(redis_url: Option<&str>) -> Self {
        let Some(url) = redis_url else {
            info!("No REDIS_URL configured, using in-memory cache");
            return Self::in_memory();
        };

        match RedisBackend::connect(url).await {
            Ok(backend) => {
                info!("Connected to redis cache");
                Self::new(Arc::new(backend))
            }
            Err(e) => {
                warn!("Redis connection failed: {}. Using in-memory cache.", e);
                Self::in_memory()
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Missing, expired, unreadable and undecodable entries are all a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(key, "Cache get error: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key, "Cache decode error: {}", e);
                None
            }
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: u64) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, "Cache encode error: {}", e);
                return false;
            }
        };

        match self
            .backend
            .set(key, raw, Duration::from_secs(ttl_seconds))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(key, "Cache set error: {}", e);
                false
            }
        }
    }
}

// Invalidation side of the cache contract. No route calls these.
#[cfg_attr(not(test), allow(dead_code))]
impl ResponseCache {
    pub async fn delete(&self, key: &str) -> bool {
        self.backend.delete(key).await.unwrap_or_else(|e| {
            warn!(key, "Cache delete error: {}", e);
            false
        })
    }

    pub async fn exists(&self, key: &str) -> bool {
        self.backend.exists(key).await.unwrap_or_else(|e| {
            warn!(key, "Cache exists error: {}", e);
            false
        })
    }

    pub async fn clear_matching(&self, pattern: &str) -> usize {
        self.backend
            .clear_matching(pattern)
            .await
            .unwrap_or_else(|e| {
                warn!(pattern, "Cache clear error: {}", e);
                0
            })
    }
}
