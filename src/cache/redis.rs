use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use super::{CacheBackend, CacheError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const SCAN_BATCH_SIZE: usize = 100;

/// Shared cache stored in redis. Values expire through redis' own TTLs.
#[derive(Clone)]
pub struct RedisBackend {
    connection: ConnectionManager,
}

impl RedisBackend {
    /// Opens the connection and checks it with a `PING`.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let mut connection = tokio::time::timeout(CONNECT_TIMEOUT, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::ConnectTimeout)??;

        let _: String = redis::cmd("PING").query_async(&mut connection).await?;

        Ok(Self { connection })
    }
}

/// `PSETEX` rejects a zero expiry, so `None` means the key must go.
fn expiry_millis(ttl: Duration) -> Option<u64> {
    let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
    (millis > 0).then_some(millis)
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection.clone();
        Ok(conn.get(key).await?)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        match expiry_millis(ttl) {
            Some(millis) => {
                let _: () = conn.pset_ex(key, value, millis).await?;
            }
            // A zero TTL is expired on arrival, as in the memory backend
            None => {
                let _: usize = conn.del(key).await?;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.connection.clone();
        let removed: usize = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.connection.clone();
        Ok(conn.exists(key).await?)
    }

    async fn clear_matching(&self, pattern: &str) -> Result<usize, CacheError> {
        let mut conn = self.connection.clone();
        let glob = format!("*{}*", escape_glob(pattern));
        let mut cursor: u64 = 0;
        let mut removed = 0;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&glob)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let count: usize = conn.del(&keys).await?;
                removed += count;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(removed)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/// Makes redis treat `pattern` literally inside a `MATCH` glob.
fn escape_glob(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\' | '^') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
