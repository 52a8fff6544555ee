use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or(Duration::MAX);
        Self {
            value,
            expires_at: Utc::now()
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// An entry is dead from its expiry instant onwards.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_expires_exactly_at_its_deadline() {
        let entry = CacheEntry::new("v", std::time::Duration::from_secs(10));
        assert!(!entry.is_expired());
        assert!(!entry.is_expired_at(entry.expires_at - Duration::milliseconds(1)));
        assert!(entry.is_expired_at(entry.expires_at));
    }

    #[test]
    fn huge_ttl_saturates_instead_of_overflowing() {
        let entry = CacheEntry::new(1, std::time::Duration::from_secs(u64::MAX));
        assert!(!entry.is_expired());
    }
}
