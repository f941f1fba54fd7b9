use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{
    step, RateLimitDecision, RateLimitEntry, RateLimitPolicy, RateLimitStore, RateLimitStoreError,
};

/// Process-wide counter map. One lock covers the whole map, so every
/// read-modify-write is serialized; the lock is never held across an await.
///
/// Entries are replaced when their window lapses but never evicted, so the
/// map grows with the number of distinct client keys seen.
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.lock().get(key).copied()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn consume(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, RateLimitStoreError> {
        let mut entries = self.entries.lock();
        let (next, decision) = step(entries.get(key).copied(), policy, now)?;
        entries.insert(key.to_string(), next);
        Ok(decision)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
