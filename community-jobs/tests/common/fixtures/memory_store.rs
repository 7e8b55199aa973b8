//! In-memory fact store for collector tests.

use async_trait::async_trait;
use community_jobs::database::FactStore;
use community_jobs::errors::JobError;
use std::collections::HashSet;
use std::sync::Mutex;

/// `FactStore` backed by a plain set. Mirrors the persistence contract:
/// no idempotency, callers check then insert.
#[derive(Debug, Default)]
pub struct MemoryFactStore {
    seen: Mutex<HashSet<(String, String)>>,
}

impl MemoryFactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with already-seen pairs.
    pub fn with_seen(pairs: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut seen = store.seen.lock().unwrap();
            for (text, source) in pairs {
                seen.insert((text.to_string(), source.to_string()));
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn contains(&self, text: &str, source: &str) -> bool {
        self.seen
            .lock()
            .unwrap()
            .contains(&(text.to_string(), source.to_string()))
    }
}

#[async_trait]
impl FactStore for MemoryFactStore {
    async fn fact_exists(&self, text: &str, source: &str) -> Result<bool, JobError> {
        Ok(self.contains(text, source))
    }

    async fn insert_fact(&self, text: &str, source: &str) -> Result<(), JobError> {
        self.seen
            .lock()
            .unwrap()
            .insert((text.to_string(), source.to_string()));
        Ok(())
    }
}
