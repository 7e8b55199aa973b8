//! Fact collection: fetch until the quota of novel facts is met.

use rand::Rng;
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::database::FactStore;
use crate::errors::{ConfigError, JobError, SourceFetchError};
use crate::sources::{Fact, SourceClient};

/// Collects a batch of novel facts from a pool of configured sources.
///
/// Each iteration picks one source uniformly at random, fetches a candidate,
/// and keeps it only if the `(text, source)` pair has never been recorded.
/// Novel facts are recorded before they are added to the batch, so a crash
/// mid-run can leave recorded-but-never-delivered facts behind; that is
/// accepted. A fetch failure aborts the whole run. Total attempts are
/// bounded by `max_attempts` so an all-duplicate source pool fails loudly
/// instead of spinning forever.
pub struct FactCollector<'a, S: FactStore + ?Sized> {
    client: &'a SourceClient,
    store: &'a S,
    sources: &'a [SourceConfig],
    max_attempts: u32,
}

impl<'a, S: FactStore + ?Sized> FactCollector<'a, S> {
    pub fn new(
        client: &'a SourceClient,
        store: &'a S,
        sources: &'a [SourceConfig],
        max_attempts: u32,
    ) -> Self {
        Self {
            client,
            store,
            sources,
            max_attempts,
        }
    }

    /// Collect exactly `quota` facts, in collection order.
    pub async fn collect_batch(&self, quota: u32) -> Result<Vec<Fact>, JobError> {
        if quota == 0 {
            return Err(ConfigError::InvalidValue {
                field: "quota".to_string(),
                reason: "quota must be positive".to_string(),
            }
            .into());
        }
        if self.sources.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sources".to_string(),
                reason: "no fact sources configured".to_string(),
            }
            .into());
        }

        let mut batch: Vec<Fact> = Vec::with_capacity(quota as usize);
        let mut attempts = 0u32;

        while batch.len() < quota as usize {
            if attempts >= self.max_attempts {
                return Err(SourceFetchError::AttemptsExhausted {
                    attempts,
                    collected: batch.len(),
                }
                .into());
            }
            attempts += 1;

            let index = rand::thread_rng().gen_range(0..self.sources.len());
            let source = &self.sources[index];

            let fact = self
                .client
                .fetch_fact(source)
                .await
                .map_err(JobError::SourceFetch)?;

            if self.store.fact_exists(&fact.text, &fact.source).await? {
                debug!("Discarding already-seen fact from {}", fact.source);
                continue;
            }

            self.store.insert_fact(&fact.text, &fact.source).await?;
            debug!(
                "Collected fact {}/{} from {}",
                batch.len() + 1,
                quota,
                fact.source
            );
            batch.push(fact);
        }

        info!("Collected {} facts in {} attempts", batch.len(), attempts);
        Ok(batch)
    }
}
