use sitewarden_domain::config::StorageConfig;
use sitewarden_domain::{
    decode_entries, encode_entries, is_valid_domain, normalize_domain, BlockList,
    BlockedDomainEntry, DomainError,
};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, instrument, warn};

use crate::ports::{CasOutcome, KeyValueStore, StorageChange};

/// Result of one read-modify-write pass over the list.
enum Mutation<T> {
    Write(T),
    Unchanged(T),
}

/// Owner of the persisted block list.
///
/// Nothing is cached: each read decodes the current stored value, and each
/// mutation is a compare-and-set against the version it read, retried from
/// scratch when another writer got there first.
pub struct BlockListStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    max_attempts: u32,
}

impl BlockListStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            kv,
            key: key.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(kv: Arc<dyn KeyValueStore>, config: &StorageConfig) -> Self {
        Self::new(kv, config.key.clone(), config.max_update_retries)
    }

    pub async fn snapshot(&self) -> Result<BlockList, DomainError> {
        let stored = self.kv.get(&self.key).await?;
        Ok(BlockList::new(decode_entries(
            stored.as_ref().map(|v| v.value.as_str()),
        )))
    }

    pub async fn get_all(&self) -> Result<Vec<BlockedDomainEntry>, DomainError> {
        Ok(self.snapshot().await?.into_entries())
    }

    pub async fn is_blocked(&self, domain_or_raw: &str) -> Result<bool, DomainError> {
        Ok(self.snapshot().await?.is_blocked(domain_or_raw))
    }

    #[instrument(skip(self))]
    pub async fn add(&self, raw_domain: &str) -> Result<BlockedDomainEntry, DomainError> {
        let domain = normalize_domain(raw_domain);
        if domain.is_empty() || !is_valid_domain(&domain) {
            return Err(DomainError::InvalidFormat(raw_domain.trim().to_string()));
        }

        self.update(|list| {
            if list.contains(&domain) {
                return Err(DomainError::DuplicateEntry(domain.clone()));
            }
            let entry = BlockedDomainEntry::enabled(&domain);
            list.push(entry.clone());
            Ok(Mutation::Write(entry))
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, domain: &str) -> Result<Option<BlockedDomainEntry>, DomainError> {
        self.update(|list| {
            Ok(match list.resolve(domain) {
                Some(key) => Mutation::Write(list.remove(&key)),
                None => Mutation::Unchanged(None),
            })
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn toggle(&self, domain: &str) -> Result<Option<BlockedDomainEntry>, DomainError> {
        self.update(|list| {
            Ok(match list.resolve(domain) {
                Some(key) => Mutation::Write(list.toggle(&key)),
                None => Mutation::Unchanged(None),
            })
        })
        .await
    }

    pub fn subscribe(&self) -> BlockListWatcher {
        BlockListWatcher {
            rx: self.kv.subscribe(),
            key: self.key.clone(),
        }
    }

    async fn update<T, F>(&self, mut mutate: F) -> Result<T, DomainError>
    where
        F: FnMut(&mut BlockList) -> Result<Mutation<T>, DomainError> + Send,
        T: Send,
    {
        for attempt in 1..=self.max_attempts {
            let stored = self.kv.get(&self.key).await?;
            let expected_version = stored.as_ref().map(|v| v.version);
            let mut list = BlockList::new(decode_entries(
                stored.as_ref().map(|v| v.value.as_str()),
            ));

            let output = match mutate(&mut list)? {
                Mutation::Unchanged(output) => return Ok(output),
                Mutation::Write(output) => output,
            };

            let encoded = encode_entries(list.entries())?;
            match self
                .kv
                .compare_and_set(&self.key, expected_version, encoded)
                .await?
            {
                CasOutcome::Committed { version } => {
                    debug!(version, entries = list.len(), "Block list committed");
                    return Ok(output);
                }
                CasOutcome::Conflict { current_version } => {
                    debug!(
                        attempt,
                        ?expected_version,
                        ?current_version,
                        "Block list changed concurrently, retrying"
                    );
                }
            }
        }

        warn!(attempts = self.max_attempts, key = %self.key, "Giving up on block list update");
        Err(DomainError::StorageConflict(format!(
            "{} attempts on key '{}'",
            self.max_attempts, self.key
        )))
    }
}

/// Live view of the block list; yields the decoded list after every write.
pub struct BlockListWatcher {
    rx: broadcast::Receiver<StorageChange>,
    key: String,
}

impl BlockListWatcher {
    /// Next list written under the watched key, or `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Vec<BlockedDomainEntry>> {
        loop {
            match self.rx.recv().await {
                Ok(change) if change.key == self.key => {
                    return Some(decode_entries(change.new_value.as_deref()));
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Block list watcher lagged behind storage changes");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
