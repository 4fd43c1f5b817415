use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sitewarden_application::ports::{CasOutcome, KeyValueStore, StorageChange, VersionedValue};
use sitewarden_domain::DomainError;
use tokio::sync::broadcast;
use tracing::{debug, instrument};

use super::CHANGE_CHANNEL_CAPACITY;

/// Process-local store; the backing for a single browser session and for tests.
pub struct InMemoryKeyValueStore {
    values: DashMap<String, VersionedValue>,
    changes: broadcast::Sender<StorageChange>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: DashMap::new(),
            changes,
        }
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>, DomainError> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    #[instrument(skip(self, value))]
    async fn compare_and_set(
        &self,
        key: &str,
        expected_version: Option<u64>,
        value: String,
    ) -> Result<CasOutcome, DomainError> {
        let version = match self.values.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let current = occupied.get().version;
                if expected_version != Some(current) {
                    return Ok(CasOutcome::Conflict {
                        current_version: Some(current),
                    });
                }
                occupied.insert(VersionedValue {
                    value: value.clone(),
                    version: current + 1,
                });
                current + 1
            }
            Entry::Vacant(vacant) => {
                if expected_version.is_some() {
                    return Ok(CasOutcome::Conflict {
                        current_version: None,
                    });
                }
                vacant.insert(VersionedValue {
                    value: value.clone(),
                    version: 1,
                });
                1
            }
        };

        debug!(version, "Stored value committed");

        // No subscribers is fine.
        let _ = self.changes.send(StorageChange {
            key: key.to_string(),
            new_value: Some(value),
            version,
        });

        Ok(CasOutcome::Committed { version })
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.changes.subscribe()
    }
}
