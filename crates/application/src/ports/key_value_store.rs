use async_trait::async_trait;
use sitewarden_domain::DomainError;
use tokio::sync::broadcast;

/// A stored value together with the version it was written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: String,
    pub version: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    Committed { version: u64 },
    /// Someone else wrote the key since it was read.
    Conflict { current_version: Option<u64> },
}

impl CasOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CasOutcome::Committed { .. })
    }
}

/// Emitted after every committed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    pub new_value: Option<String>,
    pub version: u64,
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>, DomainError>;

    /// Writes `value` only if the key is still at `expected_version`
    /// (`None` meaning the key must not exist yet).
    async fn compare_and_set(
        &self,
        key: &str,
        expected_version: Option<u64>,
        value: String,
    ) -> Result<CasOutcome, DomainError>;

    fn subscribe(&self) -> broadcast::Receiver<StorageChange>;
}
