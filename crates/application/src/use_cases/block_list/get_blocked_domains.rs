use sitewarden_domain::{BlockedDomainEntry, DomainError};
use std::sync::Arc;
use tracing::instrument;

use crate::services::{BlockListStore, BlockListWatcher};

pub struct GetBlockedDomainsUseCase {
    store: Arc<BlockListStore>,
}

impl GetBlockedDomainsUseCase {
    pub fn new(store: Arc<BlockListStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<BlockedDomainEntry>, DomainError> {
        self.store.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn is_blocked(&self, domain_or_raw: &str) -> Result<bool, DomainError> {
        self.store.is_blocked(domain_or_raw).await
    }

    pub fn watch(&self) -> BlockListWatcher {
        self.store.subscribe()
    }
}
