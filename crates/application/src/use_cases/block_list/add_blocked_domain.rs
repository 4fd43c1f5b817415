use sitewarden_domain::{BlockedDomainEntry, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::services::BlockListStore;

pub struct AddBlockedDomainUseCase {
    store: Arc<BlockListStore>,
}

impl AddBlockedDomainUseCase {
    pub fn new(store: Arc<BlockListStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, raw_domain: &str) -> Result<BlockedDomainEntry, DomainError> {
        let entry = self.store.add(raw_domain).await?;

        info!(domain = %entry.domain, "Blocked domain added");

        Ok(entry)
    }
}
