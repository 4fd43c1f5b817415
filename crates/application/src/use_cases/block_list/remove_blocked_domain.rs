use sitewarden_domain::{BlockedDomainEntry, DomainError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::services::BlockListStore;

pub struct RemoveBlockedDomainUseCase {
    store: Arc<BlockListStore>,
}

impl RemoveBlockedDomainUseCase {
    pub fn new(store: Arc<BlockListStore>) -> Self {
        Self { store }
    }

    /// Removing a domain that is not listed succeeds and returns `None`.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<Option<BlockedDomainEntry>, DomainError> {
        let removed = self.store.remove(domain).await?;

        match &removed {
            Some(entry) => info!(domain = %entry.domain, "Blocked domain removed"),
            None => debug!(domain = %domain, "Remove skipped, domain not listed"),
        }

        Ok(removed)
    }
}
