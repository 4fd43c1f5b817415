use sitewarden_domain::{BlockedDomainEntry, DomainError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::services::BlockListStore;

pub struct ToggleBlockedDomainUseCase {
    store: Arc<BlockListStore>,
}

impl ToggleBlockedDomainUseCase {
    pub fn new(store: Arc<BlockListStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<Option<BlockedDomainEntry>, DomainError> {
        let toggled = self.store.toggle(domain).await?;

        match &toggled {
            Some(entry) => info!(
                domain = %entry.domain,
                enabled = entry.enabled,
                "Blocked domain toggled"
            ),
            None => debug!(domain = %domain, "Toggle skipped, domain not listed"),
        }

        Ok(toggled)
    }
}
