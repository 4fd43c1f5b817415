use sitewarden_domain::{classify_url, url_host, BlockedDomainEntry, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::TabNavigator;
use crate::services::BlockListStore;

/// Blocks the site shown in the host's active tab.
pub struct AddCurrentPageUseCase {
    store: Arc<BlockListStore>,
    navigator: Arc<dyn TabNavigator>,
    blocked_page_url: Arc<str>,
}

impl AddCurrentPageUseCase {
    pub fn new(
        store: Arc<BlockListStore>,
        navigator: Arc<dyn TabNavigator>,
        blocked_page_url: &str,
    ) -> Self {
        Self {
            store,
            navigator,
            blocked_page_url: Arc::from(blocked_page_url),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<BlockedDomainEntry, DomainError> {
        let url = self
            .navigator
            .active_tab_url()
            .await?
            .ok_or_else(|| DomainError::InvalidFormat("no active tab".to_string()))?;

        if classify_url(&url, &self.blocked_page_url).is_excluded() {
            return Err(DomainError::InvalidFormat(url));
        }

        let host = url_host(&url)
            .ok()
            .flatten()
            .ok_or_else(|| DomainError::InvalidFormat(url.clone()))?;

        let entry = self.store.add(&host).await?;

        info!(domain = %entry.domain, url = %url, "Current page blocked");

        Ok(entry)
    }
}
