use async_trait::async_trait;
use sitewarden_domain::{DomainError, TabId};

/// Browser tab operations the core needs from its host.
#[async_trait]
pub trait TabNavigator: Send + Sync {
    async fn redirect(&self, tab_id: TabId, url: &str) -> Result<(), DomainError>;

    async fn active_tab_url(&self) -> Result<Option<String>, DomainError>;
}
