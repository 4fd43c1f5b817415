use async_trait::async_trait;
use dashmap::DashMap;
use sitewarden_application::ports::TabNavigator;
use sitewarden_domain::{DomainError, TabId};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    pub url: String,
    pub redirects: u32,
}

/// In-process stand-in for the browser's tab API.
///
/// Redirecting a tab that already shows the target URL changes nothing,
/// matching how the real host treats a repeated navigation.
pub struct SimulatedTabHost {
    tabs: DashMap<TabId, TabState>,
    active: RwLock<Option<TabId>>,
    next_id: AtomicI64,
}

impl SimulatedTabHost {
    pub fn new() -> Self {
        Self {
            tabs: DashMap::new(),
            active: RwLock::new(None),
            next_id: AtomicI64::new(1),
        }
    }

    /// Opens a tab on `url` and makes it the active one.
    pub async fn open_tab(&self, url: &str) -> TabId {
        let tab_id = TabId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.tabs.insert(
            tab_id,
            TabState {
                url: url.to_string(),
                redirects: 0,
            },
        );
        *self.active.write().await = Some(tab_id);
        debug!(tab_id = %tab_id, url = %url, "Tab opened");
        tab_id
    }

    pub async fn activate(&self, tab_id: TabId) -> Result<(), DomainError> {
        if !self.tabs.contains_key(&tab_id) {
            return Err(DomainError::Host(format!("No tab with id {}", tab_id)));
        }
        *self.active.write().await = Some(tab_id);
        Ok(())
    }

    pub fn navigate(&self, tab_id: TabId, url: &str) -> Result<(), DomainError> {
        let mut tab = self
            .tabs
            .get_mut(&tab_id)
            .ok_or_else(|| DomainError::Host(format!("No tab with id {}", tab_id)))?;
        tab.url = url.to_string();
        Ok(())
    }

    pub fn tab(&self, tab_id: TabId) -> Option<TabState> {
        self.tabs.get(&tab_id).map(|t| t.value().clone())
    }
}

impl Default for SimulatedTabHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabNavigator for SimulatedTabHost {
    async fn redirect(&self, tab_id: TabId, url: &str) -> Result<(), DomainError> {
        let mut tab = self
            .tabs
            .get_mut(&tab_id)
            .ok_or_else(|| DomainError::Host(format!("No tab with id {}", tab_id)))?;

        if tab.url != url {
            tab.url = url.to_string();
            tab.redirects += 1;
            info!(tab_id = %tab_id, url = %url, "Tab redirected");
        }
        Ok(())
    }

    async fn active_tab_url(&self) -> Result<Option<String>, DomainError> {
        let active = *self.active.read().await;
        Ok(active.and_then(|id| self.tab(id)).map(|t| t.url))
    }
}
