use sitewarden_domain::{
    classify_url, normalize_domain, url_host, NavigationCommitted, TabId, TabUpdated, UrlKind,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::ports::TabNavigator;
use crate::services::BlockListStore;

/// What the guard did with one navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Event was not a main-frame commit or a loading tab update.
    Ignored,
    Excluded(UrlKind),
    Unparseable,
    Allowed,
    Redirected { domain: String },
    RedirectFailed { domain: String },
}

impl GuardDecision {
    pub fn redirected(&self) -> bool {
        matches!(self, GuardDecision::Redirected { .. })
    }
}

/// Redirects tabs away from enabled block list entries.
///
/// Every evaluation stands alone: one store read, at most one redirect. Both
/// host triggers may fire for the same navigation; redirecting a tab that is
/// already on the blocked page is harmless, so no per-tab state is kept.
pub struct NavigationGuardUseCase {
    store: Arc<BlockListStore>,
    navigator: Arc<dyn TabNavigator>,
    blocked_page_url: Arc<str>,
}

impl NavigationGuardUseCase {
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

    pub async fn on_navigation_committed(&self, event: &NavigationCommitted) -> GuardDecision {
        if !event.is_main_frame() {
            return GuardDecision::Ignored;
        }
        self.evaluate(event.tab_id, &event.url).await
    }

    pub async fn on_tab_updated(&self, event: &TabUpdated) -> GuardDecision {
        match event.loading_url() {
            Some(url) => self.evaluate(event.tab_id, url).await,
            None => GuardDecision::Ignored,
        }
    }

    #[instrument(skip(self, tab_id), fields(tab_id = %tab_id))]
    pub async fn evaluate(&self, tab_id: TabId, url: &str) -> GuardDecision {
        let kind = classify_url(url, &self.blocked_page_url);
        if kind.is_excluded() {
            return GuardDecision::Excluded(kind);
        }

        let host = match url_host(url) {
            Ok(Some(host)) => host,
            Ok(None) => return GuardDecision::Allowed,
            Err(e) => {
                debug!(error = %e, "Skipping unparseable URL");
                return GuardDecision::Unparseable;
            }
        };

        let domain = normalize_domain(&host);
        if domain.is_empty() {
            return GuardDecision::Allowed;
        }

        let blocked = match self.store.is_blocked(&domain).await {
            Ok(blocked) => blocked,
            Err(e) => {
                error!(error = %e, domain = %domain, "Failed to read block list");
                false
            }
        };

        if !blocked {
            return GuardDecision::Allowed;
        }

        match self.navigator.redirect(tab_id, &self.blocked_page_url).await {
            Ok(()) => {
                info!(domain = %domain, "Redirected tab to blocked page");
                GuardDecision::Redirected { domain }
            }
            Err(e) => {
                error!(error = %e, domain = %domain, "Failed to redirect blocked tab");
                GuardDecision::RedirectFailed { domain }
            }
        }
    }
}
