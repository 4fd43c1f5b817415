use sitewarden_application::ports::TabNavigator;
use sitewarden_application::services::BlockListStore;
use sitewarden_application::use_cases::navigation::NavigationGuardUseCase;
use sitewarden_domain::{DomainError, NavigationCommitted, TabId};
use sitewarden_infrastructure::host::SimulatedTabHost;
use sitewarden_infrastructure::storage::InMemoryKeyValueStore;
use std::sync::Arc;

const BLOCKED_PAGE: &str = "chrome-extension://sitewarden/blocked.html";

#[tokio::test]
async fn test_open_tab_becomes_active() {
    let host = SimulatedTabHost::new();

    let first = host.open_tab("https://a.com/").await;
    let second = host.open_tab("https://b.com/").await;

    assert_ne!(first, second);
    assert_eq!(
        host.active_tab_url().await.unwrap().as_deref(),
        Some("https://b.com/")
    );

    host.activate(first).await.unwrap();
    assert_eq!(
        host.active_tab_url().await.unwrap().as_deref(),
        Some("https://a.com/")
    );
}

#[tokio::test]
async fn test_no_active_tab() {
    let host = SimulatedTabHost::new();

    assert!(host.active_tab_url().await.unwrap().is_none());
    assert!(matches!(
        host.activate(TabId(42)).await,
        Err(DomainError::Host(_))
    ));
}

#[tokio::test]
async fn test_redirect_is_idempotent() {
    let host = SimulatedTabHost::new();
    let tab = host.open_tab("https://a.com/").await;

    host.redirect(tab, BLOCKED_PAGE).await.unwrap();
    host.redirect(tab, BLOCKED_PAGE).await.unwrap();

    let state = host.tab(tab).unwrap();
    assert_eq!(state.url, BLOCKED_PAGE);
    assert_eq!(state.redirects, 1);
}

#[tokio::test]
async fn test_redirect_unknown_tab() {
    let host = SimulatedTabHost::new();

    let result = host.redirect(TabId(99), BLOCKED_PAGE).await;

    assert!(matches!(result, Err(DomainError::Host(_))));
}

#[tokio::test]
async fn test_guard_redirects_simulated_tab() {
    let host = Arc::new(SimulatedTabHost::new());
    let store = Arc::new(BlockListStore::new(
        Arc::new(InMemoryKeyValueStore::new()),
        "blockedDomains",
        8,
    ));
    store.add("distracting.net").await.unwrap();
    let guard = NavigationGuardUseCase::new(store, host.clone(), BLOCKED_PAGE);

    let tab = host.open_tab("about:blank").await;
    host.navigate(tab, "https://www.distracting.net/feed").unwrap();
    let decision = guard
        .on_navigation_committed(&NavigationCommitted {
            tab_id: tab,
            frame_id: 0,
            url: "https://www.distracting.net/feed".to_string(),
        })
        .await;

    assert!(decision.redirected());
    assert_eq!(host.tab(tab).unwrap().url, BLOCKED_PAGE);
}
