#![allow(dead_code)]

use async_trait::async_trait;
use sitewarden_application::ports::{
    CasOutcome, KeyValueStore, StorageChange, TabNavigator, VersionedValue,
};
use sitewarden_application::services::BlockListStore;
use sitewarden_domain::{DomainError, TabId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

pub const TEST_KEY: &str = "blockedDomains";
pub const BLOCKED_PAGE: &str = "chrome-extension://sitewarden/blocked.html";

// ── MockKeyValueStore ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockKeyValueStore {
    values: Arc<RwLock<HashMap<String, VersionedValue>>>,
    concurrent_writes: Arc<RwLock<Vec<String>>>,
    error: Arc<RwLock<Option<DomainError>>>,
    get_calls: Arc<AtomicUsize>,
    cas_calls: Arc<AtomicUsize>,
    changes: broadcast::Sender<StorageChange>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
            concurrent_writes: Arc::new(RwLock::new(Vec::new())),
            error: Arc::new(RwLock::new(None)),
            get_calls: Arc::new(AtomicUsize::new(0)),
            cas_calls: Arc::new(AtomicUsize::new(0)),
            changes,
        }
    }

    pub async fn with_raw(raw: &str) -> Self {
        let store = Self::new();
        store.set_raw(TEST_KEY, raw).await;
        store
    }

    pub async fn set_raw(&self, key: &str, raw: &str) {
        let mut values = self.values.write().await;
        let version = values.get(key).map(|v| v.version + 1).unwrap_or(1);
        values.insert(
            key.to_string(),
            VersionedValue {
                value: raw.to_string(),
                version,
            },
        );
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).map(|v| v.value.clone())
    }

    pub async fn version(&self, key: &str) -> Option<u64> {
        self.values.read().await.get(key).map(|v| v.version)
    }

    /// Applies `raw` as a foreign write right before each upcoming CAS.
    pub async fn queue_concurrent_write(&self, raw: &str) {
        self.concurrent_writes.write().await.push(raw.to_string());
    }

    pub async fn fail_with(&self, error: DomainError) {
        *self.error.write().await = Some(error);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn cas_calls(&self) -> usize {
        self.cas_calls.load(Ordering::SeqCst)
    }

    async fn check_error(&self) -> Result<(), DomainError> {
        match self.error.read().await.as_ref() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>, DomainError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_error().await?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn compare_and_set(
        &self,
        key: &str,
        expected_version: Option<u64>,
        value: String,
    ) -> Result<CasOutcome, DomainError> {
        self.cas_calls.fetch_add(1, Ordering::SeqCst);
        self.check_error().await?;

        let foreign = {
            let mut pending = self.concurrent_writes.write().await;
            if pending.is_empty() {
                None
            } else {
                Some(pending.remove(0))
            }
        };
        if let Some(raw) = foreign {
            self.set_raw(key, &raw).await;
        }

        let mut values = self.values.write().await;
        let current_version = values.get(key).map(|v| v.version);
        if current_version != expected_version {
            return Ok(CasOutcome::Conflict { current_version });
        }

        let version = current_version.unwrap_or(0) + 1;
        values.insert(
            key.to_string(),
            VersionedValue {
                value: value.clone(),
                version,
            },
        );
        let _ = self.changes.send(StorageChange {
            key: key.to_string(),
            new_value: Some(value),
            version,
        });
        Ok(CasOutcome::Committed { version })
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.changes.subscribe()
    }
}

// ── MockTabNavigator ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockTabNavigator {
    redirects: Arc<RwLock<Vec<(TabId, String)>>>,
    active_url: Arc<RwLock<Option<String>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockTabNavigator {
    pub fn new() -> Self {
        Self {
            redirects: Arc::new(RwLock::new(Vec::new())),
            active_url: Arc::new(RwLock::new(None)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_active_url(&self, url: &str) {
        *self.active_url.write().await = Some(url.to_string());
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub async fn redirects(&self) -> Vec<(TabId, String)> {
        self.redirects.read().await.clone()
    }

    pub async fn redirect_count(&self) -> usize {
        self.redirects.read().await.len()
    }
}

impl Default for MockTabNavigator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabNavigator for MockTabNavigator {
    async fn redirect(&self, tab_id: TabId, url: &str) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::Host(format!("tab {} is gone", tab_id)));
        }
        self.redirects.write().await.push((tab_id, url.to_string()));
        Ok(())
    }

    async fn active_tab_url(&self) -> Result<Option<String>, DomainError> {
        Ok(self.active_url.read().await.clone())
    }
}

// ── builders ──────────────────────────────────────────────────────────────────

pub fn build_store(kv: &MockKeyValueStore) -> Arc<BlockListStore> {
    Arc::new(BlockListStore::new(Arc::new(kv.clone()), TEST_KEY, 8))
}
