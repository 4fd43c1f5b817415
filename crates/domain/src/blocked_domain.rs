use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain_rules::normalize_domain;

/// One row of the user's block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDomainEntry {
    pub domain: Arc<str>,
    pub enabled: bool,
}

impl BlockedDomainEntry {
    pub fn new(domain: Arc<str>, enabled: bool) -> Self {
        Self { domain, enabled }
    }

    /// Entry created by an explicit add; always starts enabled.
    pub fn enabled(domain: &str) -> Self {
        Self::new(Arc::from(domain), true)
    }

    pub fn matches(&self, canonical: &str) -> bool {
        self.domain.as_ref() == canonical
    }
}

/// Ordered read-only view over a decoded block list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockList {
    entries: Vec<BlockedDomainEntry>,
}

impl BlockList {
    pub fn new(entries: Vec<BlockedDomainEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BlockedDomainEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<BlockedDomainEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, canonical: &str) -> Option<&BlockedDomainEntry> {
        self.entries.iter().find(|e| e.matches(canonical))
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.find(canonical).is_some()
    }

    /// Stored spelling of `domain`: an exact match first, then its normalized
    /// form. Legacy lists may hold entries that were never normalized.
    pub fn resolve(&self, domain: &str) -> Option<Arc<str>> {
        if let Some(entry) = self.find(domain) {
            return Some(entry.domain.clone());
        }
        let canonical = normalize_domain(domain);
        self.find(&canonical).map(|e| e.domain.clone())
    }

    /// Normalizes `domain_or_raw` before the lookup; absent entries are not blocked.
    pub fn is_blocked(&self, domain_or_raw: &str) -> bool {
        let canonical = normalize_domain(domain_or_raw);
        self.find(&canonical).map(|e| e.enabled).unwrap_or(false)
    }

    pub fn push(&mut self, entry: BlockedDomainEntry) {
        self.entries.push(entry);
    }

    /// Returns the removed entry, or `None` when nothing matched.
    pub fn remove(&mut self, canonical: &str) -> Option<BlockedDomainEntry> {
        let idx = self.entries.iter().position(|e| e.matches(canonical))?;
        Some(self.entries.remove(idx))
    }

    /// Flips `enabled` and returns the updated entry.
    pub fn toggle(&mut self, canonical: &str) -> Option<BlockedDomainEntry> {
        let entry = self.entries.iter_mut().find(|e| e.matches(canonical))?;
        entry.enabled = !entry.enabled;
        Some(entry.clone())
    }
}

impl From<Vec<BlockedDomainEntry>> for BlockList {
    fn from(entries: Vec<BlockedDomainEntry>) -> Self {
        Self::new(entries)
    }
}
