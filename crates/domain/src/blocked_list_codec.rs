//! Wire format of the persisted block list.
//!
//! Reading is lenient: older releases stored a plain array of domain strings,
//! and storage can hand back anything, so every unexpected shape decodes to a
//! usable list instead of an error. Writing always uses the object form.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::blocked_domain::BlockedDomainEntry;
use crate::errors::DomainError;

pub fn decode_entries(raw: Option<&str>) -> Vec<BlockedDomainEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
        return Vec::new();
    }

    let parsed: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Discarding unparseable block list");
            return Vec::new();
        }
    };

    let Value::Array(items) = parsed else {
        warn!("Discarding block list that is not an array");
        return Vec::new();
    };

    if matches!(items.first(), Some(Value::String(_))) {
        debug!(count = items.len(), "Migrating legacy string block list");
        return items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(domain) => Some(BlockedDomainEntry::new(Arc::from(domain), true)),
                _ => None,
            })
            .collect();
    }

    items.iter().filter_map(decode_object).collect()
}

fn decode_object(item: &Value) -> Option<BlockedDomainEntry> {
    let object = item.as_object()?;
    let domain = object.get("domain")?.as_str()?;
    let enabled = object.get("enabled")?.as_bool()?;
    Some(BlockedDomainEntry::new(Arc::from(domain), enabled))
}

pub fn encode_entries(entries: &[BlockedDomainEntry]) -> Result<String, DomainError> {
    serde_json::to_string(entries)
        .map_err(|e| DomainError::Storage(format!("Failed to encode block list: {}", e)))
}
