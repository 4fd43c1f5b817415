use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use sitewarden_application::ports::{CasOutcome, KeyValueStore, StorageChange, VersionedValue};
use sitewarden_domain::DomainError;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, instrument, warn};

use super::CHANGE_CHANNEL_CAPACITY;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    version: u64,
}

type StorageDocument = BTreeMap<String, StoredValue>;

/// Keeps every key in one JSON document on disk.
///
/// Compare-and-set holds an exclusive OS lock on a sidecar `<file>.lock` from
/// the read through the rename, so separate processes sharing the file
/// serialize their writes. Each write goes to its own temp file that replaces
/// the document by rename, so readers never observe a half-written document.
pub struct JsonFileKeyValueStore {
    path: PathBuf,
    lock_path: PathBuf,
    write_lock: Mutex<()>,
    changes: broadcast::Sender<StorageChange>,
}

impl JsonFileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            lock_path: lock_path_for(&path),
            path,
            write_lock: Mutex::new(()),
            changes,
        }
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn parse_document(path: &Path, contents: &str) -> Result<StorageDocument, DomainError> {
    if contents.trim().is_empty() {
        return Ok(StorageDocument::new());
    }

    serde_json::from_str(contents).map_err(|e| {
        error!(path = %path.display(), error = %e, "Storage document is corrupt");
        DomainError::Storage(format!("Corrupt storage file {}: {}", path.display(), e))
    })
}

fn read_document(path: &Path) -> Result<StorageDocument, DomainError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_document(path, &contents),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(StorageDocument::new()),
        Err(e) => Err(DomainError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

fn write_document(path: &Path, document: &StorageDocument) -> Result<(), DomainError> {
    let serialized = serde_json::to_string_pretty(document)
        .map_err(|e| DomainError::Storage(format!("Failed to serialize storage: {}", e)))?;

    let dir = parent_dir(path);
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        DomainError::Storage(format!("Failed to create temp file in {}: {}", dir.display(), e))
    })?;
    tmp.write_all(serialized.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| DomainError::Storage(format!("Failed to write temp storage file: {}", e)))?;
    tmp.persist(path).map_err(|e| {
        DomainError::Storage(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;
    Ok(())
}

fn open_lock_file(lock_path: &Path) -> Result<File, DomainError> {
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| {
            DomainError::Storage(format!("Failed to open {}: {}", lock_path.display(), e))
        })?;
    file.lock_exclusive().map_err(|e| {
        DomainError::Storage(format!("Failed to lock {}: {}", lock_path.display(), e))
    })?;
    Ok(file)
}

fn compare_and_replace(
    path: &Path,
    key: &str,
    expected_version: Option<u64>,
    value: &str,
) -> Result<CasOutcome, DomainError> {
    let mut document = read_document(path)?;
    let current_version = document.get(key).map(|stored| stored.version);
    if current_version != expected_version {
        return Ok(CasOutcome::Conflict { current_version });
    }

    let version = current_version.unwrap_or(0) + 1;
    document.insert(
        key.to_string(),
        StoredValue {
            value: value.to_string(),
            version,
        },
    );
    write_document(path, &document)?;
    Ok(CasOutcome::Committed { version })
}

/// Read, version check and replace, all under the file lock.
fn locked_compare_and_set(
    path: &Path,
    lock_path: &Path,
    key: &str,
    expected_version: Option<u64>,
    value: &str,
) -> Result<CasOutcome, DomainError> {
    let lock_file = open_lock_file(lock_path)?;
    let outcome = compare_and_replace(path, key, expected_version, value);
    if let Err(e) = FileExt::unlock(&lock_file) {
        warn!(path = %lock_path.display(), error = %e, "Failed to release storage lock");
    }
    outcome
}

#[async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>, DomainError> {
        let document = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => parse_document(&self.path, &contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => StorageDocument::new(),
            Err(e) => {
                return Err(DomainError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        Ok(document.get(key).map(|stored| VersionedValue {
            value: stored.value.clone(),
            version: stored.version,
        }))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn compare_and_set(
        &self,
        key: &str,
        expected_version: Option<u64>,
        value: String,
    ) -> Result<CasOutcome, DomainError> {
        let _guard = self.write_lock.lock().await;

        let path = self.path.clone();
        let lock_path = self.lock_path.clone();
        let owned_key = key.to_string();
        let owned_value = value.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            locked_compare_and_set(&path, &lock_path, &owned_key, expected_version, &owned_value)
        })
        .await
        .map_err(|e| DomainError::Storage(format!("Storage write task failed: {}", e)))??;

        if let CasOutcome::Committed { version } = outcome {
            debug!(version, "Storage file updated");
            let _ = self.changes.send(StorageChange {
                key: key.to_string(),
                new_value: Some(value),
                version,
            });
        }

        Ok(outcome)
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.changes.subscribe()
    }
}
