use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Key the block list is persisted under
    #[serde(default = "default_key")]
    pub key: String,

    /// JSON document holding all persisted keys
    #[serde(default = "default_path")]
    pub path: String,

    /// Attempts per block list mutation before giving up on write conflicts
    #[serde(default = "default_max_update_retries")]
    pub max_update_retries: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            path: default_path(),
            max_update_retries: default_max_update_retries(),
        }
    }
}

fn default_key() -> String {
    "blockedDomains".to_string()
}

fn default_path() -> String {
    "sitewarden-storage.json".to_string()
}

fn default_max_update_retries() -> u32 {
    8
}
