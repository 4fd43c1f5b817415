use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuardConfig {
    /// Extension page that blocked tabs are redirected to
    #[serde(default = "default_blocked_page_url")]
    pub blocked_page_url: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            blocked_page_url: default_blocked_page_url(),
        }
    }
}

fn default_blocked_page_url() -> String {
    "chrome-extension://sitewarden/blocked.html".to_string()
}
