use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Frame id the host reports for a tab's top-level document.
pub const MAIN_FRAME_ID: i64 = 0;

/// Browser-internal pages the guard must never evaluate.
pub const INTERNAL_SCHEMES: &[&str] = &[
    "chrome:",
    "edge:",
    "brave:",
    "opera:",
    "vivaldi:",
    "view-source:",
    "devtools:",
];

pub const EXTENSION_SCHEMES: &[&str] = &[
    "chrome-extension:",
    "moz-extension:",
    "safari-web-extension:",
    "extension:",
];

pub const ABOUT_SCHEME: &str = "about:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
}

/// A navigation the host has committed in some frame of a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCommitted {
    pub tab_id: TabId,
    pub frame_id: i64,
    pub url: String,
}

impl NavigationCommitted {
    pub fn is_main_frame(&self) -> bool {
        self.frame_id == MAIN_FRAME_ID
    }
}

/// A change to a tab's state; `url` is only set when the URL changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabUpdated {
    pub tab_id: TabId,
    pub status: Option<TabStatus>,
    pub url: Option<String>,
}

impl TabUpdated {
    /// URL worth evaluating: present and reported while the tab is loading.
    pub fn loading_url(&self) -> Option<&str> {
        match self.status {
            Some(TabStatus::Loading) => self.url.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Internal,
    Extension,
    About,
    BlockedPage,
    Web,
}

impl UrlKind {
    pub fn is_excluded(&self) -> bool {
        !matches!(self, UrlKind::Web)
    }
}

pub fn classify_url(url: &str, blocked_page_url: &str) -> UrlKind {
    let trimmed = url.trim();
    if is_blocked_page(trimmed, blocked_page_url) {
        return UrlKind::BlockedPage;
    }

    let lower = trimmed.to_ascii_lowercase();
    if EXTENSION_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        UrlKind::Extension
    } else if INTERNAL_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        UrlKind::Internal
    } else if lower.starts_with(ABOUT_SCHEME) {
        UrlKind::About
    } else {
        UrlKind::Web
    }
}

/// The blocked page itself, optionally followed by a query or fragment.
fn is_blocked_page(url: &str, blocked_page_url: &str) -> bool {
    if blocked_page_url.is_empty() {
        return false;
    }
    match url.strip_prefix(blocked_page_url) {
        Some(rest) => rest.is_empty() || rest.starts_with('?') || rest.starts_with('#'),
        None => false,
    }
}

/// Host component of `url`; `Ok(None)` for URLs that carry no host.
pub fn url_host(url: &str) -> Result<Option<String>, url::ParseError> {
    let parsed = Url::parse(url.trim())?;
    Ok(parsed.host_str().map(str::to_string))
}
