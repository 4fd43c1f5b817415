//! Sitewarden Domain Layer
pub mod blocked_domain;
pub mod blocked_list_codec;
pub mod config;
pub mod domain_rules;
pub mod errors;
pub mod navigation;

pub use blocked_domain::{BlockList, BlockedDomainEntry};
pub use blocked_list_codec::{decode_entries, encode_entries};
pub use config::{CliOverrides, Config};
pub use domain_rules::{is_valid_domain, normalize_domain, validate_domain_input, DomainValidation};
pub use errors::DomainError;
pub use navigation::{
    classify_url, url_host, NavigationCommitted, TabId, TabStatus, TabUpdated, UrlKind,
    MAIN_FRAME_ID,
};
