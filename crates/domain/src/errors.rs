use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain format: {0}")]
    InvalidFormat(String),

    #[error("Domain already in block list: {0}")]
    DuplicateEntry(String),

    #[error("Block list update kept conflicting: {0}")]
    StorageConflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Host error: {0}")]
    Host(String),
}

impl DomainError {
    /// Errors the presentation layer shows to the user as input feedback.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidFormat(_) | DomainError::DuplicateEntry(_)
        )
    }
}
