#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Cannot write config file {path}: {reason}")]
    FileWrite { path: String, reason: String },

    #[error("Invalid config syntax: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
