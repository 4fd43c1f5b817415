pub mod errors;
pub mod guard;
pub mod logging;
pub mod root;
pub mod storage;

pub use errors::ConfigError;
pub use guard::GuardConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use storage::StorageConfig;
