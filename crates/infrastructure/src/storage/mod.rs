pub mod json_file;
pub mod memory;

pub use json_file::JsonFileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

/// Buffered change notifications per subscriber before it starts lagging.
pub(crate) const CHANGE_CHANNEL_CAPACITY: usize = 64;
