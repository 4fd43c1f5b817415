mod key_value_store;
mod tab_navigator;

pub use key_value_store::{CasOutcome, KeyValueStore, StorageChange, VersionedValue};
pub use tab_navigator::TabNavigator;
