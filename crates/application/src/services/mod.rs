mod block_list_store;

pub use block_list_store::{BlockListStore, BlockListWatcher};
