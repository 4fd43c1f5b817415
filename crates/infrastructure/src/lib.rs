pub mod host;
pub mod storage;
