//! Storage Adapters
//!
//! Implementations of the `NumberStore` trait.

mod file;
mod memory;
#[cfg(feature = "rocksdb")]
mod rocksdb;

pub use file::FileNumberStore;
pub use memory::InMemoryNumberStore;
#[cfg(feature = "rocksdb")]
pub use self::rocksdb::{RocksDbConfig, RocksDbNumberStore};
