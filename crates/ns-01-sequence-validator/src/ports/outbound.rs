//! # Outbound Ports (Driven Ports)
//!
//! Persistence required by the sequence validator.
//!
//! Production: `FileNumberStore`, `RocksDbNumberStore` (feature `rocksdb`)
//! Testing: `InMemoryNumberStore`

use crate::domain::errors::StoreError;

/// Abstract interface over the `processed_numbers` relation.
///
/// The relation has a single unique integer column. Implementations are
/// shared behind `Arc` and must be safe to call from concurrent requests.
pub trait NumberStore: Send + Sync {
    /// Cheap connectivity check.
    fn ping(&self) -> Result<(), StoreError>;

    /// Whether `number` is persisted.
    fn contains(&self, number: u64) -> Result<bool, StoreError>;

    /// Largest persisted number, or `None` when the store is empty.
    ///
    /// A fault is reported as `Err`, never as `Ok(None)`.
    fn last(&self) -> Result<Option<u64>, StoreError>;

    /// Persist `number`.
    ///
    /// ## Unique Constraint
    ///
    /// Must fail with `StoreError::DuplicateKey` if `number` is already
    /// persisted, including when a concurrent caller inserted it after this
    /// caller's own `contains` check.
    fn insert(&self, number: u64) -> Result<(), StoreError>;

    /// All persisted numbers, ascending, without duplicates.
    fn list(&self) -> Result<Vec<u64>, StoreError>;

    /// Flush and release the backend. Idempotent; every later call fails
    /// with `Closed`.
    fn close(&self) -> Result<(), StoreError>;
}
