//! # RocksDB Number Store
//!
//! Production RocksDB implementation of `NumberStore`.
//!
//! Keys are big-endian `u64` so RocksDB's byte order equals numeric order:
//! `list` is a forward scan and `last` is a single seek to the end. Values are
//! empty; the key set is the relation.

use crate::domain::errors::StoreError;
use crate::ports::outbound::NumberStore;
use parking_lot::RwLock;
use rocksdb::{IteratorMode, Options, WriteOptions, DB};
use std::path::{Path, PathBuf};
use tracing::info;

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl RocksDbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }

    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_buffer_size: 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed number store.
///
/// `None` after `close`.
pub struct RocksDbNumberStore {
    db: RwLock<Option<DB>>,
    config: RocksDbConfig,
}

impl RocksDbNumberStore {
    /// Open or create a RocksDB database
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let db = DB::open(&opts, &config.path)
            .map_err(|e| StoreError::unavailable(format!("Failed to open RocksDB: {}", e)))?;

        info!(path = %config.path.display(), "Opened RocksDB number store");

        Ok(Self {
            db: RwLock::new(Some(db)),
            config,
        })
    }

    /// Open with default settings
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(RocksDbConfig::new(path.as_ref()))
    }

    fn key(number: u64) -> [u8; 8] {
        number.to_be_bytes()
    }

    fn decode(key: &[u8]) -> Result<u64, StoreError> {
        let raw: [u8; 8] = key
            .try_into()
            .map_err(|_| StoreError::corrupted(format!("key of {} bytes", key.len())))?;
        Ok(u64::from_be_bytes(raw))
    }
}

impl NumberStore for RocksDbNumberStore {
    fn ping(&self) -> Result<(), StoreError> {
        let guard = self.db.read();
        let db = guard.as_ref().ok_or(StoreError::Closed)?;
        db.property_value("rocksdb.estimate-num-keys")
            .map(|_| ())
            .map_err(|e| StoreError::unavailable(format!("RocksDB ping failed: {}", e)))
    }

    fn contains(&self, number: u64) -> Result<bool, StoreError> {
        let guard = self.db.read();
        let db = guard.as_ref().ok_or(StoreError::Closed)?;
        db.get_pinned(Self::key(number))
            .map(|v| v.is_some())
            .map_err(|e| StoreError::io(format!("RocksDB get failed: {}", e)))
    }

    fn last(&self) -> Result<Option<u64>, StoreError> {
        let guard = self.db.read();
        let db = guard.as_ref().ok_or(StoreError::Closed)?;
        match db.iterator(IteratorMode::End).next() {
            None => Ok(None),
            Some(Ok((key, _))) => Self::decode(&key).map(Some),
            Some(Err(e)) => Err(StoreError::io(format!("RocksDB seek failed: {}", e))),
        }
    }

    fn insert(&self, number: u64) -> Result<(), StoreError> {
        // The write guard makes the existence check and the put one step.
        let guard = self.db.write();
        let db = guard.as_ref().ok_or(StoreError::Closed)?;
        let key = Self::key(number);

        let exists = db
            .get_pinned(key)
            .map_err(|e| StoreError::io(format!("RocksDB get failed: {}", e)))?
            .is_some();
        if exists {
            return Err(StoreError::DuplicateKey { number });
        }

        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        db.put_opt(key, b"", &write_opts)
            .map_err(|e| StoreError::io(format!("RocksDB put failed: {}", e)))
    }

    fn list(&self) -> Result<Vec<u64>, StoreError> {
        let guard = self.db.read();
        let db = guard.as_ref().ok_or(StoreError::Closed)?;
        db.iterator(IteratorMode::Start)
            .map(|item| {
                item.map_err(|e| StoreError::io(format!("RocksDB scan failed: {}", e)))
                    .and_then(|(key, _)| Self::decode(&key))
            })
            .collect()
    }

    fn close(&self) -> Result<(), StoreError> {
        let Some(db) = self.db.write().take() else {
            return Ok(());
        };
        db.flush()
            .map_err(|e| StoreError::io(format!("RocksDB flush failed: {}", e)))?;
        info!(path = %self.config.path.display(), "Closed RocksDB number store");
        Ok(())
    }
}
