//! # Store Connection
//!
//! Opens the configured `NumberStore` at startup, retrying a bounded number
//! of times with a fixed pause between attempts.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::adapters::storage::{FileNumberStore, InMemoryNumberStore};
use crate::domain::config::{RetryPolicy, StoreLocation};
use crate::domain::errors::StoreError;
use crate::ports::outbound::NumberStore;

/// Startup connection errors
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The location can never be opened by this build.
    #[error("store configuration error: {0}")]
    Config(String),

    /// A single attempt failed; the retry loop may try again.
    #[error("store connection attempt failed: {0}")]
    Attempt(StoreError),

    /// Every attempt failed.
    #[error("could not connect to store after {attempts} attempts: {last_error}")]
    Exhausted {
        attempts: u32,
        last_error: StoreError,
    },
}

/// Open the store at `location` once.
pub fn open_store(location: &StoreLocation) -> Result<Arc<dyn NumberStore>, ConnectError> {
    match location {
        StoreLocation::Memory => Ok(Arc::new(InMemoryNumberStore::new())),
        StoreLocation::File(path) => FileNumberStore::open(path)
            .map(|store| Arc::new(store) as Arc<dyn NumberStore>)
            .map_err(ConnectError::Attempt),
        #[cfg(feature = "rocksdb")]
        StoreLocation::RocksDb(path) => {
            crate::adapters::storage::RocksDbNumberStore::open_default(path)
                .map(|store| Arc::new(store) as Arc<dyn NumberStore>)
                .map_err(ConnectError::Attempt)
        }
        #[cfg(not(feature = "rocksdb"))]
        StoreLocation::RocksDb(_) => Err(ConnectError::Config(format!(
            "{location} requires the `rocksdb` feature"
        ))),
    }
}

/// Run `attempt` until it succeeds or `policy.max_attempts` is reached.
///
/// Only `ConnectError::Attempt` is retried. Sleeps `policy.delay` between
/// attempts, never after the last one.
pub async fn retry_with_policy<T, F, Fut>(
    policy: &RetryPolicy,
    mut attempt: F,
) -> Result<T, ConnectError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ConnectError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut n = 1;
    loop {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(ConnectError::Attempt(last_error)) => {
                warn!(
                    attempt = n,
                    max_attempts,
                    error = %last_error,
                    "Store connection attempt failed"
                );
                if n >= max_attempts {
                    return Err(ConnectError::Exhausted {
                        attempts: n,
                        last_error,
                    });
                }
            }
            Err(other) => return Err(other),
        }
        tokio::time::sleep(policy.delay).await;
        n += 1;
    }
}

/// Open and ping the store, retrying per `policy`.
pub async fn connect_with_retry(
    location: &StoreLocation,
    policy: &RetryPolicy,
) -> Result<Arc<dyn NumberStore>, ConnectError> {
    retry_with_policy(policy, |attempt| async move {
        info!(%location, attempt, "Connecting to store");
        let store = open_store(location)?;
        store.ping().map_err(ConnectError::Attempt)?;
        info!(%location, "Connected to store");
        Ok::<_, ConnectError>(store)
    })
    .await
}
