use crate::domain::errors::StoreError;
use crate::ports::outbound::NumberStore;
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// In-memory number store for tests and `memory://`.
///
/// The ordered set gives ascending listing and O(log n) `last` for free.
/// `close` drops the set; later calls fail with `Closed`.
pub struct InMemoryNumberStore {
    numbers: RwLock<Option<BTreeSet<u64>>>,
}

impl Default for InMemoryNumberStore {
    fn default() -> Self {
        Self::with_numbers([])
    }
}

impl InMemoryNumberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `numbers`.
    pub fn with_numbers(numbers: impl IntoIterator<Item = u64>) -> Self {
        Self {
            numbers: RwLock::new(Some(numbers.into_iter().collect())),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&BTreeSet<u64>) -> T) -> Result<T, StoreError> {
        self.numbers.read().as_ref().map(f).ok_or(StoreError::Closed)
    }
}

impl NumberStore for InMemoryNumberStore {
    fn ping(&self) -> Result<(), StoreError> {
        self.read(|_| ())
    }

    fn contains(&self, number: u64) -> Result<bool, StoreError> {
        self.read(|numbers| numbers.contains(&number))
    }

    fn last(&self) -> Result<Option<u64>, StoreError> {
        self.read(|numbers| numbers.last().copied())
    }

    fn insert(&self, number: u64) -> Result<(), StoreError> {
        let mut guard = self.numbers.write();
        let numbers = guard.as_mut().ok_or(StoreError::Closed)?;
        if numbers.insert(number) {
            Ok(())
        } else {
            Err(StoreError::DuplicateKey { number })
        }
    }

    fn list(&self) -> Result<Vec<u64>, StoreError> {
        self.read(|numbers| numbers.iter().copied().collect())
    }

    fn close(&self) -> Result<(), StoreError> {
        self.numbers.write().take();
        Ok(())
    }
}
