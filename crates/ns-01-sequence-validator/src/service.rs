//! # Sequence Validator Service
//!
//! Implements `SequenceValidatorApi` over an injected `NumberStore`.
//!
//! ## Process
//!
//! 1. Reject negative numbers
//! 2. Reject numbers already persisted
//! 3. Reject numbers that do not continue the persisted sequence
//! 4. Persist, answer with `number + 1`
//!
//! The duplicate check and the insert are not isolated from concurrent
//! callers. The store's unique constraint decides the race and the loser
//! receives `SaveError`.

use std::sync::Arc;

use ns_telemetry::log_number_event;
use shared_types::{DatabaseStatus, ValidatorHealth, APPLICATION_SERVER};
use tracing::{debug, error, info};

use crate::domain::entities::AcceptedNumber;
use crate::domain::errors::{SequenceError, INTERNAL_ERROR_MESSAGE, LIST_FAILED_MESSAGE};
use crate::domain::sequence::{check_continuity, require_non_negative};
use crate::ports::inbound::SequenceValidatorApi;
use crate::ports::outbound::NumberStore;

/// The application server's sequence authority.
#[derive(Clone)]
pub struct SequenceValidatorService {
    store: Arc<dyn NumberStore>,
}

impl SequenceValidatorService {
    pub fn new(store: Arc<dyn NumberStore>) -> Self {
        Self { store }
    }

    /// The injected store handle, for shutdown.
    pub fn store(&self) -> &Arc<dyn NumberStore> {
        &self.store
    }
}

impl SequenceValidatorApi for SequenceValidatorService {
    fn process(&self, number: i64) -> Result<AcceptedNumber, SequenceError> {
        let number = require_non_negative(number).inspect_err(|_| {
            log_number_event!(warn, APPLICATION_SERVER, "Rejected negative number", number);
        })?;

        let duplicate = self.store.contains(number).map_err(|e| {
            error!(number, error = %e, "Duplicate lookup failed");
            SequenceError::unexpected(INTERNAL_ERROR_MESSAGE, &e)
        })?;
        if duplicate {
            log_number_event!(warn, APPLICATION_SERVER, "Duplicate number", number);
            return Err(SequenceError::DuplicateNumber { number });
        }

        let last = self.store.last().map_err(|e| {
            error!(number, error = %e, "Last value lookup failed");
            SequenceError::save_failed(number, &e)
        })?;
        debug!(number, ?last, "Checking continuity");
        check_continuity(number, last).inspect_err(|_| {
            log_number_event!(
                warn,
                APPLICATION_SERVER,
                "Sequence violation",
                number,
                expected = ?last.map(|l| l + 1)
            );
        })?;

        self.store.insert(number).map_err(|e| {
            error!(number, error = %e, "Failed to persist number");
            SequenceError::save_failed(number, &e)
        })?;

        let accepted = AcceptedNumber::new(number);
        log_number_event!(
            info,
            APPLICATION_SERVER,
            "Accepted number",
            number,
            result = accepted.next_expected()
        );
        Ok(accepted)
    }

    fn list_numbers(&self) -> Result<Vec<u64>, SequenceError> {
        self.store.list().map_err(|e| {
            error!(error = %e, "Failed to list numbers");
            SequenceError::unexpected(LIST_FAILED_MESSAGE, &e)
        })
    }

    fn health(&self) -> ValidatorHealth {
        match self.store.ping() {
            Ok(()) => ValidatorHealth::from_database(DatabaseStatus::Connected),
            Err(e) => {
                info!(error = %e, "Store health check failed");
                ValidatorHealth::from_database(DatabaseStatus::Disconnected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNumberStore;
    use crate::domain::errors::StoreError;
    use proptest::prelude::*;
    use shared_types::{ErrorCode, HealthStatus};

    fn service_with(numbers: impl IntoIterator<Item = u64>) -> SequenceValidatorService {
        SequenceValidatorService::new(Arc::new(InMemoryNumberStore::with_numbers(numbers)))
    }

    /// Store whose individual operations can be made to fail.
    #[derive(Default)]
    struct FaultyStore {
        inner: InMemoryNumberStore,
        fail_contains: bool,
        fail_last: bool,
        fail_insert: bool,
        fail_ping: bool,
        race_insert: bool,
    }

    impl NumberStore for FaultyStore {
        fn ping(&self) -> Result<(), StoreError> {
            if self.fail_ping {
                return Err(StoreError::unavailable("connection reset"));
            }
            self.inner.ping()
        }

        fn contains(&self, number: u64) -> Result<bool, StoreError> {
            if self.fail_contains {
                return Err(StoreError::io("read timeout"));
            }
            self.inner.contains(number)
        }

        fn last(&self) -> Result<Option<u64>, StoreError> {
            if self.fail_last {
                return Err(StoreError::io("read timeout"));
            }
            self.inner.last()
        }

        fn insert(&self, number: u64) -> Result<(), StoreError> {
            if self.fail_insert {
                return Err(StoreError::io("disk full"));
            }
            if self.race_insert {
                // Another writer got there between the check and the insert.
                return Err(StoreError::DuplicateKey { number });
            }
            self.inner.insert(number)
        }

        fn list(&self) -> Result<Vec<u64>, StoreError> {
            self.inner.list()
        }

        fn close(&self) -> Result<(), StoreError> {
            self.inner.close()
        }
    }

    fn faulty(store: FaultyStore) -> SequenceValidatorService {
        SequenceValidatorService::new(Arc::new(store))
    }

    #[test]
    fn test_scenario_from_empty_store() {
        let service = service_with([]);

        let first = service.process(0).unwrap();
        assert_eq!((first.next_expected(), first.number()), (1, 0));

        let second = service.process(1).unwrap();
        assert_eq!((second.next_expected(), second.number()), (2, 1));

        assert_eq!(
            service.process(1),
            Err(SequenceError::DuplicateNumber { number: 1 })
        );
        assert_eq!(
            service.process(5),
            Err(SequenceError::SequenceViolation {
                received: 5,
                expected: 2
            })
        );
        assert_eq!(service.list_numbers().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_first_value_may_be_any_non_negative() {
        let service = service_with([]);
        assert_eq!(service.process(5).unwrap().next_expected(), 6);
        assert_eq!(service.process(6).unwrap().next_expected(), 7);
    }

    #[test]
    fn test_negative_number_is_invalid() {
        let service = service_with([]);
        let err = service.process(-1).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidNumber);
        assert_eq!(err.to_string(), "Number must be non-negative");
        assert!(service.list_numbers().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_checked_before_continuity() {
        let service = service_with([3, 4, 5]);
        assert_eq!(
            service.process(3),
            Err(SequenceError::DuplicateNumber { number: 3 })
        );
    }

    #[test]
    fn test_duplicate_lookup_fault_is_unexpected() {
        let service = faulty(FaultyStore {
            fail_contains: true,
            ..Default::default()
        });
        let err = service.process(0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnexpectedError);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_last_value_fault_is_save_error_and_persists_nothing() {
        let store = Arc::new(FaultyStore {
            fail_last: true,
            ..Default::default()
        });
        let service = SequenceValidatorService::new(store.clone());

        let err = service.process(0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SaveError);
        assert_eq!(err.to_string(), "Failed to save number: 0");
        assert!(store.inner.list().unwrap().is_empty());
    }

    #[test]
    fn test_insert_failure_is_save_error() {
        let service = faulty(FaultyStore {
            fail_insert: true,
            ..Default::default()
        });
        assert_eq!(service.process(7).unwrap_err().code(), ErrorCode::SaveError);
    }

    #[test]
    fn test_lost_insert_race_is_save_error() {
        let service = faulty(FaultyStore {
            race_insert: true,
            ..Default::default()
        });
        let err = service.process(2).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SaveError);
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn test_concurrent_same_value_exactly_one_succeeds() {
        let service = service_with([]);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || service.process(0))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(matches!(
                err.code(),
                ErrorCode::DuplicateNumber | ErrorCode::SequenceViolation | ErrorCode::SaveError
            ));
        }
        assert_eq!(service.list_numbers().unwrap(), vec![0]);
    }

    #[test]
    fn test_health_reflects_store() {
        assert!(service_with([]).health().is_healthy());

        let health = faulty(FaultyStore {
            fail_ping: true,
            ..Default::default()
        })
        .health();
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert_eq!(health.database, DatabaseStatus::Disconnected);
    }

    proptest! {
        #[test]
        fn prop_only_successor_is_accepted(max in 0u64..1_000_000, n in 0i64..2_000_000) {
            let service = service_with([max]);
            let result = service.process(n);
            if n as u64 == max + 1 {
                prop_assert_eq!(result.unwrap().next_expected(), max + 2);
            } else if n as u64 == max {
                prop_assert_eq!(result, Err(SequenceError::DuplicateNumber { number: max }));
            } else {
                prop_assert_eq!(
                    result,
                    Err(SequenceError::SequenceViolation { received: n as u64, expected: max + 1 })
                );
            }
        }

        #[test]
        fn prop_listing_stays_ascending_and_contiguous(start in 0u64..1000, len in 1usize..50) {
            let service = service_with([]);
            for n in start..start + len as u64 {
                service.process(n as i64).unwrap();
            }
            let listed = service.list_numbers().unwrap();
            prop_assert_eq!(listed, (start..start + len as u64).collect::<Vec<_>>());
        }
    }
}
