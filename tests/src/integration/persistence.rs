//! # Persistence Flows
//!
//! The application server over a file-backed store: numbers survive a
//! restart, and the sequence continues where it stopped.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ns_01_sequence_validator::{
        connect_with_retry, ConnectError, NumberStore, RetryPolicy, StoreError, StoreLocation,
    };
    use serde_json::json;
    use tempfile::TempDir;

    use crate::harness::{AppServerHandle, GatewayHandle};

    fn quick_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 2,
            delay: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_sequence_survives_restart() {
        let dir = TempDir::new().unwrap();
        let location = StoreLocation::File(dir.path().join("numbers.db"));

        {
            let store = connect_with_retry(&location, &quick_retry()).await.unwrap();
            let app = AppServerHandle::start(Arc::clone(&store)).await;
            let gateway = GatewayHandle::start(app.url()).await;

            assert_eq!(gateway.submit(json!(10)).await.0, 200);
            assert_eq!(gateway.submit(json!(11)).await.0, 200);

            app.stop().await;
            store.close().unwrap();
        }

        let store = connect_with_retry(&location, &quick_retry()).await.unwrap();
        let app = AppServerHandle::start(store).await;
        let gateway = GatewayHandle::start(app.url()).await;

        assert_eq!(
            gateway.numbers().await,
            (200, json!({"processed_numbers": [10, 11]}))
        );
        assert_eq!(
            gateway.submit(json!(11)).await.1["code"],
            "DUPLICATE_NUMBER"
        );
        assert_eq!(
            gateway.submit(json!(13)).await.1["error"],
            "Sequence violation: received 13, expected 12"
        );
        assert_eq!(
            gateway.submit(json!(12)).await,
            (200, json!({"result": 13, "processed_number": 12}))
        );
    }

    #[tokio::test]
    async fn test_second_application_server_cannot_take_locked_store() {
        let dir = TempDir::new().unwrap();
        let location = StoreLocation::File(dir.path().join("numbers.db"));

        let _first = connect_with_retry(&location, &quick_retry()).await.unwrap();
        match connect_with_retry(&location, &quick_retry()).await {
            Err(ConnectError::Exhausted {
                attempts,
                last_error: StoreError::Locked { .. },
            }) => assert_eq!(attempts, 2),
            Err(other) => panic!("expected locked store, got {other}"),
            Ok(_) => panic!("second writer must be locked out"),
        }
    }
}
