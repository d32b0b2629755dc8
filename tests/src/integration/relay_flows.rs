//! # Relay Flows
//!
//! Caller → web gateway → application server → in-memory store, over real
//! sockets.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ns_01_sequence_validator::InMemoryNumberStore;
    use serde_json::json;

    use crate::harness::{dead_address, AppServerHandle, GatewayHandle};

    async fn relay() -> (AppServerHandle, GatewayHandle) {
        let app = AppServerHandle::start(Arc::new(InMemoryNumberStore::new())).await;
        let gateway = GatewayHandle::start(app.url()).await;
        (app, gateway)
    }

    #[tokio::test]
    async fn test_sequence_scenario_through_gateway() {
        let (_app, gateway) = relay().await;

        assert_eq!(
            gateway.submit(json!(0)).await,
            (200, json!({"result": 1, "processed_number": 0}))
        );
        assert_eq!(
            gateway.submit(json!(1)).await,
            (200, json!({"result": 2, "processed_number": 1}))
        );
        assert_eq!(
            gateway.submit(json!(1)).await,
            (
                409,
                json!({"error": "Duplicate number: 1", "code": "DUPLICATE_NUMBER"})
            )
        );
        assert_eq!(
            gateway.submit(json!(5)).await,
            (
                400,
                json!({"error": "Sequence violation: received 5, expected 2", "code": "SEQUENCE_VIOLATION"})
            )
        );

        assert_eq!(
            gateway.numbers().await,
            (200, json!({"processed_numbers": [0, 1]}))
        );
    }

    #[tokio::test]
    async fn test_first_value_is_free() {
        let (_app, gateway) = relay().await;

        let (status, body) = gateway.submit(json!(5)).await;
        assert_eq!(status, 200);
        assert_eq!(body["result"], 6);

        let (status, _) = gateway.submit(json!(6)).await;
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_gateway_rejects_before_relaying() {
        let (_app, gateway) = relay().await;

        assert_eq!(
            gateway.submit(json!(-1)).await,
            (400, json!({"error": "Number must be non-negative"}))
        );
        assert_eq!(
            gateway.submit(json!("abc")).await,
            (400, json!({"error": "Number must be an integer"}))
        );
        let resp = gateway.submit_raw("{}").await;
        assert_eq!(resp.status().as_u16(), 400);

        // Nothing reached the store.
        assert_eq!(
            gateway.numbers().await,
            (200, json!({"processed_numbers": []}))
        );
    }

    #[tokio::test]
    async fn test_coerced_string_is_relayed_as_integer() {
        let (_app, gateway) = relay().await;
        assert_eq!(
            gateway.submit(json!("3")).await,
            (200, json!({"result": 4, "processed_number": 3}))
        );
    }

    #[tokio::test]
    async fn test_unreachable_application_server() {
        let gateway = GatewayHandle::start(format!("http://{}", dead_address().await)).await;

        assert_eq!(
            gateway.submit(json!(0)).await,
            (503, json!({"error": "Application server unavailable"}))
        );
        assert_eq!(
            gateway.numbers().await,
            (503, json!({"error": "Application server unavailable"}))
        );
        assert_eq!(
            gateway.health().await,
            (
                200,
                json!({"status": "healthy", "service": "web-server", "app_server": "unreachable"})
            )
        );
    }

    #[tokio::test]
    async fn test_health_reports_application_server() {
        let (app, gateway) = relay().await;
        assert_eq!(gateway.health().await.1["app_server"], "healthy");

        app.stop().await;
        assert_eq!(gateway.health().await.1["app_server"], "unreachable");
    }

    #[tokio::test]
    async fn test_concurrent_submissions_of_same_number() {
        let (_app, gateway) = relay().await;
        let gateway = Arc::new(gateway);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let gateway = Arc::clone(&gateway);
                tokio::spawn(async move { gateway.submit(json!(0)).await.0 })
            })
            .collect();

        let mut statuses = Vec::new();
        for task in tasks {
            statuses.push(task.await.unwrap());
        }
        assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 1);
        assert_eq!(
            gateway.numbers().await,
            (200, json!({"processed_numbers": [0]}))
        );
    }
}
