//! Test harness: both tiers on ephemeral loopback ports.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ns_01_sequence_validator::{NumberStore, SequenceValidatorService};
use ns_02_web_gateway::{GatewayService, HttpApplicationServer, UpstreamConfig};
use reqwest::Response;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A running application server.
pub struct AppServerHandle {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl AppServerHandle {
    /// Start an application server over `store`.
    pub async fn start(store: Arc<dyn NumberStore>) -> Self {
        let router =
            ns_01_sequence_validator::create_router(Arc::new(SequenceValidatorService::new(store)));
        let listener = bind().await;
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();
        let shutdown = async move {
            let _ = rx.await;
        };
        let task = tokio::spawn(ns_01_sequence_validator::serve(listener, router, shutdown));
        Self {
            addr,
            shutdown: Some(tx),
            task,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Graceful shutdown; waits for the server to drain.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.task).await;
    }
}

/// A running web gateway.
pub struct GatewayHandle {
    pub addr: SocketAddr,
    client: reqwest::Client,
}

impl GatewayHandle {
    /// Start a gateway relaying to `app_server_url`.
    pub async fn start(app_server_url: String) -> Self {
        let upstream = HttpApplicationServer::new(&UpstreamConfig {
            base_url: app_server_url,
            process_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(5),
        })
        .expect("upstream client");
        let router = ns_02_web_gateway::create_router(GatewayService::new(Arc::new(upstream)));
        let listener = bind().await;
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(ns_02_web_gateway::serve(
            listener,
            router,
            std::future::pending(),
        ));
        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    /// `POST /process` with a raw JSON body.
    pub async fn submit_raw(&self, body: &str) -> Response {
        self.client
            .post(format!("http://{}/process", self.addr))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("gateway reachable")
    }

    /// `POST /process`, returning status and JSON body.
    pub async fn submit(&self, number: Value) -> (u16, Value) {
        let body = serde_json::json!({ "number": number }).to_string();
        json_of(self.submit_raw(&body).await).await
    }

    pub async fn numbers(&self) -> (u16, Value) {
        self.get("/numbers").await
    }

    pub async fn health(&self) -> (u16, Value) {
        self.get("/health").await
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .get(format!("http://{}{}", self.addr, path))
            .send()
            .await
            .expect("gateway reachable");
        json_of(resp).await
    }
}

/// An address with nothing listening on it.
pub async fn dead_address() -> SocketAddr {
    let listener = bind().await;
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}

async fn bind() -> TcpListener {
    TcpListener::bind("127.0.0.1:0").await.expect("bind loopback")
}

async fn json_of(resp: Response) -> (u16, Value) {
    let status = resp.status().as_u16();
    let body = resp.json().await.expect("JSON body");
    (status, body)
}
