//! Common test utilities and fixtures
//!
//! Recording `Ledger` and `Signer` mocks share one event log, so tests can
//! assert which gateway calls and signing steps happened and in what order.

#![allow(dead_code)]

use async_trait::async_trait;
use hooverd::api::{create_router, AppState};
use hooverd::{Hoover, Ledger};
use hooverd_rpc::{NetworkInfo, RpcError};
use hooverd_tx::SignedTransaction;
use hooverd_wallet::{Signer, WalletError};
use std::sync::Mutex;
use std::time::Duration;

pub use axum::body::Body;
pub use axum::http::{Request, StatusCode};
pub use std::sync::Arc;
pub use tower::ServiceExt;

pub const ANCHOR: &str = "k9Xn3Cqv2VHd7bCP1aSmq0Ae8vVc3L5nwVv3P3H0UmA";
pub const GATEWAY: &str = "gateway.test:1984";
pub const PRICE: u128 = 65_595_508;

pub type Events = Arc<Mutex<Vec<String>>>;

pub fn events() -> Events {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn recorded(events: &Events) -> Vec<String> {
    events.lock().unwrap().clone()
}

fn upstream_error(endpoint: &str, status: u16) -> RpcError {
    RpcError::HttpStatus {
        endpoint: endpoint.to_string(),
        url: format!("http://{}{}", GATEWAY, endpoint),
        status,
        body: "unavailable".to_string(),
    }
}

// =============================================================================
// MockLedger
// =============================================================================

pub struct MockLedger {
    events: Events,
    submitted: Mutex<Vec<SignedTransaction>>,
    anchor_status: Option<u16>,
    anchor_delay: Option<Duration>,
    submit_status: u16,
    submit_fails: bool,
    submit_delay: Option<Duration>,
    offline: bool,
}

impl MockLedger {
    pub fn new(events: Events) -> Self {
        Self {
            events,
            submitted: Mutex::new(Vec::new()),
            anchor_status: None,
            anchor_delay: None,
            submit_status: 200,
            submit_fails: false,
            submit_delay: None,
            offline: false,
        }
    }

    /// `/tx_anchor` answers with this error status.
    pub fn failing_anchor(mut self, status: u16) -> Self {
        self.anchor_status = Some(status);
        self
    }

    /// `/tx_anchor` takes this long to answer.
    pub fn slow_anchor(mut self, delay: Duration) -> Self {
        self.anchor_delay = Some(delay);
        self
    }

    /// `POST /tx` answers with this status.
    pub fn submit_status(mut self, status: u16) -> Self {
        self.submit_status = status;
        self
    }

    /// `POST /tx` fails without an HTTP answer.
    pub fn failing_submit(mut self) -> Self {
        self.submit_fails = true;
        self
    }

    /// `POST /tx` takes this long to answer.
    pub fn slow_submit(mut self, delay: Duration) -> Self {
        self.submit_delay = Some(delay);
        self
    }

    /// Balance and info lookups fail.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn submitted(&self) -> Vec<SignedTransaction> {
        self.submitted.lock().unwrap().clone()
    }

    fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn price(&self, data_size: u64) -> Result<u128, RpcError> {
        self.record(format!("price:{}", data_size));
        Ok(PRICE)
    }

    async fn tx_anchor(&self) -> Result<String, RpcError> {
        self.record("anchor");
        if let Some(delay) = self.anchor_delay {
            tokio::time::sleep(delay).await;
        }
        match self.anchor_status {
            Some(status) => Err(upstream_error("/tx_anchor", status)),
            None => Ok(ANCHOR.to_string()),
        }
    }

    async fn submit(&self, tx: &SignedTransaction) -> Result<u16, RpcError> {
        self.record("submit");
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        if self.submit_fails {
            return Err(RpcError::Timeout {
                url: format!("http://{}/tx", GATEWAY),
            });
        }
        self.submitted.lock().unwrap().push(tx.clone());
        Ok(self.submit_status)
    }

    async fn network_info(&self) -> Result<NetworkInfo, RpcError> {
        self.record("info");
        if self.offline {
            return Err(upstream_error("/info", 502));
        }
        Ok(serde_json::from_value(serde_json::json!({ "height": 1450000 }))?)
    }

    async fn balance(&self, address: &str) -> Result<u128, RpcError> {
        self.record(format!("balance:{}", address));
        if self.offline {
            return Err(upstream_error("/wallet/balance", 502));
        }
        Ok(1_500_000_000_000)
    }
}

// =============================================================================
// MockSigner
// =============================================================================

/// Signs by reversing the payload, and records each call.
pub struct MockSigner {
    events: Events,
    owner: Vec<u8>,
    fail: bool,
}

impl MockSigner {
    pub fn new(events: Events) -> Self {
        Self {
            events,
            owner: vec![7u8; 64],
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Signer for MockSigner {
    fn owner(&self) -> &[u8] {
        &self.owner
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, WalletError> {
        self.events.lock().unwrap().push("sign".to_string());
        if self.fail {
            return Err(WalletError::Signing("key unavailable".into()));
        }
        Ok(message.iter().rev().copied().collect())
    }
}

// =============================================================================
// App
// =============================================================================

pub fn hoover(ledger: Arc<MockLedger>, signer: Arc<MockSigner>, timeout: Duration) -> Hoover {
    Hoover::new(ledger, signer, GATEWAY, timeout)
}

pub fn test_app_with(
    ledger: Arc<MockLedger>,
    signer: Arc<MockSigner>,
    timeout: Duration,
    max_body_bytes: usize,
) -> axum::Router {
    create_router(Arc::new(AppState {
        hoover: hoover(ledger, signer, timeout),
        max_body_bytes,
    }))
}

pub fn test_app(ledger: Arc<MockLedger>, signer: Arc<MockSigner>) -> axum::Router {
    test_app_with(ledger, signer, Duration::from_secs(5), 1024 * 1024)
}

/// Send a request and collect status and body text.
pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

pub fn post_json(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn tag_pairs(tx: &SignedTransaction) -> Vec<(String, String)> {
    tx.tags()
        .iter()
        .map(|t| (t.name.clone(), t.value.clone()))
        .collect()
}
