//! The request pipeline.
//!
//! Each request is carried through
//!
//! ```text
//! received -> decoded -> built -> anchored -> signed -> dispatched
//! ```
//!
//! by exactly one task. A failed step ends the request; nothing reaches the
//! gateway unless every earlier step succeeded. Gateway calls are bounded by
//! the configured timeout, and CPU-bound steps (encryption, signing) run on
//! the blocking pool.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use hooverd_rpc::RpcError;
use hooverd_tx::{
    sign_transaction, AnchoredTransaction, SignedTransaction, TransactionBuilder,
    UnsignedTransaction,
};
use hooverd_wallet::{encrypt_payload, Signer};

use crate::decode::{decode_request, PendingTransaction};
use crate::error::{HooverError, HooverResult};
use crate::ledger::Ledger;
use crate::tags::extract_tags;

/// Last stage a request reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Decoded,
    Built,
    Anchored,
    Signed,
    Dispatched,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Decoded => "decoded",
            Self::Built => "built",
            Self::Anchored => "anchored",
            Self::Signed => "signed",
            Self::Dispatched => "dispatched",
        };
        f.write_str(name)
    }
}

/// Outcome of a dispatched transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub id: String,
    /// `host:port` of the gateway.
    pub gateway: String,
    /// HTTP status the gateway answered with.
    pub status: u16,
}

impl Dispatch {
    pub fn confirmation(&self) -> String {
        format!(
            "Transaction {} dispatched to {} with response: {}.",
            self.id, self.gateway, self.status
        )
    }
}

/// Turns requests into dispatched transactions.
///
/// Holds only read-only shared state, so one instance serves every
/// in-flight request.
pub struct Hoover {
    ledger: Arc<dyn Ledger>,
    signer: Arc<dyn Signer>,
    gateway: String,
    timeout: Duration,
}

impl Hoover {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        signer: Arc<dyn Signer>,
        gateway: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            ledger,
            signer,
            gateway: gateway.into(),
            timeout,
        }
    }

    /// Run one complete request through every stage.
    pub async fn handle(&self, path: &str, headers: &HeaderMap, body: &[u8]) -> HooverResult<Dispatch> {
        let mut stage = Stage::Received;
        let result = self.run(path, headers, body, &mut stage).await;

        if let Err(e) = &result {
            if e.is_caller_error() {
                log::warn!("{} rejected at stage {}: {}", path, stage, e);
            } else {
                log::error!("{} failed after stage {}: {}", path, stage, e);
            }
        }
        result
    }

    async fn run(
        &self,
        path: &str,
        headers: &HeaderMap,
        body: &[u8],
        stage: &mut Stage,
    ) -> HooverResult<Dispatch> {
        let pending = self.decode(path, headers, body).await?;
        *stage = Stage::Decoded;

        let draft = self.build(pending).await?;
        *stage = Stage::Built;

        let anchored = self.anchor(draft).await?;
        *stage = Stage::Anchored;

        let signed = self.sign(anchored).await?;
        *stage = Stage::Signed;

        let dispatch = self.dispatch(&signed).await?;
        *stage = Stage::Dispatched;

        Ok(dispatch)
    }

    /// Decode the body, extract its tags, and apply any requested encryption.
    pub async fn decode(
        &self,
        path: &str,
        headers: &HeaderMap,
        body: &[u8],
    ) -> HooverResult<PendingTransaction> {
        let request = decode_request(path, headers, body)?;
        let tags = extract_tags(&request)?;
        log::debug!(
            "{}: decoded {} request ({} bytes, {} tags)",
            path,
            request.name(),
            body.len(),
            tags.len()
        );

        let data = match request.into_payload() {
            (data, Some(key)) => tokio::task::spawn_blocking(move || {
                encrypt_payload(&data, key.as_bytes())
            })
            .await
            .map_err(|e| HooverError::Internal(format!("encryption task failed: {}", e)))?
            .map_err(HooverError::Encryption)?,
            (data, None) => data,
        };

        Ok(PendingTransaction { data, tags })
    }

    /// Price the payload and build an unsigned draft owned by the held key.
    pub async fn build(&self, pending: PendingTransaction) -> HooverResult<UnsignedTransaction> {
        let data_size = pending.data.len() as u64;
        let reward = self.bounded(Stage::Decoded, self.ledger.price(data_size)).await?;

        let mut draft = TransactionBuilder::new(pending.data)
            .owner(self.signer.owner())
            .reward(reward)
            .build()
            .map_err(HooverError::Build)?;
        for tag in pending.tags {
            draft.add_tag(tag.name, tag.value);
        }
        Ok(draft)
    }

    /// Fetch a fresh anchor and attach it.
    pub async fn anchor(&self, draft: UnsignedTransaction) -> HooverResult<AnchoredTransaction> {
        let anchor = self.bounded(Stage::Built, self.ledger.tx_anchor()).await?;
        draft.anchor(anchor).map_err(HooverError::Build)
    }

    pub async fn sign(&self, anchored: AnchoredTransaction) -> HooverResult<SignedTransaction> {
        let signer = Arc::clone(&self.signer);
        tokio::task::spawn_blocking(move || sign_transaction(anchored, signer.as_ref()))
            .await
            .map_err(|e| HooverError::Internal(format!("signing task failed: {}", e)))?
            .map_err(HooverError::Signing)
    }

    /// Post the signed transaction once and report the gateway's answer.
    pub async fn dispatch(&self, signed: &SignedTransaction) -> HooverResult<Dispatch> {
        let status = self.bounded(Stage::Signed, self.ledger.submit(signed)).await?;
        let dispatch = Dispatch {
            id: signed.id().to_string(),
            gateway: self.gateway.clone(),
            status,
        };
        log::info!(
            "{} ({} bytes, {} tags)",
            dispatch.confirmation(),
            signed.data().len(),
            signed.tags().len()
        );
        Ok(dispatch)
    }

    async fn bounded<T>(
        &self,
        stage: Stage,
        call: impl Future<Output = Result<T, RpcError>>,
    ) -> HooverResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(HooverError::Timeout {
                stage,
                after: self.timeout,
            }),
        }
    }
}
