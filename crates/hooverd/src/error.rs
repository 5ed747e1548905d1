//! Service errors.
//!
//! Every failure a request can hit maps to one variant, and every variant
//! maps to one HTTP status. Bodies are a single plain-text line.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hooverd_rpc::RpcError;
use hooverd_tx::TxError;
use hooverd_wallet::WalletError;
use std::time::Duration;
use thiserror::Error;

use crate::pipeline::Stage;

#[derive(Debug, Error)]
pub enum HooverError {
    #[error("invalid request: {0}")]
    Decode(String),

    #[error("Request type {0} not supported")]
    UnsupportedPath(String),

    #[error("Method {method} not supported on {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("{0} is not supported")]
    UnsupportedFeature(String),

    #[error("gateway error: {0}")]
    Network(#[from] RpcError),

    #[error("gateway did not answer within {after:?} (last stage: {stage})")]
    Timeout { stage: Stage, after: Duration },

    #[error("failed to build transaction: {0}")]
    Build(TxError),

    #[error("failed to sign transaction: {0}")]
    Signing(TxError),

    #[error("failed to encrypt payload: {0}")]
    Encryption(WalletError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type HooverResult<T> = Result<T, HooverError>;

impl HooverError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Decode(_) | Self::UnsupportedPath(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedFeature(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Network(e) => e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Timeout { .. }
            | Self::Build(_)
            | Self::Signing(_)
            | Self::Encryption(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller sent something we refuse, as opposed to a failure
    /// on our side or the gateway's.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Decode(_)
                | Self::UnsupportedPath(_)
                | Self::MethodNotAllowed { .. }
                | Self::UnsupportedFeature(_)
        )
    }
}

impl IntoResponse for HooverError {
    fn into_response(self) -> Response {
        (self.status_code(), format!("{}\n", self)).into_response()
    }
}
