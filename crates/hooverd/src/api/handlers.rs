//! Request handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{HeaderMap, Method, StatusCode},
};

use crate::api::state::AppState;
use crate::error::{HooverError, HooverResult};

/// Accept a complete request and carry it through to dispatch.
///
/// Answers with the gateway's own status and a one-line confirmation.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> HooverResult<(StatusCode, String)> {
    let dispatch = state.hoover.handle(uri.path(), &headers, &body).await?;
    let status = StatusCode::from_u16(dispatch.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, format!("{}\n", dispatch.confirmation())))
}

/// Answer a known path reached with anything but POST.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> HooverError {
    let error = HooverError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    };
    log::warn!("{}", error);
    error
}
