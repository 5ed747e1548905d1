//! Router setup

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::api::handlers;
use crate::api::state::AppState;

/// Create the submission router.
///
/// Every path goes through the same handler; the decoder picks the request
/// format from the path and rejects the ones it doesn't know. Known paths
/// take POST only.
pub fn create_router(state: Arc<AppState>) -> Router {
    let submit = || post(handlers::submit).fallback(handlers::method_not_allowed);
    Router::new()
        .route("/", submit())
        .route("/json", submit())
        .route("/tx", submit())
        .route("/raw", submit())
        .fallback(handlers::submit)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}
