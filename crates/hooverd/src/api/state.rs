//! Application state shared across HTTP handlers

use crate::pipeline::Hoover;

/// Read-only state shared by every request.
pub struct AppState {
    pub hoover: Hoover,

    /// Ceiling on request bodies; larger bodies get `413`.
    pub max_body_bytes: usize,
}
