//! Core types and constants for hooverd.
//!
//! This crate provides the pieces every other hooverd crate agrees on:
//! gateway defaults, chunking limits, the base64url codec used by the
//! ledger's JSON wire format, and winston/AR unit conversion.

pub mod constants;
pub mod encoding;
pub mod units;

pub use encoding::{b64url_decode, b64url_encode, EncodingError};
pub use units::winston_to_ar;
