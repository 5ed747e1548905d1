//! hooverd: a local daemon that accepts data from local clients, turns it
//! into signed ledger transactions using a held wallet, and dispatches them
//! to a gateway.
//!
//! A request flows through
//!
//! ```text
//! decode (format by path) -> extract tags -> build -> anchor -> sign -> dispatch
//! ```
//!
//! and every step's failure aborts the request before anything is sent.

pub mod api;
pub mod config;
pub mod decode;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod startup;
pub mod tags;

pub use config::{Cli, Config, GatewayProtocol};
pub use decode::{decode_request, PendingTransaction, RequestFormat};
pub use error::HooverError;
pub use ledger::Ledger;
pub use pipeline::{Dispatch, Hoover, Stage};
pub use tags::extract_tags;
