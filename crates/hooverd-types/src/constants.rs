//! Gateway defaults and transaction format constants.

// =============================================================================
// Gateway Defaults
// =============================================================================

/// Default gateway host transactions are dispatched to.
pub const DEFAULT_GATEWAY_HOST: &str = "arweave.net";

/// Default gateway port.
pub const DEFAULT_GATEWAY_PORT: u16 = 443;

/// Default gateway protocol.
pub const DEFAULT_GATEWAY_PROTOCOL: &str = "https";

/// Default local listening port.
pub const DEFAULT_LISTEN_PORT: u16 = 1908;

/// Default per-call network timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default ceiling on inbound request bodies (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

// =============================================================================
// Transaction Format
// =============================================================================

/// Transaction format version produced by the builder.
pub const TX_FORMAT: u8 = 2;

/// Largest data chunk fed into the data root.
pub const MAX_CHUNK_SIZE: usize = 256 * 1024;

/// Smallest trailing chunk before the last two chunks are rebalanced.
pub const MIN_CHUNK_SIZE: usize = 32 * 1024;

/// Width of the big-endian byte-range notes hashed into the data root.
pub const NOTE_SIZE: usize = 32;

/// Winston per AR (1 AR = 10^12 winston).
pub const WINSTON_PER_AR: u128 = 1_000_000_000_000;

/// Header prefix that turns a raw request header into a tag.
pub const TAG_HEADER_PREFIX: &str = "x-tag-";

/// Header requesting symmetric encryption of a raw payload.
pub const ENCRYPT_WITH_HEADER: &str = "x-encrypt-with";

/// Header requesting encryption for a recipient's public key (unsupported).
pub const ENCRYPT_FOR_HEADER: &str = "x-encrypt-for";
