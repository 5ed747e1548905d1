//! Data root computation.
//!
//! The payload is split into chunks of at most `MAX_CHUNK_SIZE` bytes; when
//! the remainder after a full chunk would be smaller than `MIN_CHUNK_SIZE`,
//! the last two chunks are split evenly instead. Chunks become leaves of a
//! binary SHA-256 tree whose root is the transaction's `data_root`.
//!
//! ```text
//! leaf   = H( H(chunk_hash) || H(note(max_byte_range)) )
//! branch = H( H(left) || H(right) || H(note(left.max_byte_range)) )
//! ```
//!
//! `note(n)` is `n` as a 32-byte big-endian integer. An odd node at the end
//! of a layer is promoted unchanged.

use hooverd_types::constants::{MAX_CHUNK_SIZE, MIN_CHUNK_SIZE, NOTE_SIZE};
use sha2::{Digest, Sha256};

type Hash = [u8; 32];

/// One chunk of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub data_hash: Hash,
    pub min_byte_range: usize,
    pub max_byte_range: usize,
}

#[derive(Debug, Clone)]
struct Node {
    id: Hash,
    max_byte_range: usize,
}

fn sha256(parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

fn note(value: usize) -> [u8; NOTE_SIZE] {
    let mut out = [0u8; NOTE_SIZE];
    let bytes = (value as u64).to_be_bytes();
    out[NOTE_SIZE - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Split `data` into chunks.
///
/// The final chunk is always emitted, even when empty (data whose length
/// is an exact multiple of `MAX_CHUNK_SIZE`); it still takes part in the
/// root.
pub fn chunk_data(data: &[u8]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut cursor = 0;

    while rest.len() >= MAX_CHUNK_SIZE {
        let mut chunk_size = MAX_CHUNK_SIZE;
        let next_chunk_size = rest.len() - MAX_CHUNK_SIZE;
        if next_chunk_size > 0 && next_chunk_size < MIN_CHUNK_SIZE {
            chunk_size = rest.len().div_ceil(2);
        }

        let (chunk, tail) = rest.split_at(chunk_size);
        chunks.push(Chunk {
            data_hash: sha256(&[chunk]),
            min_byte_range: cursor,
            max_byte_range: cursor + chunk.len(),
        });
        cursor += chunk.len();
        rest = tail;
    }

    chunks.push(Chunk {
        data_hash: sha256(&[rest]),
        min_byte_range: cursor,
        max_byte_range: cursor + rest.len(),
    });
    chunks
}

fn leaf(chunk: &Chunk) -> Node {
    Node {
        id: sha256(&[
            &sha256(&[&chunk.data_hash]),
            &sha256(&[&note(chunk.max_byte_range)]),
        ]),
        max_byte_range: chunk.max_byte_range,
    }
}

fn branch(left: &Node, right: &Node) -> Node {
    Node {
        id: sha256(&[
            &sha256(&[&left.id]),
            &sha256(&[&right.id]),
            &sha256(&[&note(left.max_byte_range)]),
        ]),
        max_byte_range: right.max_byte_range,
    }
}

/// Compute the data root of `data`. Empty data has an empty root.
pub fn data_root(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut layer: Vec<Node> = chunk_data(data).iter().map(leaf).collect();
    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => branch(left, right),
                [single] => single.clone(),
                _ => unreachable!("chunks(2) yields one or two nodes"),
            })
            .collect();
    }

    layer[0].id.to_vec()
}
