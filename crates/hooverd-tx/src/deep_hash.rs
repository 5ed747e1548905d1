//! Deep hash.
//!
//! Structured SHA-384 hash used as the transaction signature payload. Blobs
//! and lists are tagged with their kind and length so that no two distinct
//! structures hash alike.
//!
//! ```text
//! blob(b)  = H( H("blob" || len(b)) || H(b) )
//! list(xs) = fold(H("list" || len(xs)), |acc, x| H(acc || deep_hash(x)))
//! ```
//!
//! Lengths are rendered as decimal ASCII.

use sha2::{Digest, Sha384};

/// Output size of the deep hash.
pub const DEEP_HASH_SIZE: usize = 48;

/// A node in a deep-hash structure.
#[derive(Debug, Clone)]
pub enum DeepHashItem<'a> {
    Blob(&'a [u8]),
    List(Vec<DeepHashItem<'a>>),
}

fn sha384(parts: &[&[u8]]) -> [u8; DEEP_HASH_SIZE] {
    let mut hasher = Sha384::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute the deep hash of `item`.
pub fn deep_hash(item: &DeepHashItem<'_>) -> [u8; DEEP_HASH_SIZE] {
    match item {
        DeepHashItem::Blob(data) => {
            let tag = format!("blob{}", data.len());
            let tagged = sha384(&[tag.as_bytes()]);
            let body = sha384(&[*data]);
            sha384(&[&tagged, &body])
        }
        DeepHashItem::List(items) => {
            let tag = format!("list{}", items.len());
            items.iter().fold(sha384(&[tag.as_bytes()]), |acc, child| {
                sha384(&[&acc, &deep_hash(child)])
            })
        }
    }
}
