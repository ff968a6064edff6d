//! Hash primitives used for transaction ids and header hashes
//!
//! Every function here is pure: same bytes in, same digest out. Transaction
//! decoders receive their id function as a [`TxHashFn`] bound at construction
//! time; the id preimage is passed as a list of chunks so the decoder can hash
//! non-contiguous spans of the input buffer without concatenating them.

pub mod zip244;

use crate::error::{DecodeError, Result};
use crate::types::Hash;
use blake2::digest::{KeyInit, Mac};
use blake2::Blake2sMac256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Transaction id function over a chunked preimage
pub type TxHashFn = fn(&[&[u8]]) -> Hash;

/// SHA256(SHA256(chunks))
#[inline]
pub fn double_sha256_chunks(chunks: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    let first = hasher.finalize();
    Sha256::digest(first).into()
}

#[inline]
pub fn double_sha256(data: &[u8]) -> Hash {
    double_sha256_chunks(&[data])
}

/// Single-round SHA256 (Groestlcoin and SmartCash transaction ids)
#[inline]
pub fn sha256_chunks(chunks: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    hasher.finalize().into()
}

#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    sha256_chunks(&[data])
}

/// BLAKE-256 (the SHA-3 finalist, not BLAKE2), used by Decred
pub fn blake256_chunks(chunks: &[&[u8]]) -> Hash {
    use blake_hash::{Blake256, Digest as BlakeDigest};

    let mut hasher = <Blake256 as BlakeDigest>::new();
    for chunk in chunks {
        BlakeDigest::update(&mut hasher, chunk);
    }
    let digest = BlakeDigest::finalize(hasher);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

#[inline]
pub fn blake256(data: &[u8]) -> Hash {
    blake256_chunks(&[data])
}

/// BLAKE-256 applied twice
pub fn blake256d(data: &[u8]) -> Hash {
    blake256(&blake256(data))
}

/// Keccak-256 (pre-standard SHA-3 padding), used for SmartCash headers
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Trezarcoin header hash: keyed BLAKE2s-256
///
/// The key is assembled from the header's tail and merkle root prefix:
/// `header[58..80] ‖ header[36..46]`. The message is the header followed by
/// its 32-byte merkle root, 112 bytes for a standard header.
pub fn trezarcoin_header_hash(header: &[u8]) -> Result<Hash> {
    if header.len() < 80 {
        return Err(DecodeError::BufferUnderflow {
            offset: 0,
            needed: 80,
            remaining: header.len(),
        });
    }
    let mut key = [0u8; 32];
    key[..22].copy_from_slice(&header[58..80]);
    key[22..].copy_from_slice(&header[36..46]);

    let mut mac = <Blake2sMac256 as KeyInit>::new_from_slice(&key)
        .map_err(|_| DecodeError::Config("invalid BLAKE2s key length".into()))?;
    Mac::update(&mut mac, header);
    Mac::update(&mut mac, &header[36..68]);
    Ok(mac.finalize().into_bytes().into())
}

/// How a fork hashes its block headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderHash {
    DoubleSha256,
    Blake256,
    Keccak256,
    Blake2sKeyed,
}

impl HeaderHash {
    pub fn hash(self, header: &[u8]) -> Result<Hash> {
        match self {
            HeaderHash::DoubleSha256 => Ok(double_sha256(header)),
            HeaderHash::Blake256 => Ok(blake256(header)),
            HeaderHash::Keccak256 => Ok(keccak256(header)),
            HeaderHash::Blake2sKeyed => trezarcoin_header_hash(header),
        }
    }
}

/// Display form of a hash: byte-reversed hex
pub fn hash_to_hex_str(hash: &[u8]) -> String {
    let mut reversed = hash.to_vec();
    reversed.reverse();
    hex::encode(reversed)
}

/// Parse a display-form (byte-reversed) hex hash
pub fn hex_str_to_hash(s: &str) -> Result<Hash> {
    let mut bytes = hex::decode(s)
        .map_err(|e| DecodeError::Config(format!("invalid hex hash: {e}").into()))?;
    if bytes.len() != 32 {
        return Err(DecodeError::Config(
            format!("hash must be 32 bytes, got {}", bytes.len()).into(),
        ));
    }
    bytes.reverse();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}
