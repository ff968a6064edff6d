//! Block body wire format serialization
//!
//! A block body is a varint transaction count followed by the transactions.
//! Decred blocks carry two such lists back to back (regular, then stake).

use super::transaction::serialize_transaction;
use super::varint::write_varint;
use crate::types::Transaction;

/// Serialize a varint-counted transaction list
pub fn serialize_tx_list(txs: &[Transaction]) -> Vec<u8> {
    let mut out = Vec::new();
    write_varint(&mut out, txs.len() as u64);
    for tx in txs {
        out.extend_from_slice(&serialize_transaction(tx));
    }
    out
}

/// Serialize a raw header followed by its transaction list
pub fn serialize_block(header: &[u8], txs: &[Transaction]) -> Vec<u8> {
    let mut out = header.to_vec();
    out.extend_from_slice(&serialize_tx_list(txs));
    out
}
