//! Zcoin (Firo) Sigma spends
//!
//! A Sigma spend input references no previous output; its script starts with
//! `OP_SIGMASPEND`. Such inputs are reported as generation inputs so that
//! nothing tries to resolve their outpoint.

use crate::constants::NULL_PREVOUT_INDEX;
use crate::crypto::TxHashFn;
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::opcodes::OP_SIGMASPEND;
use crate::transaction::{read_legacy_tx_with, read_standard_input, span_parts, TxDecoder, TxParts};
use crate::types::{OutPoint, Transaction, TxInput, ZERO_HASH};

pub fn is_sigma_spend(script: &[u8]) -> bool {
    script.first() == Some(&OP_SIGMASPEND)
}

pub fn read_zcoin_input(cursor: &mut ByteCursor<'_>) -> Result<TxInput> {
    let mut input = read_standard_input(cursor)?;
    if !input.prevout.is_null() && is_sigma_spend(&input.script) {
        input.prevout = OutPoint {
            hash: ZERO_HASH,
            index: NULL_PREVOUT_INDEX,
        };
    }
    Ok(TxInput::Standard(input))
}

#[derive(Debug, Clone, Copy)]
pub struct ZcoinDecoder {
    hash_fn: TxHashFn,
}

impl ZcoinDecoder {
    pub const fn new(hash_fn: TxHashFn) -> Self {
        ZcoinDecoder { hash_fn }
    }
}

impl TxDecoder for ZcoinDecoder {
    fn name(&self) -> &'static str {
        "zcoin"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let tx = Transaction::Legacy(read_legacy_tx_with(cursor, read_zcoin_input)?);
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{double_sha256, double_sha256_chunks};

    fn raw_with_script(script: &[u8]) -> Vec<u8> {
        let mut raw = vec![1, 0, 0, 0, 1];
        raw.extend_from_slice(&[0x5a; 32]);
        raw.extend_from_slice(&3u32.to_le_bytes());
        raw.push(script.len() as u8);
        raw.extend_from_slice(script);
        raw.extend_from_slice(&[0xff; 4]);
        raw.push(0);
        raw.extend_from_slice(&[0; 4]);
        raw
    }

    #[test]
    fn test_sigma_spend_becomes_generation() {
        let raw = raw_with_script(&[OP_SIGMASPEND, 0x01, 0x02]);
        let parts = ZcoinDecoder::new(double_sha256_chunks)
            .read_tx_parts(&mut ByteCursor::new(&raw))
            .unwrap()
            .decoded()
            .unwrap();
        let input = &parts.tx.inputs()[0];
        assert!(input.is_generation());
        assert_eq!(input.script(), &[OP_SIGMASPEND, 0x01, 0x02]);
        // id still covers the bytes on the wire
        assert_eq!(parts.tx_hash, double_sha256(&raw));
    }

    #[test]
    fn test_empty_script_is_not_sigma_spend() {
        let raw = raw_with_script(&[]);
        let tx = ZcoinDecoder::new(double_sha256_chunks)
            .read_tx(&mut ByteCursor::new(&raw))
            .unwrap()
            .decoded()
            .unwrap();
        assert!(!tx.inputs()[0].is_generation());
        assert_eq!(tx.inputs()[0].prevout().map(|p| p.index), Some(3));
    }
}
