//! Litecoin transactions with MimbleWimble extension block (MWEB) flags
//!
//! Litecoin extends the SegWit flag byte:
//! - bit 0: witness data follows the outputs;
//! - bit 3: an MWEB payload follows the witness data.
//!
//! Inside a regular block the only MWEB-flagged transaction is the
//! integration ("HogEx") transaction whose payload is a single zero byte.
//! Anything else is mempool-only data that cannot be located without parsing
//! the MWEB payload, and is skipped:
//! - a zero flag: the marker/flag pair was really two zero counts of a
//!   stripped MWEB-only transaction;
//! - an MWEB payload that is not the null byte.

use crate::crypto::{double_sha256_chunks, TxHashFn};
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result, SkipReason};
use crate::segwit::{
    finish_witness_tx, has_witness_marker, read_io_section, read_marker_flag, IdSpans,
    DEFAULT_MARKER_OFFSET,
};
use crate::transaction::{read_legacy_tx, span_parts, TxDecoder, TxParts};
use crate::types::{SegWitTx, Transaction};
use crate::witness::read_witness;
use tracing::debug;

pub const FLAG_WITNESS: u8 = 0x01;
pub const FLAG_MWEB: u8 = 0x08;

#[derive(Debug, Clone, Copy)]
pub struct LitecoinDecoder {
    hash_fn: TxHashFn,
}

impl LitecoinDecoder {
    pub const fn new() -> Self {
        LitecoinDecoder {
            hash_fn: double_sha256_chunks,
        }
    }
}

impl Default for LitecoinDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxDecoder for LitecoinDecoder {
    fn name(&self) -> &'static str {
        "litecoin"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        if !has_witness_marker(cursor, DEFAULT_MARKER_OFFSET)? {
            let tx = Transaction::Legacy(read_legacy_tx(cursor)?);
            return Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)));
        }

        let version = cursor.read_i32_le()?;
        let prefix = cursor.span_from(start);
        let (marker, flag) = read_marker_flag(cursor)?;
        if flag == 0 {
            debug!(offset = start, "skipping MWEB-only transaction without regular inputs or outputs");
            return Ok(Outcome::Skip(SkipReason::MwebOnlyNoRegularIo));
        }

        let io = read_io_section(cursor)?;
        let witness = if flag & FLAG_WITNESS != 0 {
            read_witness(cursor, io.inputs.len())?
        } else {
            debug!(offset = start, flag, "extended transaction without witness bit");
            Vec::new()
        };

        if flag & FLAG_MWEB != 0 && cursor.read_u8()? != 0 {
            debug!(offset = start, "skipping transaction with non-null MWEB payload");
            return Ok(Outcome::Skip(SkipReason::NonNullMwebPayload));
        }

        let suffix_start = cursor.position();
        let locktime = cursor.read_u32_le()?;
        let spans = IdSpans {
            prefix,
            io: io.span,
            suffix_start,
        };
        let tx = Transaction::SegWit(SegWitTx {
            version,
            marker,
            flag,
            inputs: io.inputs,
            outputs: io.outputs,
            witness,
            locktime,
        });
        Ok(Outcome::Decoded(finish_witness_tx(
            cursor,
            start,
            spans,
            tx,
            self.hash_fn,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::double_sha256;

    fn extended(flag: u8, tail: &[u8]) -> Vec<u8> {
        let mut raw = vec![2, 0, 0, 0, 0, flag];
        raw.push(1);
        raw.extend_from_slice(&[0x33; 36]);
        raw.extend_from_slice(&[0, 0xff, 0xff, 0xff, 0xff]);
        raw.push(1);
        raw.extend_from_slice(&1000i64.to_le_bytes());
        raw.extend_from_slice(&[1, 0x51]);
        raw.extend_from_slice(tail);
        raw
    }

    #[test]
    fn test_zero_flag_is_skipped() {
        let raw = [2u8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let outcome = LitecoinDecoder::new()
            .read_tx(&mut ByteCursor::new(&raw))
            .unwrap();
        assert_eq!(outcome, Outcome::Skip(SkipReason::MwebOnlyNoRegularIo));
    }

    #[test]
    fn test_non_null_mweb_payload_is_skipped() {
        // flag 0x08, no witness, MWEB byte 0x01
        let raw = extended(FLAG_MWEB, &[0x01, 0, 0, 0, 0]);
        let outcome = LitecoinDecoder::new()
            .read_tx(&mut ByteCursor::new(&raw))
            .unwrap();
        assert_eq!(outcome, Outcome::Skip(SkipReason::NonNullMwebPayload));
    }

    #[test]
    fn test_hogex_null_payload_decodes() {
        // flag 0x09: one empty witness stack, MWEB byte 0x00, locktime
        let raw = extended(FLAG_WITNESS | FLAG_MWEB, &[0x00, 0x00, 7, 0, 0, 0]);
        let mut cursor = ByteCursor::new(&raw);
        let parts = LitecoinDecoder::new()
            .read_tx_parts(&mut cursor)
            .unwrap()
            .decoded()
            .unwrap();
        assert!(cursor.is_at_end());
        match &parts.tx {
            Transaction::SegWit(tx) => {
                assert_eq!(tx.flag, 0x09);
                assert_eq!(tx.witness, vec![Vec::<Vec<u8>>::new()]);
                assert_eq!(tx.locktime, 7);
            }
            other => panic!("unexpected variant {}", other.kind()),
        }

        // id covers version, inputs, outputs, locktime
        let mut preimage = raw[..4].to_vec();
        preimage.extend_from_slice(&raw[6..6 + 1 + 41 + 1 + 10]);
        preimage.extend_from_slice(&[7, 0, 0, 0]);
        assert_eq!(parts.tx_hash, double_sha256(&preimage));
    }

    #[test]
    fn test_flag_without_witness_bit_has_empty_witness() {
        let raw = extended(0x02, &[0, 0, 0, 0]);
        let tx = LitecoinDecoder::new()
            .read_tx(&mut ByteCursor::new(&raw))
            .unwrap()
            .decoded()
            .unwrap();
        assert_eq!(tx.witness(), Some(&[][..]));
    }
}
