//! Bitcoin Diamond
//!
//! Version-12 transactions carry a 32-byte preblock hash right after the
//! version. In the SegWit variant the marker therefore sits at offset 36 for
//! version 12 and at offset 4 otherwise.

use crate::crypto::TxHashFn;
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::segwit::{
    finish_witness_tx, has_witness_marker, read_io_section, read_marker_flag, IdSpans,
    DEFAULT_MARKER_OFFSET,
};
use crate::transaction::{read_inputs, read_legacy_tx, read_outputs, span_parts, TxDecoder, TxParts};
use crate::types::{BitcoinDiamondSegWitTx, BitcoinDiamondTx, SegWitTx, Transaction};
use crate::witness::read_witness;

pub const BITCOIN_DIAMOND_TX_VERSION: i32 = 12;

const PREBLOCKHASH_SIZE: usize = 32;

pub fn read_diamond_tx(cursor: &mut ByteCursor<'_>) -> Result<Transaction> {
    if cursor.peek_i32_le()? != BITCOIN_DIAMOND_TX_VERSION {
        return Ok(Transaction::Legacy(read_legacy_tx(cursor)?));
    }
    Ok(Transaction::BitcoinDiamond(BitcoinDiamondTx {
        version: cursor.read_i32_le()?,
        preblockhash: cursor.read_hash()?,
        inputs: read_inputs(cursor)?,
        outputs: read_outputs(cursor)?,
        locktime: cursor.read_u32_le()?,
    }))
}

#[derive(Debug, Clone, Copy)]
pub struct BitcoinDiamondDecoder {
    hash_fn: TxHashFn,
}

impl BitcoinDiamondDecoder {
    pub const fn new(hash_fn: TxHashFn) -> Self {
        BitcoinDiamondDecoder { hash_fn }
    }
}

impl TxDecoder for BitcoinDiamondDecoder {
    fn name(&self) -> &'static str {
        "bitcoin-diamond"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let tx = read_diamond_tx(cursor)?;
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BitcoinDiamondSegWitDecoder {
    hash_fn: TxHashFn,
}

impl BitcoinDiamondSegWitDecoder {
    pub const fn new(hash_fn: TxHashFn) -> Self {
        BitcoinDiamondSegWitDecoder { hash_fn }
    }
}

impl TxDecoder for BitcoinDiamondSegWitDecoder {
    fn name(&self) -> &'static str {
        "bitcoin-diamond-segwit"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let is_diamond = cursor.peek_i32_le()? == BITCOIN_DIAMOND_TX_VERSION;
        let marker_offset = if is_diamond {
            DEFAULT_MARKER_OFFSET + PREBLOCKHASH_SIZE
        } else {
            DEFAULT_MARKER_OFFSET
        };
        if !has_witness_marker(cursor, marker_offset)? {
            let tx = read_diamond_tx(cursor)?;
            return Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)));
        }

        let version = cursor.read_i32_le()?;
        let preblockhash = if is_diamond {
            Some(cursor.read_hash()?)
        } else {
            None
        };
        let prefix = cursor.span_from(start);
        let (marker, flag) = read_marker_flag(cursor)?;
        let io = read_io_section(cursor)?;
        let witness = read_witness(cursor, io.inputs.len())?;
        let suffix_start = cursor.position();
        let locktime = cursor.read_u32_le()?;

        let spans = IdSpans {
            prefix,
            io: io.span,
            suffix_start,
        };
        let tx = match preblockhash {
            Some(preblockhash) => Transaction::BitcoinDiamondSegWit(BitcoinDiamondSegWitTx {
                version,
                preblockhash,
                marker,
                flag,
                inputs: io.inputs,
                outputs: io.outputs,
                witness,
                locktime,
            }),
            None => Transaction::SegWit(SegWitTx {
                version,
                marker,
                flag,
                inputs: io.inputs,
                outputs: io.outputs,
                witness,
                locktime,
            }),
        };
        Ok(Outcome::Decoded(finish_witness_tx(
            cursor,
            start,
            spans,
            tx,
            self.hash_fn,
        )))
    }
}
