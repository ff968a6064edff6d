//! SegWit (BIP144) layout and legacy/SegWit disambiguation
//!
//! A SegWit transaction inserts `marker:u8 = 0 ‖ flag:u8` after the fields
//! that precede the input count and appends one witness stack per input
//! before the locktime:
//!
//! ```text
//! version ‖ [fork prefix] ‖ 0x00 ‖ flag ‖ inputs ‖ outputs ‖ witness ‖ locktime
//! ```
//!
//! A legacy transaction always has at least one input, so its input-count
//! byte is non-zero; a zero byte at the marker position therefore selects the
//! extended layout. The id covers everything except marker, flag and witness
//! (`prefix ‖ inputs ‖ outputs ‖ locktime [‖ fork suffix]`).
//!
//! Forks compose these building blocks in their own decode functions instead
//! of overriding a shared template.

use crate::crypto::TxHashFn;
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::transaction::{read_inputs, read_legacy_tx, read_outputs, span_parts, TxDecoder, TxParts};
use crate::types::*;
use crate::witness::{calculate_vsize, read_witness};

/// Offset of the marker byte for layouts with only a version before the inputs
pub const DEFAULT_MARKER_OFFSET: usize = 4;

/// Whether the byte `marker_offset` bytes ahead of the cursor is the zero marker
#[inline]
pub fn has_witness_marker(cursor: &ByteCursor<'_>, marker_offset: usize) -> Result<bool> {
    Ok(cursor.peek_byte(marker_offset)? == 0)
}

/// Inputs and outputs of a witness transaction together with their raw span
///
/// The span length is the base size used for the virtual size.
#[derive(Debug)]
pub struct IoSection<'a> {
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub span: &'a [u8],
}

pub fn read_marker_flag(cursor: &mut ByteCursor<'_>) -> Result<(u8, u8)> {
    Ok((cursor.read_u8()?, cursor.read_u8()?))
}

pub fn read_io_section<'a>(cursor: &mut ByteCursor<'a>) -> Result<IoSection<'a>> {
    let start = cursor.position();
    let inputs = read_inputs(cursor)?;
    let outputs = read_outputs(cursor)?;
    Ok(IoSection {
        inputs,
        outputs,
        span: cursor.span_from(start),
    })
}

/// Spans of a witness transaction that feed its id
#[derive(Debug, Clone, Copy)]
pub struct IdSpans<'a> {
    /// Tx start up to (not including) the marker
    pub prefix: &'a [u8],
    /// Inputs and outputs
    pub io: &'a [u8],
    /// Position of the locktime; the id covers locktime up to the current position
    pub suffix_start: usize,
}

/// Finish a witness transaction: id over the non-witness spans, vsize over the whole
pub fn finish_witness_tx(
    cursor: &ByteCursor<'_>,
    start: usize,
    spans: IdSpans<'_>,
    tx: Transaction,
    hash_fn: TxHashFn,
) -> TxParts {
    let suffix = cursor.span_from(spans.suffix_start);
    let total_size = (cursor.position() - start) as u64;
    TxParts {
        tx,
        tx_hash: hash_fn(&[spans.prefix, spans.io, suffix]),
        vsize: calculate_vsize(spans.io.len() as u64, total_size),
    }
}

/// Standard SegWit layout with an injected id hash
///
/// Groestlcoin uses this layout with single SHA-256; the AuxPow, Equihash,
/// Xaya and BitcoinAtom families use it with double SHA-256.
#[derive(Debug, Clone, Copy)]
pub struct SegWitDecoder {
    name: &'static str,
    hash_fn: TxHashFn,
}

impl SegWitDecoder {
    pub const fn new(name: &'static str, hash_fn: TxHashFn) -> Self {
        SegWitDecoder { name, hash_fn }
    }
}

impl TxDecoder for SegWitDecoder {
    fn name(&self) -> &'static str {
        self.name
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
        let io = read_io_section(cursor)?;
        let witness = read_witness(cursor, io.inputs.len())?;
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
