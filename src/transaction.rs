//! Transaction decoding core
//!
//! Defines the [`TxDecoder`] contract every fork implements, the shared
//! readers for standard inputs and outputs, and the base legacy layout:
//!
//! ```text
//! version:i32 ‖ varint n ‖ n × input ‖ varint m ‖ m × output ‖ locktime:u32
//! input  = prev_hash[32] ‖ prev_idx:u32 ‖ varbytes script ‖ sequence:u32
//! output = value:i64 ‖ varbytes pk_script
//! ```
//!
//! Decoders are stateless: all position state lives in the [`ByteCursor`]
//! the caller passes in, so one decoder instance can serve any number of
//! threads.

use crate::crypto::TxHashFn;
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::types::*;

/// Smallest possible standard input: 32 + 4 + 1 + 4
pub const MIN_INPUT_SIZE: usize = 41;
/// Smallest possible standard output: 8 + 1
pub const MIN_OUTPUT_SIZE: usize = 9;

/// A decoded transaction with its id and virtual size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxParts {
    pub tx: Transaction,
    /// Raw digest in wire byte order
    pub tx_hash: Hash,
    pub vsize: u64,
}

/// Decoder for one fork's transaction layout
pub trait TxDecoder: Send + Sync {
    /// Short identifier of the layout, used in log output
    fn name(&self) -> &'static str;

    /// Decode one transaction starting at the cursor's position
    ///
    /// On success the cursor sits on the first byte after the transaction.
    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>>;

    fn read_tx(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<Transaction>> {
        Ok(self.read_tx_parts(cursor)?.map(|parts| parts.tx))
    }

    fn read_tx_and_hash(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<(Transaction, Hash)>> {
        Ok(self
            .read_tx_parts(cursor)?
            .map(|parts| (parts.tx, parts.tx_hash)))
    }

    fn read_tx_and_vsize(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<(Transaction, u64)>> {
        Ok(self
            .read_tx_parts(cursor)?
            .map(|parts| (parts.tx, parts.vsize)))
    }

    /// Decode a block's transaction list: varint count, then that many transactions
    fn read_tx_block(&self, cursor: &mut ByteCursor<'_>) -> Result<Vec<(Transaction, Hash)>> {
        crate::block::read_tx_list(self, cursor)
    }
}

/// Capacity to reserve for `count` records read off the wire
///
/// Never more than the remaining bytes could hold, so a forged count cannot
/// force a huge allocation before the reads fail.
#[inline]
pub(crate) fn bounded_capacity(count: u64, remaining: usize, min_record_size: usize) -> usize {
    let max_records = remaining / min_record_size.max(1);
    count.min(max_records as u64) as usize
}

pub fn read_outpoint(cursor: &mut ByteCursor<'_>) -> Result<OutPoint> {
    Ok(OutPoint {
        hash: cursor.read_hash()?,
        index: cursor.read_u32_le()?,
    })
}

pub fn read_standard_input(cursor: &mut ByteCursor<'_>) -> Result<StandardInput> {
    Ok(StandardInput {
        prevout: read_outpoint(cursor)?,
        script: cursor.read_varbytes()?.to_vec(),
        sequence: cursor.read_u32_le()?,
    })
}

pub fn read_input(cursor: &mut ByteCursor<'_>) -> Result<TxInput> {
    read_standard_input(cursor).map(TxInput::Standard)
}

pub fn read_output(cursor: &mut ByteCursor<'_>) -> Result<TxOutput> {
    Ok(TxOutput::Standard(StandardOutput {
        value: cursor.read_i64_le()?,
        pk_script: cursor.read_varbytes()?.to_vec(),
    }))
}

/// Varint-counted list of inputs, each decoded by `read_one`
pub fn read_inputs_with<F>(cursor: &mut ByteCursor<'_>, mut read_one: F) -> Result<Vec<TxInput>>
where
    F: FnMut(&mut ByteCursor<'_>) -> Result<TxInput>,
{
    let count = cursor.read_varint()?;
    let mut inputs = Vec::with_capacity(bounded_capacity(count, cursor.remaining(), MIN_INPUT_SIZE));
    for _ in 0..count {
        inputs.push(read_one(cursor)?);
    }
    Ok(inputs)
}

pub fn read_inputs(cursor: &mut ByteCursor<'_>) -> Result<Vec<TxInput>> {
    read_inputs_with(cursor, read_input)
}

/// Varint-counted list of outputs, each decoded by `read_one`
pub fn read_outputs_with<F>(cursor: &mut ByteCursor<'_>, mut read_one: F) -> Result<Vec<TxOutput>>
where
    F: FnMut(&mut ByteCursor<'_>) -> Result<TxOutput>,
{
    let count = cursor.read_varint()?;
    let mut outputs =
        Vec::with_capacity(bounded_capacity(count, cursor.remaining(), MIN_OUTPUT_SIZE));
    for _ in 0..count {
        outputs.push(read_one(cursor)?);
    }
    Ok(outputs)
}

pub fn read_outputs(cursor: &mut ByteCursor<'_>) -> Result<Vec<TxOutput>> {
    read_outputs_with(cursor, read_output)
}

/// Base legacy layout with a custom input reader
pub fn read_legacy_tx_with<F>(cursor: &mut ByteCursor<'_>, read_one: F) -> Result<LegacyTx>
where
    F: FnMut(&mut ByteCursor<'_>) -> Result<TxInput>,
{
    Ok(LegacyTx {
        version: cursor.read_i32_le()?,
        inputs: read_inputs_with(cursor, read_one)?,
        outputs: read_outputs(cursor)?,
        locktime: cursor.read_u32_le()?,
    })
}

pub fn read_legacy_tx(cursor: &mut ByteCursor<'_>) -> Result<LegacyTx> {
    read_legacy_tx_with(cursor, read_input)
}

/// Parts for a layout whose id covers exactly the bytes it consumed
///
/// The reported size of such a transaction is its byte length.
pub(crate) fn span_parts(
    cursor: &ByteCursor<'_>,
    start: usize,
    tx: Transaction,
    hash_fn: TxHashFn,
) -> TxParts {
    let span = cursor.span_from(start);
    TxParts {
        tx,
        tx_hash: hash_fn(&[span]),
        vsize: span.len() as u64,
    }
}

/// Plain legacy layout, no SegWit disambiguation
///
/// Also serves the forks whose transactions are plain legacy but whose ids
/// use a different hash (SmartCash: single SHA-256).
#[derive(Debug, Clone, Copy)]
pub struct LegacyDecoder {
    name: &'static str,
    hash_fn: TxHashFn,
}

impl LegacyDecoder {
    pub const fn new(name: &'static str, hash_fn: TxHashFn) -> Self {
        LegacyDecoder { name, hash_fn }
    }
}

impl TxDecoder for LegacyDecoder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let tx = Transaction::Legacy(read_legacy_tx(cursor)?);
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}
