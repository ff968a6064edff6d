//! Layouts carrying a transaction time
//!
//! Peercoin-derived chains insert `time:u32` after the version:
//!
//! ```text
//! version:i32 ‖ time:u32 ‖ inputs ‖ outputs ‖ locktime:u32
//! ```
//!
//! Several forks gate that field on the version or add trailing fields, and
//! the SegWit variants move the marker to offset 8. Trailing fields are kept
//! raw in `trailer` so the transaction re-encodes as it was read.

use crate::crypto::TxHashFn;
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::segwit::{finish_witness_tx, has_witness_marker, read_io_section, read_marker_flag, IdSpans};
use crate::transaction::{read_inputs, read_legacy_tx, read_outputs, span_parts, TxDecoder, TxParts};
use crate::types::{TimePlacement, TimeStampedSegWitTx, TimeStampedTx, Transaction, TrezarcoinTx};
use crate::witness::read_witness;

/// Marker offset when a time field follows the version
pub const TIME_MARKER_OFFSET: usize = 8;

/// ECCoin appends a 32-byte service reference from version 2
const ECCOIN_SERVICE_REFERENCE_SIZE: usize = 32;

pub fn read_time_stamped_tx(cursor: &mut ByteCursor<'_>) -> Result<TimeStampedTx> {
    Ok(TimeStampedTx {
        version: cursor.read_i32_le()?,
        time: cursor.read_u32_le()?,
        time_placement: TimePlacement::AfterVersion,
        inputs: read_inputs(cursor)?,
        outputs: read_outputs(cursor)?,
        locktime: cursor.read_u32_le()?,
        trailer: Vec::new(),
    })
}

/// NavCoin's `strDZeel`, present from version 2, with its length prefix
fn read_dzeel(cursor: &mut ByteCursor<'_>, version: i32) -> Result<Vec<u8>> {
    if version < 2 {
        return Ok(Vec::new());
    }
    let start = cursor.position();
    cursor.read_varbytes()?;
    Ok(cursor.span_from(start).to_vec())
}

/// Time-stamped layout without SegWit (TxTime, Verge)
#[derive(Debug, Clone, Copy)]
pub struct TimeStampedDecoder {
    name: &'static str,
    hash_fn: TxHashFn,
}

impl TimeStampedDecoder {
    pub const fn new(name: &'static str, hash_fn: TxHashFn) -> Self {
        TimeStampedDecoder { name, hash_fn }
    }
}

impl TxDecoder for TimeStampedDecoder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let tx = Transaction::TimeStamped(read_time_stamped_tx(cursor)?);
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}

/// Time-stamped layout with optional SegWit (TxTimeSegWit, Emercoin, NavCoin)
#[derive(Debug, Clone, Copy)]
pub struct TimeStampedSegWitDecoder {
    name: &'static str,
    hash_fn: TxHashFn,
    dzeel: bool,
}

impl TimeStampedSegWitDecoder {
    pub const fn new(name: &'static str, hash_fn: TxHashFn) -> Self {
        TimeStampedSegWitDecoder {
            name,
            hash_fn,
            dzeel: false,
        }
    }

    /// NavCoin: a `strDZeel` varbytes follows the locktime from version 2
    pub const fn with_dzeel(name: &'static str, hash_fn: TxHashFn) -> Self {
        TimeStampedSegWitDecoder {
            name,
            hash_fn,
            dzeel: true,
        }
    }
}

impl TxDecoder for TimeStampedSegWitDecoder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        if !has_witness_marker(cursor, TIME_MARKER_OFFSET)? {
            let mut tx = read_time_stamped_tx(cursor)?;
            if self.dzeel {
                tx.trailer = read_dzeel(cursor, tx.version)?;
            }
            let tx = Transaction::TimeStamped(tx);
            return Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)));
        }

        let version = cursor.read_i32_le()?;
        let time = cursor.read_u32_le()?;
        let prefix = cursor.span_from(start);
        let (marker, flag) = read_marker_flag(cursor)?;
        let io = read_io_section(cursor)?;
        let witness = read_witness(cursor, io.inputs.len())?;
        let suffix_start = cursor.position();
        let locktime = cursor.read_u32_le()?;
        let trailer = if self.dzeel {
            read_dzeel(cursor, version)?
        } else {
            Vec::new()
        };

        let spans = IdSpans {
            prefix,
            io: io.span,
            suffix_start,
        };
        let tx = Transaction::TimeStampedSegWit(TimeStampedSegWitTx {
            version,
            time,
            marker,
            flag,
            inputs: io.inputs,
            outputs: io.outputs,
            witness,
            locktime,
            trailer,
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

/// Trezarcoin: time-stamped with a transaction comment from version 2
#[derive(Debug, Clone, Copy)]
pub struct TrezarcoinDecoder {
    hash_fn: TxHashFn,
}

impl TrezarcoinDecoder {
    pub const fn new(hash_fn: TxHashFn) -> Self {
        TrezarcoinDecoder { hash_fn }
    }
}

impl TxDecoder for TrezarcoinDecoder {
    fn name(&self) -> &'static str {
        "trezarcoin"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let TimeStampedTx {
            version,
            time,
            inputs,
            outputs,
            locktime,
            ..
        } = read_time_stamped_tx(cursor)?;
        let txcomment = if version >= 2 {
            cursor.read_varbytes()?.to_vec()
        } else {
            Vec::new()
        };
        let tx = Transaction::Trezarcoin(TrezarcoinTx {
            version,
            time,
            inputs,
            outputs,
            locktime,
            txcomment,
        });
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}

/// Reddcoin: legacy fields, then the time after the locktime from version 2
#[derive(Debug, Clone, Copy)]
pub struct ReddcoinDecoder {
    hash_fn: TxHashFn,
}

impl ReddcoinDecoder {
    pub const fn new(hash_fn: TxHashFn) -> Self {
        ReddcoinDecoder { hash_fn }
    }
}

impl TxDecoder for ReddcoinDecoder {
    fn name(&self) -> &'static str {
        "reddcoin"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let legacy = read_legacy_tx(cursor)?;
        let (time, time_placement) = if legacy.version > 1 {
            (cursor.read_u32_le()?, TimePlacement::AfterLocktime)
        } else {
            (0, TimePlacement::Absent)
        };
        let tx = Transaction::TimeStamped(TimeStampedTx {
            version: legacy.version,
            time,
            time_placement,
            inputs: legacy.inputs,
            outputs: legacy.outputs,
            locktime: legacy.locktime,
            trailer: Vec::new(),
        });
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}

/// ECCoin: time-stamped, then a 32-byte service reference from version 2
#[derive(Debug, Clone, Copy)]
pub struct EccoinDecoder {
    hash_fn: TxHashFn,
}

impl EccoinDecoder {
    pub const fn new(hash_fn: TxHashFn) -> Self {
        EccoinDecoder { hash_fn }
    }
}

impl TxDecoder for EccoinDecoder {
    fn name(&self) -> &'static str {
        "eccoin"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let mut tx = read_time_stamped_tx(cursor)?;
        if tx.version > 1 {
            tx.trailer = cursor.read_bytes(ECCOIN_SERVICE_REFERENCE_SIZE)?.to_vec();
        }
        let tx = Transaction::TimeStamped(tx);
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}

/// Which versions carry the time field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionGate {
    /// Time-stamped below this version (Blackcoin 2, Simplicity 3)
    Below(i32),
    /// Time-stamped for every version except this one (Electra 7)
    AllExcept(i32),
}

impl VersionGate {
    pub fn is_time_stamped(self, version: i32) -> bool {
        match self {
            VersionGate::Below(limit) => version < limit,
            VersionGate::AllExcept(plain) => version != plain,
        }
    }
}

/// Chains that dropped the time field at a version boundary
#[derive(Debug, Clone, Copy)]
pub struct VersionGatedDecoder {
    name: &'static str,
    hash_fn: TxHashFn,
    gate: VersionGate,
}

impl VersionGatedDecoder {
    pub const fn new(name: &'static str, hash_fn: TxHashFn, gate: VersionGate) -> Self {
        VersionGatedDecoder {
            name,
            hash_fn,
            gate,
        }
    }
}

impl TxDecoder for VersionGatedDecoder {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let tx = if self.gate.is_time_stamped(cursor.peek_i32_le()?) {
            Transaction::TimeStamped(read_time_stamped_tx(cursor)?)
        } else {
            Transaction::Legacy(read_legacy_tx(cursor)?)
        };
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}
