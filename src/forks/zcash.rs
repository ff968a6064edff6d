//! Zcash transactions (Sprout, Overwinter, Sapling, NU5)
//!
//! Only the transparent part is retained. Shielded sections are walked and
//! skipped so the cursor lands on the next transaction:
//!
//! | version | after locktime |
//! |---|---|
//! | 1-2 | JoinSplits (v2+) |
//! | 3 (Overwinter) | expiry, JoinSplits |
//! | 4 (Sapling) | expiry, valueBalance, spends, outputs, JoinSplits, bindingSig |
//!
//! Version 5 (ZIP-225) reorders the header and replaces the shielded layout
//! with Sapling and Orchard bundles. Its id is the ZIP-244 digest tree rather
//! than a hash of the raw bytes.

use crate::crypto::zip244::{self, V5Spans, ORCHARD_ACTION_SIZE, SAPLING_OUTPUT_SIZE, SAPLING_SPEND_SIZE};
use crate::crypto::double_sha256;
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::transaction::{
    bounded_capacity, read_inputs, read_output, read_outputs, TxDecoder, TxParts, MIN_OUTPUT_SIZE,
};
use crate::types::{LegacyTx, Transaction};

pub const OVERWINTER_VERSION_GROUP_ID: u32 = 0x03C4_8270;
pub const SAPLING_VERSION_GROUP_ID: u32 = 0x892F_2085;
pub const ZIP225_VERSION_GROUP_ID: u32 = 0x26A7_270A;

pub const OVERWINTER_TX_VERSION: u32 = 3;
pub const SAPLING_TX_VERSION: u32 = 4;
pub const ZIP225_TX_VERSION: u32 = 5;

const OVERWINTERED_BIT: u32 = 1 << 31;

/// Sapling v4 spend description
const SAPLING_V4_SPEND_SIZE: usize = 384;
/// Sapling v4 output description
const SAPLING_V4_OUTPUT_SIZE: usize = 948;
/// JoinSplit description without its proof
const JOINSPLIT_BASE_SIZE: usize = 1506;
const JOINSPLIT_GROTH_PROOF_SIZE: usize = 192;
const JOINSPLIT_PHGR_PROOF_SIZE: usize = 296;
const JOINSPLIT_PUBKEY_SIZE: u64 = 32;

const EXPIRY_SIZE: u64 = 4;
const VALUE_BALANCE_SIZE: usize = 8;
const ANCHOR_SIZE: usize = 32;
const GROTH_PROOF_SIZE: usize = 192;
const SIGNATURE_SIZE: usize = 64;
/// flags ‖ valueBalanceOrchard ‖ anchorOrchard
const ORCHARD_TAIL_SIZE: usize = 1 + VALUE_BALANCE_SIZE + ANCHOR_SIZE;

/// Parsed transaction header word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxHeader {
    pub overwintered: bool,
    pub version: u32,
    pub version_group_id: Option<u32>,
}

impl TxHeader {
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let header = cursor.read_u32_le()?;
        let overwintered = header & OVERWINTERED_BIT != 0;
        if overwintered {
            Ok(TxHeader {
                overwintered,
                version: header & !OVERWINTERED_BIT,
                version_group_id: Some(cursor.read_u32_le()?),
            })
        } else {
            Ok(TxHeader {
                overwintered,
                version: header,
                version_group_id: None,
            })
        }
    }

    pub fn is_zip225_v5(&self) -> bool {
        self.overwintered
            && self.version_group_id == Some(ZIP225_VERSION_GROUP_ID)
            && self.version == ZIP225_TX_VERSION
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ZcashDecoder;

impl ZcashDecoder {
    pub const fn new() -> Self {
        ZcashDecoder
    }

    /// Versions 1-4: transparent fields, then skip the shielded sections
    fn read_pre_v5(cursor: &mut ByteCursor<'_>, header: TxHeader) -> Result<LegacyTx> {
        let tx = LegacyTx {
            version: header.version as i32,
            inputs: read_inputs(cursor)?,
            outputs: read_outputs(cursor)?,
            locktime: cursor.read_u32_le()?,
        };

        let is_overwinter_v3 = header.version == OVERWINTER_TX_VERSION;
        let is_sapling_v4 = header.version == SAPLING_TX_VERSION;

        if is_overwinter_v3 || is_sapling_v4 {
            cursor.skip(EXPIRY_SIZE)?;
        }

        let mut has_shielded = false;
        if is_sapling_v4 {
            cursor.skip(VALUE_BALANCE_SIZE as u64)?;
            let spends = cursor.read_varint()?;
            cursor.skip_records(spends, SAPLING_V4_SPEND_SIZE)?;
            let outputs = cursor.read_varint()?;
            cursor.skip_records(outputs, SAPLING_V4_OUTPUT_SIZE)?;
            has_shielded = spends > 0 || outputs > 0;
        }

        if header.version >= 2 {
            let joinsplits = cursor.read_varint()?;
            if joinsplits > 0 {
                let proof = if is_sapling_v4 {
                    JOINSPLIT_GROTH_PROOF_SIZE
                } else {
                    JOINSPLIT_PHGR_PROOF_SIZE
                };
                cursor.skip_records(joinsplits, JOINSPLIT_BASE_SIZE + proof)?;
                cursor.skip(JOINSPLIT_PUBKEY_SIZE)?;
                cursor.skip(SIGNATURE_SIZE as u64)?;
            }
        }

        if is_sapling_v4 && has_shielded {
            cursor.skip(SIGNATURE_SIZE as u64)?;
        }

        Ok(tx)
    }

    /// Version 5: returns the transaction and its ZIP-244 id
    fn read_v5(cursor: &mut ByteCursor<'_>, start: usize, header: TxHeader) -> Result<(LegacyTx, [u8; 32])> {
        let branch_id = cursor.read_u32_le()?;
        let locktime = cursor.read_u32_le()?;
        cursor.skip(EXPIRY_SIZE)?;
        let header_span = cursor.span_from(start);

        let inputs = read_inputs(cursor)?;
        let output_count = cursor.read_varint()?;
        let outputs_start = cursor.position();
        let mut outputs =
            Vec::with_capacity(bounded_capacity(output_count, cursor.remaining(), MIN_OUTPUT_SIZE));
        for _ in 0..output_count {
            outputs.push(read_output(cursor)?);
        }
        let transparent_outputs = cursor.span_from(outputs_start);

        // Sapling bundle
        let n_spends = cursor.read_varint()?;
        let sapling_spends = cursor.read_records(n_spends, SAPLING_SPEND_SIZE)?;
        let n_outputs = cursor.read_varint()?;
        let sapling_outputs = cursor.read_records(n_outputs, SAPLING_OUTPUT_SIZE)?;
        let has_sapling = n_spends > 0 || n_outputs > 0;
        let sapling_value_balance = if has_sapling {
            cursor.read_bytes(VALUE_BALANCE_SIZE)?
        } else {
            &[]
        };
        let sapling_anchor = if n_spends > 0 {
            cursor.read_bytes(ANCHOR_SIZE)?
        } else {
            &[]
        };
        cursor.skip_records(n_spends, GROTH_PROOF_SIZE)?;
        cursor.skip_records(n_spends, SIGNATURE_SIZE)?;
        cursor.skip_records(n_outputs, GROTH_PROOF_SIZE)?;
        if has_sapling {
            cursor.skip(SIGNATURE_SIZE as u64)?;
        }

        // Orchard bundle
        let n_actions = cursor.read_varint()?;
        let orchard_actions = cursor.read_records(n_actions, ORCHARD_ACTION_SIZE)?;
        let orchard_tail = if n_actions > 0 {
            let tail = cursor.read_bytes(ORCHARD_TAIL_SIZE)?;
            let proofs_size = cursor.read_varint()?;
            cursor.skip(proofs_size)?;
            cursor.skip_records(n_actions, SIGNATURE_SIZE)?;
            cursor.skip(SIGNATURE_SIZE as u64)?;
            tail
        } else {
            &[]
        };

        let spans = V5Spans {
            header: header_span,
            branch_id,
            transparent_outputs,
            transparent_output_count: output_count,
            sapling_spends,
            sapling_outputs,
            sapling_value_balance,
            sapling_anchor,
            orchard_actions,
            orchard_tail,
        };
        let tx_hash = zip244::v5_txid(&spans, &inputs);
        let tx = LegacyTx {
            version: header.version as i32,
            inputs,
            outputs,
            locktime,
        };
        Ok((tx, tx_hash))
    }
}

impl TxDecoder for ZcashDecoder {
    fn name(&self) -> &'static str {
        "zcash"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let header = TxHeader::read(cursor)?;

        let (tx, tx_hash) = if header.is_zip225_v5() {
            Self::read_v5(cursor, start, header)?
        } else {
            let tx = Self::read_pre_v5(cursor, header)?;
            (tx, double_sha256(cursor.span_from(start)))
        };

        Ok(Outcome::Decoded(TxParts {
            tx: Transaction::Legacy(tx),
            tx_hash,
            vsize: (cursor.position() - start) as u64,
        }))
    }
}
