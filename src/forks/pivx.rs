//! PIVX transactions
//!
//! The 32-bit header packs `version` in the low half and a special
//! transaction `type` in the high half. Version 3 and later append a Sapling
//! section (and a payload length for special transactions) after the locktime;
//! those bytes are skipped.

use crate::crypto::{double_sha256_chunks, TxHashFn};
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::transaction::{read_inputs, read_outputs, span_parts, TxDecoder, TxParts};
use crate::types::{PivxTx, Transaction};

pub const SAPLING_VERSION: u32 = 3;

const VALUE_BALANCE_SIZE: u64 = 8;
const SPEND_DESCRIPTION_SIZE: usize = 384;
const OUTPUT_DESCRIPTION_SIZE: usize = 948;
const BINDING_SIG_SIZE: u64 = 64;
const EXTRA_PAYLOAD_SIZE: u64 = 2;

/// Split the header into `(version, txtype)`
///
/// A non-zero type with a pre-Sapling version means the high bits were part
/// of a legacy version number.
pub fn split_header(header: u32) -> (u32, u16) {
    let txtype = (header >> 16) as u16;
    if txtype == 0 {
        return (header, 0);
    }
    let version = header & 0xffff;
    if version < SAPLING_VERSION {
        (header, 0)
    } else {
        (version, txtype)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PivxDecoder {
    hash_fn: TxHashFn,
}

impl PivxDecoder {
    pub const fn new() -> Self {
        PivxDecoder {
            hash_fn: double_sha256_chunks,
        }
    }
}

impl Default for PivxDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn skip_sapling_section(cursor: &mut ByteCursor<'_>, txtype: u16) -> Result<()> {
    // Option<SaplingTxData> presence byte
    cursor.read_varint()?;
    cursor.skip(VALUE_BALANCE_SIZE)?;
    let spends = cursor.read_varint()?;
    cursor.skip_records(spends, SPEND_DESCRIPTION_SIZE)?;
    let outputs = cursor.read_varint()?;
    cursor.skip_records(outputs, OUTPUT_DESCRIPTION_SIZE)?;
    cursor.skip(BINDING_SIG_SIZE)?;
    if txtype > 0 {
        cursor.skip(EXTRA_PAYLOAD_SIZE)?;
    }
    Ok(())
}

impl TxDecoder for PivxDecoder {
    fn name(&self) -> &'static str {
        "pivx"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let (version, txtype) = split_header(cursor.read_u32_le()?);
        let inputs = read_inputs(cursor)?;
        let outputs = read_outputs(cursor)?;
        let locktime = cursor.read_u32_le()?;

        if version >= SAPLING_VERSION {
            skip_sapling_section(cursor, txtype)?;
        }

        let tx = Transaction::Pivx(PivxTx {
            version,
            txtype,
            inputs,
            outputs,
            locktime,
        });
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}
