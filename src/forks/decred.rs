//! Decred transactions
//!
//! Decred splits a transaction into a prefix and a witness section:
//!
//! ```text
//! version:i32 ‖ inputs ‖ outputs ‖ locktime:u32 ‖ expiry:u32      (prefix)
//! varint n ‖ n × (value_in:i64 ‖ height:u32 ‖ index:u32 ‖ script)  (witness)
//! input  = prev_hash[32] ‖ prev_idx:u32 ‖ tree:u8 ‖ sequence:u32
//! output = value:i64 ‖ script_version:u16 ‖ varbytes pk_script
//! ```
//!
//! The id is BLAKE-256 of the prefix serialized with the "no witness"
//! serialization type in the upper half of the version word. A block carries
//! a regular transaction tree followed by a stake tree.

use crate::block::read_tx_list;
use crate::crypto::blake256_chunks;
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Outcome, Result};
use crate::transaction::{
    bounded_capacity, read_inputs_with, read_outpoint, read_outputs_with, TxDecoder, TxParts,
};
use crate::types::{
    DecredInput, DecredOutput, DecredTx, DecredWitness, Hash, Transaction, TxInput, TxOutput,
};

/// Serialization type "prefix only", shifted into the upper 16 bits
pub const TX_SERIALIZE_NO_WITNESS: u32 = 1 << 16;

/// value_in, block height, block index and an empty script
const MIN_WITNESS_SIZE: usize = 8 + 4 + 4 + 1;

pub fn read_decred_input(cursor: &mut ByteCursor<'_>) -> Result<TxInput> {
    Ok(TxInput::Decred(DecredInput {
        prevout: read_outpoint(cursor)?,
        tree: cursor.read_u8()?,
        sequence: cursor.read_u32_le()?,
    }))
}

pub fn read_decred_output(cursor: &mut ByteCursor<'_>) -> Result<TxOutput> {
    Ok(TxOutput::Decred(DecredOutput {
        value: cursor.read_i64_le()?,
        version: cursor.read_u16_le()?,
        pk_script: cursor.read_varbytes()?.to_vec(),
    }))
}

fn read_witness_record(cursor: &mut ByteCursor<'_>) -> Result<DecredWitness> {
    Ok(DecredWitness {
        value_in: cursor.read_i64_le()?,
        block_height: cursor.read_u32_le()?,
        block_index: cursor.read_u32_le()?,
        script: cursor.read_varbytes()?.to_vec(),
    })
}

/// Witness section; its count must match the input count
fn read_decred_witness(cursor: &mut ByteCursor<'_>, input_count: usize) -> Result<Vec<DecredWitness>> {
    let count = cursor.read_varint()?;
    if count != input_count as u64 {
        return Err(DecodeError::WitnessCountMismatch {
            inputs: input_count,
            witnesses: count,
        });
    }
    let mut witness =
        Vec::with_capacity(bounded_capacity(count, cursor.remaining(), MIN_WITNESS_SIZE));
    for _ in 0..count {
        witness.push(read_witness_record(cursor)?);
    }
    Ok(witness)
}

/// Prefix hash: the version word is rewritten with the no-witness serialization type
pub fn prefix_hash(version: i32, prefix_after_version: &[u8]) -> Hash {
    let header = TX_SERIALIZE_NO_WITNESS | (version as u32 & 0xffff);
    blake256_chunks(&[&header.to_le_bytes(), prefix_after_version])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecredDecoder;

impl DecredDecoder {
    pub const fn new() -> Self {
        DecredDecoder
    }

    /// One transaction tree without ids
    pub fn read_tx_tree(&self, cursor: &mut ByteCursor<'_>) -> Result<Vec<Transaction>> {
        Ok(read_tx_list(self, cursor)?
            .into_iter()
            .map(|(tx, _)| tx)
            .collect())
    }
}

impl TxDecoder for DecredDecoder {
    fn name(&self) -> &'static str {
        "decred"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let version = cursor.read_i32_le()?;
        let inputs = read_inputs_with(cursor, read_decred_input)?;
        let outputs = read_outputs_with(cursor, read_decred_output)?;
        let locktime = cursor.read_u32_le()?;
        let expiry = cursor.read_u32_le()?;
        let prefix = cursor.span_from(start + 4);
        let witness = read_decred_witness(cursor, inputs.len())?;

        let tx_hash = prefix_hash(version, prefix);
        let tx = Transaction::Decred(DecredTx {
            version,
            inputs,
            outputs,
            locktime,
            expiry,
            witness,
        });
        Ok(Outcome::Decoded(TxParts {
            tx,
            tx_hash,
            vsize: (cursor.position() - start) as u64,
        }))
    }

    /// Regular tree followed by the stake tree
    fn read_tx_block(&self, cursor: &mut ByteCursor<'_>) -> Result<Vec<(Transaction, Hash)>> {
        let mut txs = read_tx_list(self, cursor)?;
        txs.extend(read_tx_list(self, cursor)?);
        Ok(txs)
    }
}
