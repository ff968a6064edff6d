//! TokenPay: time-stamped transactions with ring-signature inputs
//!
//! An anonymous input is written as a standard input whose script starts
//! with `OP_RETURN OP_ANON_MARKER`. Its outpoint bytes are really a 33-byte
//! key image and a 3-byte ring size.

use crate::crypto::TxHashFn;
use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::opcodes::{OP_ANON_MARKER, OP_RETURN};
use crate::transaction::{read_inputs_with, read_outputs, read_standard_input, span_parts, TxDecoder, TxParts};
use crate::types::{
    StandardInput, StealthInput, TimePlacement, TimeStampedTx, Transaction, TxInput,
};

/// Marker, compressed pubkey and two signature scalars: 2 + 33 + 32 + 32
pub const MIN_ANON_INPUT_SCRIPT_SIZE: usize = 2 + (33 + 32 + 32);

pub fn is_anon_script(script: &[u8]) -> bool {
    script.len() >= MIN_ANON_INPUT_SCRIPT_SIZE
        && script[0] == OP_RETURN
        && script[1] == OP_ANON_MARKER
}

fn into_stealth(input: StandardInput) -> StealthInput {
    let index = input.prevout.index.to_le_bytes();
    let mut keyimage = Vec::with_capacity(33);
    keyimage.extend_from_slice(&input.prevout.hash);
    keyimage.push(index[0]);
    StealthInput {
        keyimage,
        ringsize: [index[1], index[2], index[3]],
        script: input.script,
        sequence: input.sequence,
    }
}

pub fn read_tokenpay_input(cursor: &mut ByteCursor<'_>) -> Result<TxInput> {
    let input = read_standard_input(cursor)?;
    if is_anon_script(&input.script) {
        Ok(TxInput::Stealth(into_stealth(input)))
    } else {
        Ok(TxInput::Standard(input))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenPayDecoder {
    hash_fn: TxHashFn,
}

impl TokenPayDecoder {
    pub const fn new(hash_fn: TxHashFn) -> Self {
        TokenPayDecoder { hash_fn }
    }
}

impl TxDecoder for TokenPayDecoder {
    fn name(&self) -> &'static str {
        "tokenpay"
    }

    fn read_tx_parts(&self, cursor: &mut ByteCursor<'_>) -> Result<Outcome<TxParts>> {
        let start = cursor.position();
        let tx = Transaction::TimeStamped(TimeStampedTx {
            version: cursor.read_i32_le()?,
            time: cursor.read_u32_le()?,
            time_placement: TimePlacement::AfterVersion,
            inputs: read_inputs_with(cursor, read_tokenpay_input)?,
            outputs: read_outputs(cursor)?,
            locktime: cursor.read_u32_le()?,
            trailer: Vec::new(),
        });
        Ok(Outcome::Decoded(span_parts(cursor, start, tx, self.hash_fn)))
    }
}
