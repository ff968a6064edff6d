//! Transaction wire format serialization
//!
//! Re-encodes a decoded [`Transaction`] in the layout it was read from.
//! Time-stamped transactions write their time where [`TimePlacement`] says
//! and append their raw trailer (ECCoin service reference, NavCoin
//! `strDZeel`). PIVX shielded data and Litecoin MWEB extension bytes are not
//! retained, so those encodings cover only the transparent part.

use super::varint::{write_varbytes, write_varint};
use crate::types::*;
use crate::witness::Witness;

fn write_input(out: &mut Vec<u8>, input: &TxInput) {
    match input {
        TxInput::Standard(input) => {
            out.extend_from_slice(&input.prevout.hash);
            out.extend_from_slice(&input.prevout.index.to_le_bytes());
            write_varbytes(out, &input.script);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
        TxInput::Decred(input) => {
            out.extend_from_slice(&input.prevout.hash);
            out.extend_from_slice(&input.prevout.index.to_le_bytes());
            out.push(input.tree);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
        TxInput::Stealth(input) => {
            out.extend_from_slice(&input.keyimage);
            out.extend_from_slice(&input.ringsize);
            write_varbytes(out, &input.script);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
    }
}

fn write_output(out: &mut Vec<u8>, output: &TxOutput) {
    match output {
        TxOutput::Standard(output) => {
            out.extend_from_slice(&output.value.to_le_bytes());
            write_varbytes(out, &output.pk_script);
        }
        TxOutput::Decred(output) => {
            out.extend_from_slice(&output.value.to_le_bytes());
            out.extend_from_slice(&output.version.to_le_bytes());
            write_varbytes(out, &output.pk_script);
        }
    }
}

fn write_io(out: &mut Vec<u8>, inputs: &[TxInput], outputs: &[TxOutput]) {
    write_varint(out, inputs.len() as u64);
    for input in inputs {
        write_input(out, input);
    }
    write_varint(out, outputs.len() as u64);
    for output in outputs {
        write_output(out, output);
    }
}

fn write_witness(out: &mut Vec<u8>, witness: &[Witness]) {
    for stack in witness {
        write_varint(out, stack.len() as u64);
        for item in stack {
            write_varbytes(out, item);
        }
    }
}

fn estimated_size(tx: &Transaction) -> usize {
    let inputs: usize = tx.inputs().iter().map(|i| 41 + i.script().len()).sum();
    let outputs: usize = tx.outputs().iter().map(|o| 11 + o.pk_script().len()).sum();
    let trailer = match tx {
        Transaction::TimeStamped(tx) => tx.trailer.len(),
        Transaction::TimeStampedSegWit(tx) => tx.trailer.len(),
        _ => 0,
    };
    16 + inputs + outputs + trailer
}

/// Serialize a transaction to its fork's wire format
///
/// Format (SegWit):
/// - Version (4 bytes, little-endian)
/// - Marker (0x00) and flag
/// - Input count (VarInt) and inputs
/// - Output count (VarInt) and outputs
/// - One witness stack per input
/// - Lock time (4 bytes, little-endian)
pub fn serialize_transaction(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::with_capacity(estimated_size(tx));
    match tx {
        Transaction::Legacy(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
        }
        Transaction::SegWit(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            out.push(tx.marker);
            out.push(tx.flag);
            write_io(&mut out, &tx.inputs, &tx.outputs);
            write_witness(&mut out, &tx.witness);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
        }
        Transaction::TimeStamped(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            if tx.time_placement == TimePlacement::AfterVersion {
                out.extend_from_slice(&tx.time.to_le_bytes());
            }
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
            if tx.time_placement == TimePlacement::AfterLocktime {
                out.extend_from_slice(&tx.time.to_le_bytes());
            }
            out.extend_from_slice(&tx.trailer);
        }
        Transaction::TimeStampedSegWit(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            out.extend_from_slice(&tx.time.to_le_bytes());
            out.push(tx.marker);
            out.push(tx.flag);
            write_io(&mut out, &tx.inputs, &tx.outputs);
            write_witness(&mut out, &tx.witness);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
            out.extend_from_slice(&tx.trailer);
        }
        Transaction::Decred(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
            out.extend_from_slice(&tx.expiry.to_le_bytes());
            write_varint(&mut out, tx.witness.len() as u64);
            for record in &tx.witness {
                out.extend_from_slice(&record.value_in.to_le_bytes());
                out.extend_from_slice(&record.block_height.to_le_bytes());
                out.extend_from_slice(&record.block_index.to_le_bytes());
                write_varbytes(&mut out, &record.script);
            }
        }
        Transaction::Pivx(tx) => {
            let header = if tx.txtype != 0 {
                (tx.version & 0xffff) | (u32::from(tx.txtype) << 16)
            } else {
                tx.version
            };
            out.extend_from_slice(&header.to_le_bytes());
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
        }
        Transaction::BitcoinDiamond(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            out.extend_from_slice(&tx.preblockhash);
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
        }
        Transaction::BitcoinDiamondSegWit(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            out.extend_from_slice(&tx.preblockhash);
            out.push(tx.marker);
            out.push(tx.flag);
            write_io(&mut out, &tx.inputs, &tx.outputs);
            write_witness(&mut out, &tx.witness);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
        }
        Transaction::Trezarcoin(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            out.extend_from_slice(&tx.time.to_le_bytes());
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
            if tx.version >= 2 {
                write_varbytes(&mut out, &tx.txcomment);
            }
        }
    }
    out
}

/// Serialize without marker, flag and witness data
///
/// For the SegWit-capable variants this is the id preimage; every other
/// variant serializes exactly as [`serialize_transaction`].
pub fn serialize_without_witness(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::with_capacity(estimated_size(tx));
    match tx {
        Transaction::SegWit(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
        }
        Transaction::TimeStampedSegWit(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            out.extend_from_slice(&tx.time.to_le_bytes());
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
            out.extend_from_slice(&tx.trailer);
        }
        Transaction::BitcoinDiamondSegWit(tx) => {
            out.extend_from_slice(&tx.version.to_le_bytes());
            out.extend_from_slice(&tx.preblockhash);
            write_io(&mut out, &tx.inputs, &tx.outputs);
            out.extend_from_slice(&tx.locktime.to_le_bytes());
        }
        other => return serialize_transaction(other),
    }
    out
}
