//! Witness data reading and virtual-size accounting (BIP141)
//!
//! Provides the witness-section reader shared by every SegWit-capable fork
//! and the virtual size formula used to report transaction sizes.

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::transaction::bounded_capacity;
use crate::types::ByteString;

/// Witness Data: stack of witness elements for one input
pub type Witness = Vec<ByteString>;

/// Read one witness stack: varint item count, then varbytes items
pub fn read_witness_stack(cursor: &mut ByteCursor<'_>) -> Result<Witness> {
    let count = cursor.read_varint()?;
    let mut items = Vec::with_capacity(bounded_capacity(count, cursor.remaining(), 1));
    for _ in 0..count {
        items.push(cursor.read_varbytes()?.to_vec());
    }
    Ok(items)
}

/// Read the witness section: exactly one stack per input
pub fn read_witness(cursor: &mut ByteCursor<'_>, input_count: usize) -> Result<Vec<Witness>> {
    let mut stacks = Vec::with_capacity(input_count.min(cursor.remaining()));
    for _ in 0..input_count {
        stacks.push(read_witness_stack(cursor)?);
    }
    Ok(stacks)
}

/// Virtual size from the non-witness size and the full size
///
/// `base_size` is the byte length of the input and output lists only;
/// `total_size` is the full serialized length. Rounds down:
/// vsize = ⌊(3 × base_size + total_size) / 4⌋
#[inline]
pub fn calculate_vsize(base_size: u64, total_size: u64) -> u64 {
    let result = (3 * base_size + total_size) / 4;

    debug_assert!(
        base_size > total_size || result <= total_size,
        "Vsize ({result}) must not exceed total size ({total_size})"
    );

    result
}

/// Whether every stack is empty
pub fn is_witness_empty(witness: &[Witness]) -> bool {
    witness.iter().all(|stack| stack.is_empty())
}
