//! Block transaction lists
//!
//! A block body is a varint count followed by that many transactions in the
//! fork's layout. Mempool-only skips cannot occur inside a block, so a skip
//! here is reported as an error.
//!
//! Performance:
//! - Independent raw transactions can be decoded in parallel (feature `rayon`)

use crate::cursor::ByteCursor;
use crate::error::{Outcome, Result};
use crate::transaction::{bounded_capacity, TxDecoder, TxParts};
use crate::types::{Hash, Transaction};
use tracing::{debug, trace};

/// Smallest possible transaction: version, two empty counts, locktime
pub const MIN_TX_SIZE: usize = 4 + 1 + 1 + 4;

/// Decode `varint count ‖ count × tx` into `(tx, id)` pairs
pub fn read_tx_list<D>(decoder: &D, cursor: &mut ByteCursor<'_>) -> Result<Vec<(Transaction, Hash)>>
where
    D: TxDecoder + ?Sized,
{
    let start = cursor.position();
    let count = cursor.read_varint()?;
    trace!(decoder = decoder.name(), offset = start, count, "reading transaction list");

    let mut txs = Vec::with_capacity(bounded_capacity(count, cursor.remaining(), MIN_TX_SIZE));
    for index in 0..count {
        let offset = cursor.position();
        let outcome = decoder.read_tx_and_hash(cursor)?;
        if let Some(reason) = outcome.skip_reason() {
            debug!(decoder = decoder.name(), index, offset, %reason, "skip inside block");
        }
        txs.push(outcome.require_decoded()?);
    }
    Ok(txs)
}

/// Decode each buffer as one transaction starting at offset 0
///
/// Results keep the order of `raw_txs`. With the `rayon` feature the
/// buffers are decoded on the global thread pool.
pub fn decode_transactions<D>(decoder: &D, raw_txs: &[&[u8]]) -> Vec<Result<Outcome<TxParts>>>
where
    D: TxDecoder + ?Sized,
{
    let decode_one = |raw: &&[u8]| decoder.read_tx_parts(&mut ByteCursor::new(raw));

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        raw_txs.par_iter().map(decode_one).collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        raw_txs.iter().map(decode_one).collect()
    }
}
