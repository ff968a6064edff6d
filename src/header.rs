//! Header-only extractors
//!
//! Each extractor walks just enough of a header to learn its length, then
//! returns the raw header bytes from the original start. Nothing decoded
//! along the way is kept. On error the cursor is left at the header start.
//!
//! | Format | Length |
//! |---|---|
//! | Static | static size |
//! | AuxPow | static size, plus the AuxPow proof when the version has bit 8 |
//! | Equihash | static size + varint solution |
//! | Primecoin | static size + varint multiplier |
//! | Xaya | static size + algo + bits, then an AuxPow proof or a second static header |
//! | BitcoinAtom | static size, + 4 flag bytes from the fork height |

use crate::constants::{
    AUXPOW_BRANCH_ENTRY_SIZE, BITCOIN_ATOM_FORK_HEIGHT, BITCOIN_ATOM_HEADER_EXTRA, VERSION_AUXPOW,
    XAYA_ALGO_AUXPOW,
};
use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::transaction::TxDecoder;
use serde::{Deserialize, Serialize};
use tracing::trace;

const PARENT_HASH_SIZE: u64 = 32;
const BRANCH_INDEX_SIZE: u64 = 4;
const PARENT_HEADER_SIZE: u64 = 80;

/// How a fork's header length is determined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderFormat {
    #[default]
    Static,
    AuxPow,
    Equihash,
    Primecoin,
    Xaya,
    BitcoinAtom { fork_height: u64 },
}

impl HeaderFormat {
    pub const fn bitcoin_atom() -> Self {
        HeaderFormat::BitcoinAtom {
            fork_height: BITCOIN_ATOM_FORK_HEIGHT,
        }
    }
}

/// Skip an AuxPow proof: coinbase tx, parent hash, two merkle branches, parent header
///
/// The coinbase is decoded with the fork's own transaction layout.
pub fn skip_auxpow(cursor: &mut ByteCursor<'_>, decoder: &dyn TxDecoder) -> Result<()> {
    decoder.read_tx(cursor)?.require_decoded()?;
    cursor.skip(PARENT_HASH_SIZE)?;
    let branch = cursor.read_varint()?;
    cursor.skip_records(branch, AUXPOW_BRANCH_ENTRY_SIZE)?;
    cursor.skip(BRANCH_INDEX_SIZE)?;
    let chain_branch = cursor.read_varint()?;
    cursor.skip_records(chain_branch, AUXPOW_BRANCH_ENTRY_SIZE)?;
    cursor.skip(BRANCH_INDEX_SIZE)?;
    cursor.skip(PARENT_HEADER_SIZE)
}

/// Raw bytes of one AuxPow proof starting at the cursor
pub fn read_auxpow<'a>(cursor: &mut ByteCursor<'a>, decoder: &dyn TxDecoder) -> Result<&'a [u8]> {
    let start = cursor.position();
    restore_on_error(cursor, start, |cursor| skip_auxpow(cursor, decoder))?;
    Ok(cursor.span_from(start))
}

fn restore_on_error<F>(cursor: &mut ByteCursor<'_>, start: usize, walk: F) -> Result<()>
where
    F: FnOnce(&mut ByteCursor<'_>) -> Result<()>,
{
    let result = walk(cursor);
    if result.is_err() {
        cursor.set_position(start)?;
    }
    result
}

/// Advance the cursor from the header start to its end
fn walk_header(
    cursor: &mut ByteCursor<'_>,
    format: HeaderFormat,
    static_size: usize,
    height: u64,
    decoder: &dyn TxDecoder,
) -> Result<()> {
    let start = cursor.position();
    match format {
        HeaderFormat::Static => cursor.skip(static_size as u64),
        HeaderFormat::AuxPow => {
            let version = cursor.read_u32_le()?;
            cursor.set_position(start)?;
            cursor.skip(static_size as u64)?;
            if version & VERSION_AUXPOW != 0 {
                trace!(offset = start, version, "AuxPow proof present");
                skip_auxpow(cursor, decoder)?;
            }
            Ok(())
        }
        HeaderFormat::Equihash | HeaderFormat::Primecoin => {
            cursor.skip(static_size as u64)?;
            let extra = cursor.read_varint()?;
            trace!(offset = start, extra, ?format, "variable header trailer");
            cursor.skip(extra)
        }
        HeaderFormat::Xaya => {
            cursor.skip(static_size as u64)?;
            let algo = cursor.read_u8()?;
            let _bits = cursor.read_u32_le()?;
            if algo & XAYA_ALGO_AUXPOW != 0 {
                trace!(offset = start, algo, "Xaya merge-mined header");
                skip_auxpow(cursor, decoder)
            } else {
                cursor.skip(static_size as u64)
            }
        }
        HeaderFormat::BitcoinAtom { fork_height } => {
            let mut len = static_size;
            if height >= fork_height {
                len += BITCOIN_ATOM_HEADER_EXTRA;
            }
            cursor.skip(len as u64)
        }
    }
}

/// Raw bytes of the header starting at the cursor
///
/// `height` is only consulted by [`HeaderFormat::BitcoinAtom`]; `decoder`
/// only by the formats that may embed an AuxPow coinbase.
pub fn read_header<'a>(
    cursor: &mut ByteCursor<'a>,
    format: HeaderFormat,
    static_size: usize,
    height: u64,
    decoder: &dyn TxDecoder,
) -> Result<&'a [u8]> {
    let start = cursor.position();
    restore_on_error(cursor, start, |cursor| {
        walk_header(cursor, format, static_size, height, decoder)
    })?;
    let end = cursor.position();
    cursor.set_position(start)?;
    cursor.read_bytes(end - start)
}
