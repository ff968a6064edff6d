//! Wire format serialization
//!
//! Decoding lives with each layout's decoder; this module holds the inverse
//! direction plus the compact-size integer codec both directions share.
//!
//! All serialization uses little-endian byte order.

pub mod block;
pub mod transaction;
pub mod varint;

pub use block::{serialize_block, serialize_tx_list};
pub use transaction::{serialize_transaction, serialize_without_witness};
pub use varint::{decode_varint, encode_varint, varint_size, write_varbytes, write_varint};
