//! Per-fork transaction decoders
//!
//! Each module holds one family of layouts. The plain legacy and SegWit
//! layouts live in [`crate::transaction`] and [`crate::segwit`]; these
//! modules compose the same readers with fork-specific fields.

pub mod decred;
pub mod diamond;
pub mod litecoin;
pub mod pivx;
pub mod timestamped;
pub mod tokenpay;
pub mod zcash;
pub mod zcoin;

pub use decred::DecredDecoder;
pub use diamond::{BitcoinDiamondDecoder, BitcoinDiamondSegWitDecoder};
pub use litecoin::LitecoinDecoder;
pub use pivx::PivxDecoder;
pub use timestamped::{
    EccoinDecoder, ReddcoinDecoder, TimeStampedDecoder, TimeStampedSegWitDecoder,
    TrezarcoinDecoder, VersionGate, VersionGatedDecoder,
};
pub use tokenpay::TokenPayDecoder;
pub use zcash::ZcashDecoder;
pub use zcoin::ZcoinDecoder;
