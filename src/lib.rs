//! # blvm-txcodec
//!
//! Wire decoder for transactions and block headers of Bitcoin-family chains.
//!
//! Each supported fork has its own transaction layout: legacy, SegWit,
//! Litecoin MWEB flags, Zcash shielded pools, Decred's split witness, PIVX
//! Sapling, time-stamped PoS layouts and several one-off variants. Decoding
//! yields the transaction, its canonical id (the chain's own hash of the
//! chain's own byte span) and its virtual size. Header extractors return the
//! exact raw bytes of a header whose length depends on a variable trailer
//! (AuxPow proofs, Equihash solutions, Primecoin multipliers).
//!
//! ## Design Principles
//!
//! 1. **Bounds-checked reads**: every read goes through [`ByteCursor`]; a short buffer is an error, never a panic
//! 2. **Stateless decoders**: all position state lives in the caller's cursor
//! 3. **Skips are not errors**: mempool-only transactions that cannot be decoded report [`Outcome::Skip`]
//!
//! ## Usage
//!
//! ```rust
//! use blvm_txcodec::{Fork, TxCodec};
//!
//! // version 1, no inputs, no outputs, locktime 0
//! let raw = [1u8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
//! let codec = TxCodec::new(Fork::Bitcoin);
//! let parts = codec.decode_tx(&raw).unwrap().decoded().unwrap();
//! assert_eq!(parts.tx.version(), 1);
//! assert_eq!(parts.vsize, 10);
//! ```

pub mod block;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod cursor;
pub mod error;
pub mod fork;
pub mod forks;
pub mod header;
pub mod opcodes;
pub mod segwit;
pub mod serialization;
pub mod transaction;
pub mod types;
pub mod witness;

pub use config::{DecodeLimits, DecoderConfig};
pub use crypto::HeaderHash;
pub use cursor::ByteCursor;
pub use error::{DecodeError, Outcome, Result, SkipReason};
pub use fork::Fork;
pub use header::HeaderFormat;
pub use transaction::{TxDecoder, TxParts};
pub use types::{Hash, Transaction, TxInput, TxOutput};

/// Fork-bound decoder with configured limits
///
/// Wraps the module functions for one configured fork. Every method checks
/// the buffer against [`DecodeLimits`] before decoding.
#[derive(Debug, Clone, Default)]
pub struct TxCodec {
    config: DecoderConfig,
}

impl TxCodec {
    /// Codec for `fork` with default limits
    pub fn new(fork: Fork) -> Self {
        Self {
            config: DecoderConfig::new(fork),
        }
    }

    pub fn from_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn fork(&self) -> Fork {
        self.config.fork
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn decoder(&self) -> &'static dyn TxDecoder {
        self.config.fork.decoder()
    }

    fn check_len(len: usize, limit: usize) -> Result<()> {
        if len > limit {
            return Err(DecodeError::BufferTooLarge { len, limit });
        }
        Ok(())
    }

    /// Decode the transaction at the start of `raw`
    pub fn decode_tx(&self, raw: &[u8]) -> Result<Outcome<TxParts>> {
        self.decode_tx_at(raw, 0)
    }

    /// Decode the transaction starting at byte `start` of `raw`
    pub fn decode_tx_at(&self, raw: &[u8], start: usize) -> Result<Outcome<TxParts>> {
        Self::check_len(raw.len() - start.min(raw.len()), self.config.limits.max_tx_size)?;
        let mut cursor = ByteCursor::at(raw, start)?;
        self.decoder().read_tx_parts(&mut cursor)
    }

    /// Decode a block's transaction list (no header) at the start of `raw`
    pub fn read_tx_block(&self, raw: &[u8]) -> Result<Vec<(Transaction, Hash)>> {
        Self::check_len(raw.len(), self.config.limits.max_block_size)?;
        self.decoder().read_tx_block(&mut ByteCursor::new(raw))
    }

    /// Decode a full block: header bytes, then its transactions
    pub fn read_block<'a>(
        &self,
        raw: &'a [u8],
        height: u64,
    ) -> Result<(&'a [u8], Vec<(Transaction, Hash)>)> {
        Self::check_len(raw.len(), self.config.limits.max_block_size)?;
        let mut cursor = ByteCursor::new(raw);
        let header = self.read_header_from(&mut cursor, height)?;
        let txs = self.decoder().read_tx_block(&mut cursor)?;
        Ok((header, txs))
    }

    /// Raw bytes of the header starting at byte `start` of `raw`
    ///
    /// `height` only matters for forks whose header size changed at a height.
    pub fn read_header<'a>(&self, raw: &'a [u8], start: usize, height: u64) -> Result<&'a [u8]> {
        Self::check_len(raw.len(), self.config.limits.max_block_size)?;
        let mut cursor = ByteCursor::at(raw, start)?;
        self.read_header_from(&mut cursor, height)
    }

    fn read_header_from<'a>(&self, cursor: &mut ByteCursor<'a>, height: u64) -> Result<&'a [u8]> {
        header::read_header(
            cursor,
            self.config.header_format(),
            self.config.static_header_size(),
            height,
            self.decoder(),
        )
    }

    /// Block hash of a raw header, `None` when the fork's hash is not provided here
    pub fn header_hash(&self, header: &[u8]) -> Result<Option<Hash>> {
        self.config
            .fork
            .header_hash()
            .map(|hash| hash.hash(header))
            .transpose()
    }
}
