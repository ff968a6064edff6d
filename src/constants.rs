//! Wire-format constants shared across fork decoders

/// Standard block header size in bytes
pub const DEFAULT_STATIC_HEADER_SIZE: usize = 80;

/// Zcash header size before the Equihash solution
pub const ZCASH_STATIC_HEADER_SIZE: usize = 140;

/// Decred header size
pub const DECRED_STATIC_HEADER_SIZE: usize = 180;

/// Default upper bound on a single transaction buffer handed to the decoder
pub const DEFAULT_MAX_TX_SIZE: usize = 4_000_000;

/// Default upper bound on a block buffer handed to the decoder
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 32_000_000;

/// Previous-output index of a generation input
pub const NULL_PREVOUT_INDEX: u32 = 0xffff_ffff;

/// Header version bit announcing a merged-mining (AuxPow) proof
pub const VERSION_AUXPOW: u32 = 1 << 8;

/// Xaya algo byte bit announcing a merged-mining proof
pub const XAYA_ALGO_AUXPOW: u8 = 0x80;

/// First BitcoinAtom height whose headers carry 4 extra flag bytes
pub const BITCOIN_ATOM_FORK_HEIGHT: u64 = 505_888;

/// Extra header bytes after the BitcoinAtom fork
pub const BITCOIN_ATOM_HEADER_EXTRA: usize = 4;

/// Width of the merkle branch entries walked inside an AuxPow proof
pub const AUXPOW_BRANCH_ENTRY_SIZE: usize = 32;
