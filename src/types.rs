//! Decoded transaction model
//!
//! Every fork decodes into one closed set of variants. Consumers match on
//! [`Transaction`] and read the common fields through its accessors; each
//! payload struct carries exactly the fields its wire layout retains.
//!
//! Byte strings are owned copies: a decoded transaction never borrows from
//! the buffer it was read from.

use crate::crypto::hash_to_hex_str;
pub use crate::witness::Witness;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash type: 256-bit hash in wire byte order
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// The all-zero hash used by generation inputs
pub const ZERO_HASH: Hash = [0u8; 32];

/// Previous output reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

impl OutPoint {
    /// Generation (coinbase) inputs point at index 0xFFFFFFFF of the zero hash
    #[inline]
    pub fn is_null(&self) -> bool {
        self.index == u32::MAX && self.hash == ZERO_HASH
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardInput {
    pub prevout: OutPoint,
    pub script: ByteString,
    pub sequence: u32,
}

/// Decred input: no script in the prefix, plus a tree selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecredInput {
    pub prevout: OutPoint,
    pub tree: u8,
    pub sequence: u32,
}

/// TokenPay ring-signature input
///
/// Occupies the same wire bytes as a standard input; the 36 outpoint bytes
/// are reinterpreted as a 33-byte key image followed by a 3-byte ring size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthInput {
    pub keyimage: ByteString,
    pub ringsize: [u8; 3],
    pub script: ByteString,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxInput {
    Standard(StandardInput),
    Decred(DecredInput),
    Stealth(StealthInput),
}

impl TxInput {
    /// Whether this input creates coins rather than spending them
    ///
    /// Stealth inputs never reference an on-chain output and always count
    /// as generation-like.
    pub fn is_generation(&self) -> bool {
        match self {
            TxInput::Standard(input) => input.prevout.is_null(),
            TxInput::Decred(input) => input.prevout.is_null(),
            TxInput::Stealth(_) => true,
        }
    }

    pub fn prevout(&self) -> Option<&OutPoint> {
        match self {
            TxInput::Standard(input) => Some(&input.prevout),
            TxInput::Decred(input) => Some(&input.prevout),
            TxInput::Stealth(_) => None,
        }
    }

    /// Input script; Decred inputs carry theirs in the witness section
    pub fn script(&self) -> &[u8] {
        match self {
            TxInput::Standard(input) => &input.script,
            TxInput::Decred(_) => &[],
            TxInput::Stealth(input) => &input.script,
        }
    }

    pub fn sequence(&self) -> u32 {
        match self {
            TxInput::Standard(input) => input.sequence,
            TxInput::Decred(input) => input.sequence,
            TxInput::Stealth(input) => input.sequence,
        }
    }
}

impl fmt::Display for TxInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxInput::Standard(input) => write!(
                f,
                "Input({}, {}, script={}, sequence={})",
                hash_to_hex_str(&input.prevout.hash),
                input.prevout.index,
                hex::encode(&input.script),
                input.sequence
            ),
            TxInput::Decred(input) => write!(
                f,
                "Input({}, {}, tree={}, sequence={})",
                hash_to_hex_str(&input.prevout.hash),
                input.prevout.index,
                input.tree,
                input.sequence
            ),
            TxInput::Stealth(input) => write!(
                f,
                "Input({}, {}, script={}, sequence={})",
                hex::encode(&input.keyimage),
                hex::encode(input.ringsize),
                hex::encode(&input.script),
                input.sequence
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardOutput {
    pub value: i64,
    pub pk_script: ByteString,
}

/// Decred output: adds a script version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecredOutput {
    pub value: i64,
    pub version: u16,
    pub pk_script: ByteString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxOutput {
    Standard(StandardOutput),
    Decred(DecredOutput),
}

impl TxOutput {
    pub fn value(&self) -> i64 {
        match self {
            TxOutput::Standard(output) => output.value,
            TxOutput::Decred(output) => output.value,
        }
    }

    pub fn pk_script(&self) -> &[u8] {
        match self {
            TxOutput::Standard(output) => &output.pk_script,
            TxOutput::Decred(output) => &output.pk_script,
        }
    }
}

/// Decred per-input witness record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecredWitness {
    pub value_in: i64,
    pub block_height: u32,
    pub block_index: u32,
    pub script: ByteString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTx {
    pub version: i32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub locktime: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegWitTx {
    pub version: i32,
    pub marker: u8,
    pub flag: u8,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    /// One stack per input, in input order (empty when the flag omits witness data)
    pub witness: Vec<Witness>,
    pub locktime: u32,
}

/// Where a time-stamped layout carries its time on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimePlacement {
    /// Right after the version (Peercoin family)
    #[default]
    AfterVersion,
    /// After the locktime (Reddcoin from version 2)
    AfterLocktime,
    /// Not present; `time` is 0 (Reddcoin version 1)
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStampedTx {
    pub version: i32,
    pub time: u32,
    #[serde(default)]
    pub time_placement: TimePlacement,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub locktime: u32,
    /// Raw bytes a fork appends after the locktime and time
    /// (ECCoin service reference, NavCoin `strDZeel` with its length prefix)
    #[serde(default)]
    pub trailer: ByteString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStampedSegWitTx {
    pub version: i32,
    pub time: u32,
    pub marker: u8,
    pub flag: u8,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub witness: Vec<Witness>,
    pub locktime: u32,
    /// Raw bytes after the locktime (NavCoin `strDZeel`); part of the id
    #[serde(default)]
    pub trailer: ByteString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecredTx {
    pub version: i32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub locktime: u32,
    pub expiry: u32,
    pub witness: Vec<DecredWitness>,
}

/// PIVX transaction; shielded data is consumed but not retained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivxTx {
    /// Low 16 bits of the header for special transactions, the whole header otherwise
    pub version: u32,
    pub txtype: u16,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub locktime: u32,
}

/// Bitcoin Diamond version-12 transaction: a preblock hash follows the version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitcoinDiamondTx {
    pub version: i32,
    pub preblockhash: Hash,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub locktime: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitcoinDiamondSegWitTx {
    pub version: i32,
    pub preblockhash: Hash,
    pub marker: u8,
    pub flag: u8,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub witness: Vec<Witness>,
    pub locktime: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrezarcoinTx {
    pub version: i32,
    pub time: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub locktime: u32,
    /// Empty for versions below 2
    pub txcomment: ByteString,
}

/// A decoded transaction of any supported layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction {
    Legacy(LegacyTx),
    SegWit(SegWitTx),
    TimeStamped(TimeStampedTx),
    TimeStampedSegWit(TimeStampedSegWitTx),
    Decred(DecredTx),
    Pivx(PivxTx),
    BitcoinDiamond(BitcoinDiamondTx),
    BitcoinDiamondSegWit(BitcoinDiamondSegWitTx),
    Trezarcoin(TrezarcoinTx),
}

impl Transaction {
    pub fn version(&self) -> i64 {
        match self {
            Transaction::Legacy(tx) => tx.version.into(),
            Transaction::SegWit(tx) => tx.version.into(),
            Transaction::TimeStamped(tx) => tx.version.into(),
            Transaction::TimeStampedSegWit(tx) => tx.version.into(),
            Transaction::Decred(tx) => tx.version.into(),
            Transaction::Pivx(tx) => tx.version.into(),
            Transaction::BitcoinDiamond(tx) => tx.version.into(),
            Transaction::BitcoinDiamondSegWit(tx) => tx.version.into(),
            Transaction::Trezarcoin(tx) => tx.version.into(),
        }
    }

    pub fn inputs(&self) -> &[TxInput] {
        match self {
            Transaction::Legacy(tx) => &tx.inputs,
            Transaction::SegWit(tx) => &tx.inputs,
            Transaction::TimeStamped(tx) => &tx.inputs,
            Transaction::TimeStampedSegWit(tx) => &tx.inputs,
            Transaction::Decred(tx) => &tx.inputs,
            Transaction::Pivx(tx) => &tx.inputs,
            Transaction::BitcoinDiamond(tx) => &tx.inputs,
            Transaction::BitcoinDiamondSegWit(tx) => &tx.inputs,
            Transaction::Trezarcoin(tx) => &tx.inputs,
        }
    }

    pub fn outputs(&self) -> &[TxOutput] {
        match self {
            Transaction::Legacy(tx) => &tx.outputs,
            Transaction::SegWit(tx) => &tx.outputs,
            Transaction::TimeStamped(tx) => &tx.outputs,
            Transaction::TimeStampedSegWit(tx) => &tx.outputs,
            Transaction::Decred(tx) => &tx.outputs,
            Transaction::Pivx(tx) => &tx.outputs,
            Transaction::BitcoinDiamond(tx) => &tx.outputs,
            Transaction::BitcoinDiamondSegWit(tx) => &tx.outputs,
            Transaction::Trezarcoin(tx) => &tx.outputs,
        }
    }

    pub fn locktime(&self) -> u32 {
        match self {
            Transaction::Legacy(tx) => tx.locktime,
            Transaction::SegWit(tx) => tx.locktime,
            Transaction::TimeStamped(tx) => tx.locktime,
            Transaction::TimeStampedSegWit(tx) => tx.locktime,
            Transaction::Decred(tx) => tx.locktime,
            Transaction::Pivx(tx) => tx.locktime,
            Transaction::BitcoinDiamond(tx) => tx.locktime,
            Transaction::BitcoinDiamondSegWit(tx) => tx.locktime,
            Transaction::Trezarcoin(tx) => tx.locktime,
        }
    }

    /// Per-input witness stacks for the SegWit-capable layouts
    pub fn witness(&self) -> Option<&[Witness]> {
        match self {
            Transaction::SegWit(tx) => Some(&tx.witness),
            Transaction::TimeStampedSegWit(tx) => Some(&tx.witness),
            Transaction::BitcoinDiamondSegWit(tx) => Some(&tx.witness),
            _ => None,
        }
    }

    /// Whether the first input is a generation input
    pub fn is_coinbase(&self) -> bool {
        self.inputs()
            .first()
            .map(TxInput::is_generation)
            .unwrap_or(false)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Transaction::Legacy(_) => "legacy",
            Transaction::SegWit(_) => "segwit",
            Transaction::TimeStamped(_) => "time-stamped",
            Transaction::TimeStampedSegWit(_) => "time-stamped-segwit",
            Transaction::Decred(_) => "decred",
            Transaction::Pivx(_) => "pivx",
            Transaction::BitcoinDiamond(_) => "bitcoin-diamond",
            Transaction::BitcoinDiamondSegWit(_) => "bitcoin-diamond-segwit",
            Transaction::Trezarcoin(_) => "trezarcoin",
        }
    }
}
