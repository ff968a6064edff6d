//! Supported chain families
//!
//! A [`Fork`] names a transaction layout together with the header format,
//! header hash and static header size that go with it. Forks that share a
//! layout share a decoder type; only the injected id hash or a name differs.

use crate::constants::{DECRED_STATIC_HEADER_SIZE, DEFAULT_STATIC_HEADER_SIZE, ZCASH_STATIC_HEADER_SIZE};
use crate::crypto::{double_sha256_chunks, sha256_chunks, HeaderHash};
use crate::error::DecodeError;
use crate::forks::decred::DecredDecoder;
use crate::forks::diamond::{BitcoinDiamondDecoder, BitcoinDiamondSegWitDecoder};
use crate::forks::litecoin::LitecoinDecoder;
use crate::forks::pivx::PivxDecoder;
use crate::forks::timestamped::{
    EccoinDecoder, ReddcoinDecoder, TimeStampedDecoder, TimeStampedSegWitDecoder,
    TrezarcoinDecoder, VersionGate, VersionGatedDecoder,
};
use crate::forks::tokenpay::TokenPayDecoder;
use crate::forks::zcash::ZcashDecoder;
use crate::forks::zcoin::ZcoinDecoder;
use crate::header::HeaderFormat;
use crate::segwit::SegWitDecoder;
use crate::transaction::{LegacyDecoder, TxDecoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static BITCOIN: LegacyDecoder = LegacyDecoder::new("bitcoin", double_sha256_chunks);
static BITCOIN_SEGWIT: SegWitDecoder = SegWitDecoder::new("bitcoin-segwit", double_sha256_chunks);
static LITECOIN: LitecoinDecoder = LitecoinDecoder::new();
static GROESTLCOIN: SegWitDecoder = SegWitDecoder::new("groestlcoin", sha256_chunks);
static SMARTCASH: LegacyDecoder = LegacyDecoder::new("smartcash", sha256_chunks);
static AUXPOW: LegacyDecoder = LegacyDecoder::new("auxpow", double_sha256_chunks);
static AUXPOW_SEGWIT: SegWitDecoder = SegWitDecoder::new("auxpow-segwit", double_sha256_chunks);
static EQUIHASH: LegacyDecoder = LegacyDecoder::new("equihash", double_sha256_chunks);
static EQUIHASH_SEGWIT: SegWitDecoder =
    SegWitDecoder::new("equihash-segwit", double_sha256_chunks);
static ZCASH: ZcashDecoder = ZcashDecoder::new();
static DECRED: DecredDecoder = DecredDecoder::new();
static PIVX: PivxDecoder = PivxDecoder::new();
static TXTIME: TimeStampedDecoder = TimeStampedDecoder::new("txtime", double_sha256_chunks);
static VERGE: TimeStampedDecoder = TimeStampedDecoder::new("verge", double_sha256_chunks);
static TXTIME_SEGWIT: TimeStampedSegWitDecoder =
    TimeStampedSegWitDecoder::new("txtime-segwit", double_sha256_chunks);
static EMERCOIN: TimeStampedSegWitDecoder =
    TimeStampedSegWitDecoder::new("emercoin", double_sha256_chunks);
static NAVCOIN: TimeStampedSegWitDecoder =
    TimeStampedSegWitDecoder::with_dzeel("navcoin", double_sha256_chunks);
static TREZARCOIN: TrezarcoinDecoder = TrezarcoinDecoder::new(double_sha256_chunks);
static BLACKCOIN: VersionGatedDecoder =
    VersionGatedDecoder::new("blackcoin", double_sha256_chunks, VersionGate::Below(2));
static ELECTRA: VersionGatedDecoder =
    VersionGatedDecoder::new("electra", double_sha256_chunks, VersionGate::AllExcept(7));
static SIMPLICITY: VersionGatedDecoder =
    VersionGatedDecoder::new("simplicity", double_sha256_chunks, VersionGate::Below(3));
static REDDCOIN: ReddcoinDecoder = ReddcoinDecoder::new(double_sha256_chunks);
static ECCOIN: EccoinDecoder = EccoinDecoder::new(double_sha256_chunks);
static TOKENPAY: TokenPayDecoder = TokenPayDecoder::new(double_sha256_chunks);
static ZCOIN: ZcoinDecoder = ZcoinDecoder::new(double_sha256_chunks);
static BITCOIN_DIAMOND: BitcoinDiamondDecoder = BitcoinDiamondDecoder::new(double_sha256_chunks);
static BITCOIN_DIAMOND_SEGWIT: BitcoinDiamondSegWitDecoder =
    BitcoinDiamondSegWitDecoder::new(double_sha256_chunks);
static BITCOIN_ATOM: SegWitDecoder = SegWitDecoder::new("bitcoin-atom", double_sha256_chunks);
static XAYA: SegWitDecoder = SegWitDecoder::new("xaya", double_sha256_chunks);
static PRIMECOIN: LegacyDecoder = LegacyDecoder::new("primecoin", double_sha256_chunks);

/// A chain family with its own transaction or header layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fork {
    #[serde(rename = "bitcoin")]
    Bitcoin,
    #[default]
    #[serde(rename = "bitcoin-segwit")]
    BitcoinSegWit,
    #[serde(rename = "litecoin")]
    Litecoin,
    #[serde(rename = "groestlcoin")]
    Groestlcoin,
    #[serde(rename = "smartcash")]
    SmartCash,
    #[serde(rename = "auxpow")]
    AuxPow,
    #[serde(rename = "auxpow-segwit")]
    AuxPowSegWit,
    #[serde(rename = "equihash")]
    Equihash,
    #[serde(rename = "equihash-segwit")]
    EquihashSegWit,
    #[serde(rename = "zcash")]
    Zcash,
    #[serde(rename = "decred")]
    Decred,
    #[serde(rename = "pivx")]
    Pivx,
    #[serde(rename = "txtime")]
    TxTime,
    #[serde(rename = "txtime-segwit")]
    TxTimeSegWit,
    #[serde(rename = "navcoin")]
    NavCoin,
    #[serde(rename = "verge")]
    Verge,
    #[serde(rename = "emercoin")]
    Emercoin,
    #[serde(rename = "trezarcoin")]
    Trezarcoin,
    #[serde(rename = "blackcoin")]
    Blackcoin,
    #[serde(rename = "electra")]
    Electra,
    #[serde(rename = "simplicity")]
    Simplicity,
    #[serde(rename = "reddcoin")]
    Reddcoin,
    #[serde(rename = "eccoin")]
    Eccoin,
    #[serde(rename = "tokenpay")]
    TokenPay,
    #[serde(rename = "zcoin")]
    Zcoin,
    #[serde(rename = "bitcoin-diamond")]
    BitcoinDiamond,
    #[serde(rename = "bitcoin-diamond-segwit")]
    BitcoinDiamondSegWit,
    #[serde(rename = "bitcoin-atom")]
    BitcoinAtom,
    #[serde(rename = "xaya")]
    Xaya,
    #[serde(rename = "primecoin")]
    Primecoin,
}

impl Fork {
    pub const ALL: [Fork; 30] = [
        Fork::Bitcoin,
        Fork::BitcoinSegWit,
        Fork::Litecoin,
        Fork::Groestlcoin,
        Fork::SmartCash,
        Fork::AuxPow,
        Fork::AuxPowSegWit,
        Fork::Equihash,
        Fork::EquihashSegWit,
        Fork::Zcash,
        Fork::Decred,
        Fork::Pivx,
        Fork::TxTime,
        Fork::TxTimeSegWit,
        Fork::NavCoin,
        Fork::Verge,
        Fork::Emercoin,
        Fork::Trezarcoin,
        Fork::Blackcoin,
        Fork::Electra,
        Fork::Simplicity,
        Fork::Reddcoin,
        Fork::Eccoin,
        Fork::TokenPay,
        Fork::Zcoin,
        Fork::BitcoinDiamond,
        Fork::BitcoinDiamondSegWit,
        Fork::BitcoinAtom,
        Fork::Xaya,
        Fork::Primecoin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Fork::Bitcoin => "bitcoin",
            Fork::BitcoinSegWit => "bitcoin-segwit",
            Fork::Litecoin => "litecoin",
            Fork::Groestlcoin => "groestlcoin",
            Fork::SmartCash => "smartcash",
            Fork::AuxPow => "auxpow",
            Fork::AuxPowSegWit => "auxpow-segwit",
            Fork::Equihash => "equihash",
            Fork::EquihashSegWit => "equihash-segwit",
            Fork::Zcash => "zcash",
            Fork::Decred => "decred",
            Fork::Pivx => "pivx",
            Fork::TxTime => "txtime",
            Fork::TxTimeSegWit => "txtime-segwit",
            Fork::NavCoin => "navcoin",
            Fork::Verge => "verge",
            Fork::Emercoin => "emercoin",
            Fork::Trezarcoin => "trezarcoin",
            Fork::Blackcoin => "blackcoin",
            Fork::Electra => "electra",
            Fork::Simplicity => "simplicity",
            Fork::Reddcoin => "reddcoin",
            Fork::Eccoin => "eccoin",
            Fork::TokenPay => "tokenpay",
            Fork::Zcoin => "zcoin",
            Fork::BitcoinDiamond => "bitcoin-diamond",
            Fork::BitcoinDiamondSegWit => "bitcoin-diamond-segwit",
            Fork::BitcoinAtom => "bitcoin-atom",
            Fork::Xaya => "xaya",
            Fork::Primecoin => "primecoin",
        }
    }

    /// Transaction decoder for this fork
    pub fn decoder(self) -> &'static dyn TxDecoder {
        match self {
            Fork::Bitcoin => &BITCOIN,
            Fork::BitcoinSegWit => &BITCOIN_SEGWIT,
            Fork::Litecoin => &LITECOIN,
            Fork::Groestlcoin => &GROESTLCOIN,
            Fork::SmartCash => &SMARTCASH,
            Fork::AuxPow => &AUXPOW,
            Fork::AuxPowSegWit => &AUXPOW_SEGWIT,
            Fork::Equihash => &EQUIHASH,
            Fork::EquihashSegWit => &EQUIHASH_SEGWIT,
            Fork::Zcash => &ZCASH,
            Fork::Decred => &DECRED,
            Fork::Pivx => &PIVX,
            Fork::TxTime => &TXTIME,
            Fork::TxTimeSegWit => &TXTIME_SEGWIT,
            Fork::NavCoin => &NAVCOIN,
            Fork::Verge => &VERGE,
            Fork::Emercoin => &EMERCOIN,
            Fork::Trezarcoin => &TREZARCOIN,
            Fork::Blackcoin => &BLACKCOIN,
            Fork::Electra => &ELECTRA,
            Fork::Simplicity => &SIMPLICITY,
            Fork::Reddcoin => &REDDCOIN,
            Fork::Eccoin => &ECCOIN,
            Fork::TokenPay => &TOKENPAY,
            Fork::Zcoin => &ZCOIN,
            Fork::BitcoinDiamond => &BITCOIN_DIAMOND,
            Fork::BitcoinDiamondSegWit => &BITCOIN_DIAMOND_SEGWIT,
            Fork::BitcoinAtom => &BITCOIN_ATOM,
            Fork::Xaya => &XAYA,
            Fork::Primecoin => &PRIMECOIN,
        }
    }

    pub fn header_format(self) -> HeaderFormat {
        match self {
            Fork::AuxPow | Fork::AuxPowSegWit | Fork::Emercoin => HeaderFormat::AuxPow,
            Fork::Equihash | Fork::EquihashSegWit | Fork::Zcash => HeaderFormat::Equihash,
            Fork::Xaya => HeaderFormat::Xaya,
            Fork::Primecoin => HeaderFormat::Primecoin,
            Fork::BitcoinAtom => HeaderFormat::bitcoin_atom(),
            _ => HeaderFormat::Static,
        }
    }

    /// Block hash primitive, `None` where it lives outside this crate
    pub fn header_hash(self) -> Option<HeaderHash> {
        match self {
            Fork::Groestlcoin | Fork::Pivx | Fork::Verge => None,
            Fork::Trezarcoin => Some(HeaderHash::Blake2sKeyed),
            Fork::Decred => Some(HeaderHash::Blake256),
            Fork::SmartCash => Some(HeaderHash::Keccak256),
            _ => Some(HeaderHash::DoubleSha256),
        }
    }

    pub fn default_static_header_size(self) -> usize {
        match self {
            Fork::Equihash | Fork::EquihashSegWit | Fork::Zcash => ZCASH_STATIC_HEADER_SIZE,
            Fork::Decred => DECRED_STATIC_HEADER_SIZE,
            _ => DEFAULT_STATIC_HEADER_SIZE,
        }
    }
}

impl fmt::Display for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fork {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fork::ALL
            .into_iter()
            .find(|fork| fork.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownFork(s.to_string()))
    }
}
