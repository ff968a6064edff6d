//! Configuration for blvm-txcodec
//!
//! Selects the fork and bounds the buffers handed to the decoder. Settings
//! can be deserialized from a config file, read from environment variables,
//! or built programmatically.

use crate::constants::{BITCOIN_ATOM_FORK_HEIGHT, DEFAULT_MAX_BLOCK_SIZE, DEFAULT_MAX_TX_SIZE};
use crate::error::{DecodeError, Result};
use crate::fork::Fork;
use crate::header::HeaderFormat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Input size limits
///
/// Checked before decoding starts, so an oversized buffer from an untrusted
/// peer is rejected without being walked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    /// Maximum bytes in a single transaction buffer
    #[serde(default = "default_max_tx_size")]
    pub max_tx_size: usize,

    /// Maximum bytes in a block buffer (header and transactions)
    #[serde(default = "default_max_block_size")]
    pub max_block_size: usize,
}

fn default_max_tx_size() -> usize {
    DEFAULT_MAX_TX_SIZE
}

fn default_max_block_size() -> usize {
    DEFAULT_MAX_BLOCK_SIZE
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_tx_size: DEFAULT_MAX_TX_SIZE,
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
        }
    }
}

/// Complete decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Chain family whose layouts are decoded
    #[serde(default)]
    pub fork: Fork,

    /// Header size before any variable trailer
    /// Default: the fork's own size (80, 140 for Equihash chains, 180 for Decred)
    #[serde(default)]
    pub static_header_size: Option<usize>,

    #[serde(default)]
    pub limits: DecodeLimits,

    /// First BitcoinAtom height with 4 extra header bytes
    #[serde(default = "default_bitcoin_atom_fork_height")]
    pub bitcoin_atom_fork_height: u64,
}

fn default_bitcoin_atom_fork_height() -> u64 {
    BITCOIN_ATOM_FORK_HEIGHT
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            fork: Fork::default(),
            static_header_size: None,
            limits: DecodeLimits::default(),
            bitcoin_atom_fork_height: BITCOIN_ATOM_FORK_HEIGHT,
        }
    }
}

/// Parse `key` from `lookup` into `target`; unparsable values are logged and ignored
fn apply_override<T, F>(lookup: &F, key: &str, target: &mut T)
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(key) {
        match val.parse::<T>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(key, value = %val, "ignoring unparsable environment override"),
        }
    }
}

impl DecoderConfig {
    pub fn new(fork: Fork) -> Self {
        Self {
            fork,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern `BLVM_TXCODEC_<SECTION>_<KEY>`:
    /// - `BLVM_TXCODEC_FORK=litecoin`
    /// - `BLVM_TXCODEC_STATIC_HEADER_SIZE=80`
    /// - `BLVM_TXCODEC_LIMITS_MAX_TX_SIZE=1000000`
    /// - `BLVM_TXCODEC_LIMITS_MAX_BLOCK_SIZE=8000000`
    /// - `BLVM_TXCODEC_BITCOIN_ATOM_FORK_HEIGHT=505888`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        apply_override(&lookup, "BLVM_TXCODEC_FORK", &mut config.fork);

        let mut static_header_size = 0usize;
        apply_override(&lookup, "BLVM_TXCODEC_STATIC_HEADER_SIZE", &mut static_header_size);
        if static_header_size > 0 {
            config.static_header_size = Some(static_header_size);
        }

        apply_override(
            &lookup,
            "BLVM_TXCODEC_LIMITS_MAX_TX_SIZE",
            &mut config.limits.max_tx_size,
        );
        apply_override(
            &lookup,
            "BLVM_TXCODEC_LIMITS_MAX_BLOCK_SIZE",
            &mut config.limits.max_block_size,
        );
        apply_override(
            &lookup,
            "BLVM_TXCODEC_BITCOIN_ATOM_FORK_HEIGHT",
            &mut config.bitcoin_atom_fork_height,
        );

        config
    }

    /// Static header size, falling back to the fork's default
    pub fn static_header_size(&self) -> usize {
        self.static_header_size
            .unwrap_or_else(|| self.fork.default_static_header_size())
    }

    /// The fork's header format with configured parameters applied
    pub fn header_format(&self) -> HeaderFormat {
        match self.fork.header_format() {
            HeaderFormat::BitcoinAtom { .. } => HeaderFormat::BitcoinAtom {
                fork_height: self.bitcoin_atom_fork_height,
            },
            format => format,
        }
    }
}

static GLOBAL_DECODER_CONFIG: std::sync::OnceLock<DecoderConfig> = std::sync::OnceLock::new();

/// Initialize global decoder configuration
///
/// Call once at startup. A second call fails and leaves the first config in place.
pub fn init_decoder_config(config: DecoderConfig) -> Result<()> {
    GLOBAL_DECODER_CONFIG
        .set(config)
        .map_err(|_| DecodeError::Config("decoder config already initialized".into()))
}

/// Get global decoder configuration
///
/// Returns the global config if initialized, otherwise reads the environment.
pub fn get_decoder_config() -> DecoderConfig {
    GLOBAL_DECODER_CONFIG
        .get()
        .cloned()
        .unwrap_or_else(DecoderConfig::from_env)
}
