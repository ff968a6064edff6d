//! Error and outcome types for transaction decoding
//!
//! Decoding distinguishes two ways of not producing a transaction:
//! - [`DecodeError`]: the bytes are malformed or truncated. The caller's
//!   position in the buffer is no longer meaningful.
//! - [`Outcome::Skip`]: the bytes are well-formed but describe a transaction
//!   the indexer deliberately ignores (Litecoin MWEB-only transactions).
//!
//! Keeping the two apart means a routine skip can never be mistaken for
//! a crash-worthy failure.

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DecodeError {
    #[error("Buffer underflow at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    BufferUnderflow {
        offset: usize,
        needed: u64,
        remaining: usize,
    },

    #[error("Witness count mismatch: {inputs} inputs, {witnesses} witness records")]
    WitnessCountMismatch { inputs: usize, witnesses: u64 },

    #[error("Unexpected skip signal: {0}")]
    UnexpectedSkip(SkipReason),

    #[error("Buffer of {len} bytes exceeds configured limit of {limit}")]
    BufferTooLarge { len: usize, limit: usize },

    #[error("Invalid cursor position {position} for buffer of {len} bytes")]
    InvalidPosition { position: usize, len: usize },

    #[error("Unknown fork: {0}")]
    UnknownFork(String),

    #[error("Configuration error: {0}")]
    Config(Cow<'static, str>),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Why a well-formed transaction was not decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Litecoin flag byte was zero: the transaction only moves MWEB value
    MwebOnlyNoRegularIo,
    /// Litecoin MWEB extension present and its payload marker is non-null
    NonNullMwebPayload,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MwebOnlyNoRegularIo => write!(f, "MWEB-only transaction"),
            SkipReason::NonNullMwebPayload => write!(f, "non-null MWEB payload"),
        }
    }
}

/// Result of a decode that may legitimately decline to produce a value
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Decoded(T),
    Skip(SkipReason),
}

impl<T> Outcome<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Decoded(value) => Outcome::Decoded(f(value)),
            Outcome::Skip(reason) => Outcome::Skip(reason),
        }
    }

    /// The decoded value, or `None` when skipped
    pub fn decoded(self) -> Option<T> {
        match self {
            Outcome::Decoded(value) => Some(value),
            Outcome::Skip(_) => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Outcome::Decoded(_) => None,
            Outcome::Skip(reason) => Some(*reason),
        }
    }

    /// Convert a skip into [`DecodeError::UnexpectedSkip`]
    ///
    /// Used where the surrounding structure (a block's transaction list, an
    /// AuxPow parent coinbase) has no way to represent a skipped entry.
    pub fn require_decoded(self) -> Result<T> {
        match self {
            Outcome::Decoded(value) => Ok(value),
            Outcome::Skip(reason) => Err(DecodeError::UnexpectedSkip(reason)),
        }
    }
}
