//! Compact-size integer encoding/decoding
//!
//! The compact-size integer prefixes every count and byte-string length in the
//! wire formats decoded by this crate. It uses 1, 3, 5 or 9 bytes:
//!
//! - value < 0xfd: single byte
//! - 0xfd prefix + 2 bytes (little-endian)
//! - 0xfe prefix + 4 bytes (little-endian)
//! - 0xff prefix + 8 bytes (little-endian)
//!
//! Encoding is always minimal. Decoding accepts non-minimal forms, matching
//! what historical blocks on several forks actually contain.

use crate::cursor::ByteCursor;
use crate::error::Result;

/// Encode a u64 value as a compact-size integer
///
/// # Examples
///
/// ```
/// use blvm_txcodec::serialization::varint::encode_varint;
///
/// assert_eq!(encode_varint(0), vec![0]);
/// assert_eq!(encode_varint(252), vec![252]);
/// assert_eq!(encode_varint(253), vec![0xfd, 253, 0]);
/// assert_eq!(encode_varint(65535), vec![0xfd, 255, 255]);
/// assert_eq!(encode_varint(65536), vec![0xfe, 0, 0, 1, 0]);
/// ```
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_size(value));
    write_varint(&mut out, value);
    out
}

/// Append the compact-size encoding of `value` to `out`
pub fn write_varint(out: &mut Vec<u8>, value: u64) {
    if value < 0xfd {
        out.push(value as u8);
    } else if value <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Append a compact-size length prefix followed by `bytes`
pub fn write_varbytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_varint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// Size in bytes of the minimal encoding of `value`
#[inline]
pub fn varint_size(value: u64) -> usize {
    if value < 0xfd {
        1
    } else if value <= 0xffff {
        3
    } else if value <= 0xffff_ffff {
        5
    } else {
        9
    }
}

/// Decode a compact-size integer from the start of `data`
///
/// Returns the value and the number of bytes consumed.
///
/// # Examples
///
/// ```
/// use blvm_txcodec::serialization::varint::decode_varint;
///
/// assert_eq!(decode_varint(&[0x2a]).unwrap(), (42, 1));
/// assert_eq!(decode_varint(&[0xfd, 0x2a, 0x00]).unwrap(), (42, 3));
/// ```
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    let mut cursor = ByteCursor::new(data);
    let value = cursor.read_varint()?;
    Ok((value, cursor.position()))
}


#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Kani proof: every value decodes back from its encoding
    #[kani::proof]
    #[kani::unwind(10)]
    fn kani_varint_round_trip() {
        let value: u64 = kani::any();
        let encoded = encode_varint(value);
        assert_eq!(encoded.len(), varint_size(value));
        let (decoded, consumed) = decode_varint(&encoded).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(consumed, encoded.len());
    }

    /// Kani proof: decoding never reads past the buffer
    #[kani::proof]
    #[kani::unwind(10)]
    fn kani_varint_bounded_read() {
        let data: [u8; 9] = kani::any();
        let len: usize = kani::any();
        kani::assume(len <= data.len());
        if let Ok((_, consumed)) = decode_varint(&data[..len]) {
            assert!(consumed <= len);
        }
    }
}
