//! Bounds-checked forward reader over an immutable byte buffer
//!
//! Every decoder in this crate threads one `ByteCursor` through its reads.
//! All multi-byte integers are little-endian except [`ByteCursor::read_u16_be`].
//! A read that would run past the end of the buffer fails with
//! [`DecodeError::BufferUnderflow`] and leaves the position unchanged.

use crate::error::{DecodeError, Result};

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    /// Cursor positioned at `start`
    pub fn at(data: &'a [u8], start: usize) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        cursor.set_position(start)?;
        Ok(cursor)
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reposition the cursor; `position == len` is allowed
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(DecodeError::InvalidPosition {
                position,
                len: self.data.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    /// The underlying buffer
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes from `start` up to the current position
    ///
    /// An out-of-order `start` yields an empty span.
    pub fn span_from(&self, start: usize) -> &'a [u8] {
        let start = start.min(self.pos);
        &self.data[start..self.pos]
    }

    #[inline]
    fn underflow(&self, needed: u64) -> DecodeError {
        DecodeError::BufferUnderflow {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }

    /// Take the next `n` bytes, borrowed from the buffer
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.underflow(n as u64));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// 32-byte hash in wire order
    #[inline]
    pub fn read_hash(&mut self) -> Result<[u8; 32]> {
        self.read_array::<32>()
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Big-endian u16; the only big-endian field in the formats decoded here
    #[inline]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_i64_le(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Compact-size integer
    ///
    /// Non-minimal encodings (e.g. `0xfd 0x01 0x00`) are accepted and decode
    /// to their numeric value. On underflow the position is restored to the
    /// prefix byte.
    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.pos;
        let value = match self.read_u8()? {
            0xfd => self.read_u16_le().map(u64::from),
            0xfe => self.read_u32_le().map(u64::from),
            0xff => self.read_u64_le(),
            n => Ok(u64::from(n)),
        };
        if value.is_err() {
            self.pos = start;
        }
        value
    }

    /// Length-prefixed byte string, borrowed from the buffer
    pub fn read_varbytes(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = self.read_varint()?;
        if len > self.remaining() as u64 {
            let err = self.underflow(len);
            self.pos = start;
            return Err(err);
        }
        self.read_bytes(len as usize)
    }

    /// Byte at `position + offset` without advancing
    pub fn peek_byte(&self, offset: usize) -> Result<u8> {
        match self.pos.checked_add(offset) {
            Some(index) if index < self.data.len() => Ok(self.data[index]),
            _ => Err(DecodeError::BufferUnderflow {
                offset: self.pos,
                needed: offset as u64 + 1,
                remaining: self.remaining(),
            }),
        }
    }

    /// Little-endian i32 at the current position without advancing
    pub fn peek_i32_le(&self) -> Result<i32> {
        let mut probe = self.clone();
        probe.read_i32_le()
    }

    /// Advance by `n` bytes
    #[inline]
    pub fn skip(&mut self, n: u64) -> Result<()> {
        if n > self.remaining() as u64 {
            return Err(self.underflow(n));
        }
        self.pos += n as usize;
        Ok(())
    }

    /// Advance past `count` fixed-width records
    ///
    /// `count` usually comes straight off the wire, so the product is
    /// overflow-checked before the bounds check.
    pub fn skip_records(&mut self, count: u64, width: usize) -> Result<()> {
        match count.checked_mul(width as u64) {
            Some(total) => self.skip(total),
            None => Err(self.underflow(u64::MAX)),
        }
    }

    /// Read `count` fixed-width records as one contiguous span
    pub fn read_records(&mut self, count: u64, width: usize) -> Result<&'a [u8]> {
        let start = self.pos;
        self.skip_records(count, width)?;
        Ok(&self.data[start..self.pos])
    }
}


#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Kani proof: reads never move the cursor past the buffer
    #[kani::proof]
    #[kani::unwind(10)]
    fn kani_cursor_stays_in_bounds() {
        let data: [u8; 8] = kani::any();
        let start: usize = kani::any();
        kani::assume(start <= data.len());
        let mut cursor = ByteCursor::at(&data, start).unwrap();

        let _ = cursor.read_varint();
        assert!(cursor.position() <= data.len());
        let _ = cursor.read_u32_le();
        assert!(cursor.position() <= data.len());
        let n: u64 = kani::any();
        let _ = cursor.skip(n);
        assert!(cursor.position() <= data.len());
    }
}
