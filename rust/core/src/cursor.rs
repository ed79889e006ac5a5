// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Byte Cursor - bounds-checked little-endian reads
//!
//! Every read, skip and seek is checked against the buffer length. A failed
//! operation returns [`Error::TruncatedInput`] and leaves the position untouched.

use crate::error::{Error, Result};

/// Read position over an in-memory byte buffer
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at offset 0
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current absolute offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the underlying buffer is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes left between the current position and the end
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Move to an absolute offset. Seeking exactly to the end is allowed.
    pub fn seek_absolute(&mut self, offset: usize) -> Result<()> {
        if offset > self.bytes.len() {
            return Err(Error::TruncatedInput {
                offset,
                needed: 0,
                len: self.bytes.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Advance by `count` bytes without interpreting them
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take_array::<2>()?;
        Ok(u16::from_le_bytes(bytes))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take_array::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        let bytes = self.take_array::<4>()?;
        Ok(f32::from_le_bytes(bytes))
    }

    /// Read a u16 field followed by two bytes of padding
    #[inline]
    pub fn read_u16_padded(&mut self) -> Result<u16> {
        // A short slot must not move the cursor
        self.ensure(4)?;
        let value = self.read_u16()?;
        self.skip(2)?;
        Ok(value)
    }

    fn ensure(&self, count: usize) -> Result<()> {
        match self.pos.checked_add(count) {
            Some(end) if end <= self.bytes.len() => Ok(()),
            _ => Err(Error::TruncatedInput {
                offset: self.pos,
                needed: count,
                len: self.bytes.len(),
            }),
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        self.ensure(count)?;
        let bytes = self.bytes;
        let slice = &bytes[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let mut bytes = vec![0x34, 0x12];
        bytes.extend_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        bytes.extend_from_slice(&1.5f32.to_le_bytes());

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(cursor.read_f32().unwrap(), 1.5);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_is_truncated() {
        let bytes = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&bytes);
        cursor.skip(1).unwrap();

        let err = cursor.read_u32().unwrap_err();
        assert_eq!(
            err,
            Error::TruncatedInput {
                offset: 1,
                needed: 4,
                len: 3
            }
        );
        // Failed reads leave the position alone
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.read_u16().unwrap(), 0x0302);
    }

    #[test]
    fn test_seek_bounds() {
        let bytes = [0u8; 8];
        let mut cursor = ByteCursor::new(&bytes);

        cursor.seek_absolute(8).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.read_u16().unwrap_err().is_truncated());

        assert!(cursor.seek_absolute(9).unwrap_err().is_truncated());
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_padded_u16() {
        let bytes = [0x05, 0x00, 0xCD, 0xCD, 0x07, 0x00, 0xCD];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_u16_padded().unwrap(), 5);
        assert_eq!(cursor.position(), 4);

        // Only three bytes left: the padded slot does not fit
        assert!(cursor.read_u16_padded().is_err());
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_skip_overflow() {
        let bytes = [0u8; 4];
        let mut cursor = ByteCursor::new(&bytes);
        cursor.skip(2).unwrap();
        assert!(cursor.skip(usize::MAX).is_err());
        assert_eq!(cursor.position(), 2);
    }
}
