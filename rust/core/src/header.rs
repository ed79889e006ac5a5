// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IAN file header
//!
//! The header is a run of little-endian `u16` fields, each padded to four
//! bytes, at fixed absolute offsets:
//!
//! | offset | field |
//! |--------|-------|
//! | `0x14` | face count |
//! | `0x18` | vertex count |
//! | `0x1C` | vertex block offset |
//! | `0x20` | face block offset |
//! | `0x24` | 68 unknown bytes |
//! | `0x68` | trailer record count |
//! | `0x6C` | trailer offset |
//!
//! The trailer fields are advisory. Nothing downstream consumes them.

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};

/// Absolute offset of the face count field
pub const FIELDS_OFFSET: usize = 0x14;
/// Unknown bytes between the face block offset and the trailer count
pub const UNKNOWN_BLOCK_LEN: usize = 0x44;
/// Absolute offset of the NUL-terminated model name
pub const NAME_OFFSET: usize = 0x78;
/// On-disk size of one face record
pub const FACE_RECORD_SIZE: usize = 28;
/// On-disk size of one vertex record
pub const VERTEX_RECORD_SIZE: usize = 32;
/// Bytes the header occupies up to and including the trailer offset field
pub const HEADER_LEN: usize = FIELDS_OFFSET + 4 * 4 + UNKNOWN_BLOCK_LEN + 2 * 4;

/// Decoded IAN header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IanHeader {
    /// Number of face records (`0x14`)
    pub face_count: u16,
    /// Number of vertex records (`0x18`)
    pub vertex_count: u16,
    /// Absolute offset of the vertex block (`0x1C`)
    pub vertex_offset: u16,
    /// Absolute offset of the face block (`0x20`)
    pub face_offset: u16,
    /// Trailer record count as stored (`0x68`)
    pub trailer_count: u16,
    /// Trailer offset as stored (`0x6C`)
    pub stored_trailer_offset: u16,
    /// Trailer offset after the out-of-range fallback
    pub trailer_offset: usize,
    /// Whether the stored trailer offset pointed past the input
    pub trailer_fallback: bool,
}

impl IanHeader {
    /// Decode the header fields, leaving the cursor just past the trailer offset
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        cursor.seek_absolute(FIELDS_OFFSET)?;

        let face_count = cursor.read_u16_padded()?;
        let vertex_count = cursor.read_u16_padded()?;
        let vertex_offset = cursor.read_u16_padded()?;
        let face_offset = cursor.read_u16_padded()?;

        cursor.skip(UNKNOWN_BLOCK_LEN)?;

        let trailer_count = cursor.read_u16_padded()?;
        let stored_trailer_offset = cursor.read_u16_padded()?;

        let trailer_offset = effective_trailer_offset(
            stored_trailer_offset,
            vertex_offset,
            vertex_count,
            cursor.len(),
        );

        Ok(Self {
            face_count,
            vertex_count,
            vertex_offset,
            face_offset,
            trailer_count,
            stored_trailer_offset,
            trailer_offset,
            trailer_fallback: stored_trailer_offset as usize > cursor.len(),
        })
    }

    /// Parse the header from the start of a file
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::read(&mut ByteCursor::new(bytes))
    }

    /// True when the stored trailer offset pointed past the input and was recomputed
    #[inline]
    pub fn trailer_fallback_applied(&self) -> bool {
        self.trailer_fallback
    }

    /// End of the vertex block (`vertex_offset + vertex_count * 32`)
    #[inline]
    pub fn vertex_block_end(&self) -> usize {
        self.vertex_offset as usize + self.vertex_count as usize * VERTEX_RECORD_SIZE
    }

    /// End of the face block (`face_offset + face_count * 28`)
    #[inline]
    pub fn face_block_end(&self) -> usize {
        self.face_offset as usize + self.face_count as usize * FACE_RECORD_SIZE
    }

    /// Check that both record blocks fit inside an input of `len` bytes.
    ///
    /// Zero counts are always accepted whatever their offsets say.
    pub fn check_layout(&self, len: usize) -> Result<()> {
        check_block(
            "face",
            self.face_count,
            self.face_offset,
            self.face_block_end(),
            len,
        )?;
        check_block(
            "vertex",
            self.vertex_count,
            self.vertex_offset,
            self.vertex_block_end(),
            len,
        )
    }

    /// Model name stored as a NUL-terminated string at `0x78`, if one is present
    pub fn embedded_name(bytes: &[u8]) -> Option<&str> {
        let tail = bytes.get(NAME_OFFSET..)?;
        let end = tail.iter().position(|&b| b == 0)?;
        let name = std::str::from_utf8(&tail[..end]).ok()?;
        if name.is_empty() || name.chars().any(char::is_control) {
            return None;
        }
        Some(name)
    }
}

/// Apply the trailer fallback: a stored offset past the end of the input
/// is replaced by the end of the vertex block
pub fn effective_trailer_offset(
    stored: u16,
    vertex_offset: u16,
    vertex_count: u16,
    input_len: usize,
) -> usize {
    let stored = stored as usize;
    if stored > input_len {
        vertex_offset as usize + vertex_count as usize * VERTEX_RECORD_SIZE
    } else {
        stored
    }
}

fn check_block(kind: &str, count: u16, offset: u16, end: usize, len: usize) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    let offset = offset as usize;
    if offset > len {
        return Err(Error::TruncatedInput {
            offset,
            needed: 0,
            len,
        });
    }
    if end > len {
        return Err(Error::UnsupportedLayout(format!(
            "{} {} records at offset {} end at byte {}, past the {} byte input",
            count, kind, offset, end, len
        )));
    }
    Ok(())
}
