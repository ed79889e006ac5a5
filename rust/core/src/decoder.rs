// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IAN Decoder - header, face block, vertex block
//!
//! Decoding is strictly sequential: header, then every face record, then
//! every vertex record. The face block is never revisited.

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::header::IanHeader;
use crate::mesh::{Mesh, MeshBuilder, Triangle};
use nalgebra::{Point2, Point3, Vector3};

/// Decode one IAN file into a [`Mesh`]
pub fn decode(bytes: &[u8]) -> Result<Mesh> {
    decode_with_header(bytes).map(|(_, mesh)| mesh)
}

/// Decode one IAN file, returning the parsed header alongside the mesh
pub fn decode_with_header(bytes: &[u8]) -> Result<(IanHeader, Mesh)> {
    let mut cursor = ByteCursor::new(bytes);
    let header = IanHeader::read(&mut cursor)?;

    tracing::debug!(
        face_count = header.face_count,
        face_offset = header.face_offset,
        vertex_count = header.vertex_count,
        vertex_offset = header.vertex_offset,
        trailer_count = header.trailer_count,
        trailer_offset = header.trailer_offset,
        "Parsed IAN header"
    );
    if header.trailer_fallback_applied() {
        tracing::warn!(
            stored = header.stored_trailer_offset,
            effective = header.trailer_offset,
            len = bytes.len(),
            "Trailer offset points past end of input, using end of vertex block"
        );
    }

    header.check_layout(bytes.len())?;

    let mut builder =
        MeshBuilder::with_counts(header.vertex_count as usize, header.face_count as usize);

    if header.face_count > 0 {
        cursor.seek_absolute(header.face_offset as usize)?;
        for _ in 0..header.face_count {
            builder.push_face(read_face(&mut cursor)?);
        }
    }

    if header.vertex_count > 0 {
        cursor.seek_absolute(header.vertex_offset as usize)?;
        for _ in 0..header.vertex_count {
            read_vertex(&mut cursor, &mut builder)?;
        }
    }

    let mesh = builder.build()?;
    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Decoded IAN mesh"
    );
    Ok((header, mesh))
}

/// Read one 28-byte face record.
///
/// On disk each index is preceded by four unknown bytes and the record ends
/// with four more. The second and third indices are swapped to flip the winding.
#[inline]
fn read_face(cursor: &mut ByteCursor<'_>) -> Result<Triangle> {
    cursor.skip(4)?;
    let i1 = cursor.read_u32()?;
    cursor.skip(4)?;
    let i2 = cursor.read_u32()?;
    cursor.skip(4)?;
    let i3 = cursor.read_u32()?;
    cursor.skip(4)?;
    Ok([i1, i3, i2])
}

/// Read one 32-byte vertex record: position, normal, uv
#[inline]
fn read_vertex(cursor: &mut ByteCursor<'_>, builder: &mut MeshBuilder) -> Result<()> {
    let position = Point3::new(cursor.read_f32()?, cursor.read_f32()?, cursor.read_f32()?);
    let normal = Vector3::new(cursor.read_f32()?, cursor.read_f32()?, cursor.read_f32()?);

    let u = cursor.read_f32()?;
    // V is stored top-down
    let v = 1.0 - cursor.read_f32()?;

    builder.push_vertex(position, normal, Point2::new(u, v));
    Ok(())
}
