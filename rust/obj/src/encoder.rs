// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OBJ Encoder - mesh to Wavefront OBJ text
//!
//! Line order is fixed: `o`, every `v`, every `vt`, every `vn`, every `f`.
//! Lines are joined with `\n` and the document has no trailing newline.
//! Face indices are 1-based and each corner repeats its index for the
//! position, texture and normal slots (`f 1/1/1 3/3/3 2/2/2`).
//!
//! Finite floats use the shortest text that reads back to the same `f32`
//! (`1.0`, `0.5`, `-2.25`). Non-finite values are written as `nan`, `inf`
//! and `-inf`.

use crate::error::{Error, Result};
use ian_lite_core::Mesh;
use std::io::Write;

/// Encode a mesh without index validation
pub fn encode(mesh: &Mesh, object_name: &str) -> String {
    let mut out = String::with_capacity(estimate_len(mesh, object_name));
    write_document(&mut out, mesh, object_name);
    out
}

/// Configurable OBJ encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjEncoder {
    strict: bool,
}

impl ObjEncoder {
    /// Create an encoder that passes face indices through unchecked
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject faces that reference a vertex past the end of the mesh
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether strict index checking is enabled
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Encode to an in-memory document
    pub fn encode(&self, mesh: &Mesh, object_name: &str) -> Result<String> {
        if self.strict {
            check_indices(mesh)?;
        }
        Ok(encode(mesh, object_name))
    }

    /// Encode and write the document to `writer`
    pub fn write_to<W: Write>(&self, mesh: &Mesh, object_name: &str, mut writer: W) -> Result<()> {
        let document = self.encode(mesh, object_name)?;
        writer.write_all(document.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn check_indices(mesh: &Mesh) -> Result<()> {
    let vertex_count = mesh.vertex_count();
    for (face, triangle) in mesh.faces().iter().enumerate() {
        for &index in triangle {
            if index as usize >= vertex_count {
                return Err(Error::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
    }
    Ok(())
}

fn write_document(out: &mut String, mesh: &Mesh, object_name: &str) {
    out.push_str("o ");
    out.push_str(object_name);

    for v in mesh.vertices() {
        out.push_str("\nv");
        push_floats(out, &[v.x, v.y, v.z]);
    }

    for uv in mesh.uvs() {
        out.push_str("\nvt");
        push_floats(out, &[uv.x, uv.y]);
    }

    for n in mesh.normals() {
        out.push_str("\nvn");
        push_floats(out, &[n.x, n.y, n.z]);
    }

    for face in mesh.faces() {
        out.push_str("\nf");
        for &index in face {
            // OBJ indices are 1-based
            let index = index as u64 + 1;
            out.push(' ');
            push_int(out, index);
            out.push('/');
            push_int(out, index);
            out.push('/');
            push_int(out, index);
        }
    }
}

/// Append `values`, each preceded by a space
#[inline]
fn push_floats(out: &mut String, values: &[f32]) {
    let mut buffer = [0u8; lexical_core::BUFFER_SIZE];
    for &value in values {
        out.push(' ');
        if value.is_nan() {
            out.push_str("nan");
        } else if value.is_infinite() {
            out.push_str(if value > 0.0 { "inf" } else { "-inf" });
        } else {
            let digits = lexical_core::write(value, &mut buffer);
            // lexical output is ASCII
            out.extend(digits.iter().map(|&b| b as char));
        }
    }
}

#[inline]
fn push_int(out: &mut String, value: u64) {
    let mut buffer = [0u8; lexical_core::BUFFER_SIZE];
    let digits = lexical_core::write(value, &mut buffer);
    out.extend(digits.iter().map(|&b| b as char));
}

/// Rough output size so the document is built without reallocating
fn estimate_len(mesh: &Mesh, object_name: &str) -> usize {
    2 + object_name.len()
        + mesh.vertex_count() * (3 * 12 + 4)
        + mesh.uvs().len() * (2 * 12 + 4)
        + mesh.normals().len() * (3 * 12 + 4)
        + mesh.triangle_count() * (3 * 3 * 7 + 3)
}
