// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-file conversion: read, decode, encode, write.

use crate::discovery::object_name_for;
use crate::error::{Error, Result};
use ian_lite_obj::ObjEncoder;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of converting one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Source `.ian` file.
    pub input: PathBuf,
    /// Written `.obj` file.
    pub output: PathBuf,
    /// Number of vertices written.
    pub vertices: usize,
    /// Number of triangles written.
    pub triangles: usize,
    /// Whether the stored trailer offset needed the fallback.
    pub trailer_fallback: bool,
}

/// Convert `input` and write the result to `output`, creating parent directories.
///
/// The OBJ object is named after the output file stem.
pub fn convert_file(input: &Path, output: &Path, encoder: &ObjEncoder) -> Result<FileReport> {
    tracing::debug!(input = %input.display(), "Reading file");
    let bytes = fs::read(input).map_err(|e| Error::io(input, e))?;

    let (header, mesh) =
        ian_lite_core::decode_with_header(&bytes).map_err(|source| Error::Decode {
            path: input.to_path_buf(),
            source,
        })?;

    // Encode first: a rejected mesh must not leave a partial file behind
    let name = object_name_for(output);
    let document = encoder
        .encode(&mesh, &name)
        .map_err(|source| Error::Encode {
            path: input.to_path_buf(),
            source,
        })?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::write(output, document).map_err(|e| Error::io(output, e))?;

    tracing::debug!(
        output = %output.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Saved OBJ"
    );

    Ok(FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        trailer_fallback: header.trailer_fallback_applied(),
    })
}
