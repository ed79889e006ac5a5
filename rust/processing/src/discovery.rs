// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input discovery and output path mapping.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of IAN model files, matched case-insensitively
pub const IAN_EXTENSION: &str = "ian";
/// Extension written for converted files
pub const OBJ_EXTENSION: &str = "obj";

/// Check whether `path` carries the `.ian` extension in any case
pub fn is_ian_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(IAN_EXTENSION))
        .unwrap_or(false)
}

/// Recursively collect every `.ian` file under `root`, sorted by path.
///
/// A `root` that is itself an `.ian` file yields just that file.
pub fn discover_ian_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::InputNotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(if is_ian_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;

            if file_type.is_dir() {
                pending.push(path);
            } else if is_ian_file(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Mirror `file`'s position under `input_root` into `output_root`, with an `.obj` extension.
///
/// `input_root/a/b/model.IAN` maps to `output_root/a/b/model.obj`. When
/// `input_root` is the file itself, the result is `output_root/model.obj`.
pub fn output_path_for(input_root: &Path, file: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative = if input_root == file {
        file.file_name().map(PathBuf::from)
    } else {
        file.strip_prefix(input_root).ok().map(Path::to_path_buf)
    };

    let relative = relative
        .filter(|rel| rel.file_name().is_some())
        .ok_or_else(|| Error::InvalidPath {
            path: file.to_path_buf(),
            root: input_root.to_path_buf(),
        })?;

    Ok(output_root.join(relative).with_extension(OBJ_EXTENSION))
}

/// OBJ object name for an output path: its file stem
pub fn object_name_for(output: &Path) -> String {
    output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
