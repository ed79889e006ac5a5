// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for OBJ encoding
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding OBJ text
#[derive(Error, Debug)]
pub enum Error {
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
