// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for IAN decoding
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding an IAN file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Truncated input: {needed} byte(s) requested at offset {offset}, but input is {len} bytes")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Unsupported layout: {0}")]
    UnsupportedLayout(String),

    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),
}

impl Error {
    /// Returns true for errors caused by reading past the end of the input
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::TruncatedInput { .. })
    }
}
