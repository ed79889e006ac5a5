// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IAN-Lite OBJ Export
//!
//! Encodes decoded IAN meshes as Wavefront OBJ text using
//! [lexical-core](https://docs.rs/lexical-core) for float formatting.

pub mod encoder;
pub mod error;

pub use encoder::{encode, ObjEncoder};
pub use error::{Error, Result};
