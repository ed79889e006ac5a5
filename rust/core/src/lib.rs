// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IAN-Lite Core Decoder
//!
//! Bounds-checked decoder for the IAN binary mesh container.
//!
//! ## Overview
//!
//! - **Byte Cursor**: little-endian reads that fail with [`Error::TruncatedInput`]
//!   instead of reading out of bounds
//! - **Typed Header**: named fields at documented fixed offsets, including
//!   the advisory trailer with its out-of-range fallback
//! - **Mesh**: immutable position/normal/uv bundles plus triangles sharing
//!   one index space
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ian_lite_core::decode;
//!
//! let bytes = std::fs::read("lfighter.ian")?;
//! let mesh = decode(&bytes)?;
//! println!("{} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for [`Mesh`] and [`IanHeader`]

pub mod cursor;
pub mod decoder;
pub mod error;
pub mod header;
pub mod mesh;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use cursor::ByteCursor;
pub use decoder::{decode, decode_with_header};
pub use error::{Error, Result};
pub use header::{
    effective_trailer_offset, IanHeader, FACE_RECORD_SIZE, HEADER_LEN, VERTEX_RECORD_SIZE,
};
pub use mesh::{Mesh, MeshBuilder, Triangle};
