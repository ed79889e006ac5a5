// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared IAN to OBJ conversion pipeline.
//!
//! Walks an input tree for `.ian` files, mirrors it under an output root and
//! converts each file independently on a rayon pool.

pub mod batch;
pub mod config;
pub mod discovery;
pub mod error;
pub mod pipeline;

pub use batch::{run_batch, BatchSummary, FileFailure};
pub use config::{default_output_root, BatchConfig};
pub use discovery::{discover_ian_files, is_ian_file, object_name_for, output_path_for};
pub use error::{Error, Result};
pub use pipeline::{convert_file, FileReport};
