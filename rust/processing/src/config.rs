// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch configuration loaded from environment variables.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Batch conversion configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned recursively for `.ian` files.
    pub input_root: PathBuf,
    /// Directory receiving the mirrored `.obj` tree.
    pub output_root: PathBuf,
    /// Number of worker threads converting files.
    pub jobs: usize,
    /// Reject faces referencing vertices past the end of the mesh.
    pub strict: bool,
}

impl BatchConfig {
    /// Configuration with defaults for everything but the input root.
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            jobs: num_cpus::get(),
            strict: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `IAN_OUTPUT_DIR`: output root (default `./ian_export_<unix seconds>`)
    /// - `IAN_WORKER_THREADS`: worker count (default: number of CPUs)
    /// - `IAN_STRICT`: `1`/`true` enables strict index checking
    pub fn from_env(input_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: std::env::var("IAN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_output_root()),
            jobs: std::env::var("IAN_WORKER_THREADS")
                .unwrap_or_else(|_| num_cpus::get().to_string())
                .parse()
                .unwrap_or_else(|_| num_cpus::get())
                .max(1),
            strict: std::env::var("IAN_STRICT")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Input root as given
    pub fn input_root(&self) -> &Path {
        &self.input_root
    }
}

/// `ian_export_<unix seconds>` in the current directory
pub fn default_output_root() -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let name = format!("ian_export_{}", secs);
    std::env::current_dir()
        .map(|dir| dir.join(&name))
        .unwrap_or_else(|_| PathBuf::from(name))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
