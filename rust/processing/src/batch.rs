// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch conversion with parallel per-file processing.
//!
//! Every file is independent: a failure is recorded in the summary and the
//! remaining files are still converted. Output paths are assigned before any
//! work starts; when two inputs map to the same `.obj` (`m.ian` and `m.IAN`),
//! the first in discovery order keeps it and the others fail.

use crate::config::BatchConfig;
use crate::discovery::{discover_ian_files, output_path_for};
use crate::error::{Error, Result};
use crate::pipeline::{convert_file, FileReport};
use ian_lite_obj::ObjEncoder;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// A file that could not be converted.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// Source `.ian` file.
    pub path: PathBuf,
    /// Human-readable reason.
    pub reason: String,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Number of `.ian` files found.
    pub total: usize,
    /// Number of files converted successfully.
    pub converted: usize,
    /// Files that failed, in discovery order.
    pub failed: Vec<FileFailure>,
    /// Per-file results for converted files, in discovery order.
    pub reports: Vec<FileReport>,
    /// Root the outputs were written under.
    pub output_root: PathBuf,
    /// Wall-clock time of the run (ms).
    pub total_time_ms: u64,
}

impl BatchSummary {
    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total vertices written across all files
    pub fn total_vertices(&self) -> usize {
        self.reports.iter().map(|r| r.vertices).sum()
    }

    /// Total triangles written across all files
    pub fn total_triangles(&self) -> usize {
        self.reports.iter().map(|r| r.triangles).sum()
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Discover and convert every `.ian` file under `config.input_root`.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    let start = Instant::now();

    tracing::info!(input = %config.input_root.display(), "Scanning input folder for .ian files");
    let files = discover_ian_files(&config.input_root)?;

    let mut summary = BatchSummary {
        total: files.len(),
        output_root: config.output_root.clone(),
        ..Default::default()
    };

    if files.is_empty() {
        tracing::info!("No .ian files found");
        return Ok(summary);
    }

    let encoder = ObjEncoder::new().strict(config.strict);
    let outputs = assign_outputs(config, &files);

    tracing::info!(
        total = files.len(),
        jobs = config.jobs,
        strict = encoder.is_strict(),
        output = %config.output_root.display(),
        "Found .ian file(s)"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs.max(1))
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    let processed = AtomicUsize::new(0);
    let total = files.len();

    let results: Vec<(PathBuf, Result<FileReport>)> = pool.install(|| {
        files
            .par_iter()
            .zip(outputs)
            .map(|(file, output)| {
                let result = output.and_then(|output| convert_file(file, &output, &encoder));

                let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                match &result {
                    Ok(report) => tracing::info!(
                        processed = done,
                        total,
                        file = %file.display(),
                        output = %report.output.display(),
                        "Processed file"
                    ),
                    Err(e) => tracing::error!(
                        processed = done,
                        total,
                        file = %file.display(),
                        error = %e,
                        "Failed to convert file"
                    ),
                }
                (file.clone(), result)
            })
            .collect()
    });

    for (path, result) in results {
        match result {
            Ok(report) => {
                summary.converted += 1;
                summary.reports.push(report);
            }
            Err(e) => summary.failed.push(FileFailure {
                path,
                reason: e.to_string(),
            }),
        }
    }

    summary.total_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        converted = summary.converted,
        failed = summary.failed.len(),
        total_time_ms = summary.total_time_ms,
        "Finished processing .ian file(s)"
    );

    Ok(summary)
}

/// Map every input to its output path, in discovery order.
///
/// Later inputs whose output is already taken get [`Error::OutputCollision`].
fn assign_outputs(config: &BatchConfig, files: &[PathBuf]) -> Vec<Result<PathBuf>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::with_capacity(files.len());
    files
        .iter()
        .map(|file| {
            let output = output_path_for(&config.input_root, file, &config.output_root)?;
            if let Some(first) = claimed.get(&output) {
                return Err(Error::OutputCollision {
                    output,
                    first: first.to_path_buf(),
                });
            }
            claimed.insert(output.clone(), file);
            Ok(output)
        })
        .collect()
}
