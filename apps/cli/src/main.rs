// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: convert IAN model files to Wavefront OBJ
//!
//! Usage:
//!   ian2obj convert <input folder> [<output folder>]
//!   ian2obj file <model.ian> [--output model.obj]
//!   ian2obj inspect <model.ian>

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ian_lite_core::IanHeader;
use ian_lite_obj::ObjEncoder;
use ian_lite_processing::{convert_file, object_name_for, run_batch, BatchConfig, BatchSummary};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ian2obj",
    version,
    about = "Convert IAN model files to Wavefront OBJ"
)]
struct Cli {
    /// Log per-file details (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert every .ian file under a folder, mirroring its layout
    Convert {
        /// Folder scanned recursively for .ian files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output folder (default: $IAN_OUTPUT_DIR or ./ian_export_<timestamp>)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Worker threads (default: $IAN_WORKER_THREADS or CPU count)
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,

        /// Fail files whose faces reference missing vertices
        #[arg(long)]
        strict: bool,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Convert a single .ian file
    File {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output path, or "-" for stdout (default: input with .obj extension)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Fail if a face references a missing vertex
        #[arg(long)]
        strict: bool,
    },

    /// Print the header fields of a .ian file
    Inspect {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            jobs,
            strict,
            json,
        } => run_convert(input, output, jobs, strict, json),
        Commands::File {
            input,
            output,
            strict,
        } => run_file(&input, output, strict),
        Commands::Inspect { input } => run_inspect(&input),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_convert(
    input: PathBuf,
    output: Option<PathBuf>,
    jobs: Option<usize>,
    strict: bool,
    json: bool,
) -> Result<()> {
    let mut config = BatchConfig::from_env(input);
    if let Some(output) = output {
        config.output_root = output;
    } else if std::env::var_os("IAN_OUTPUT_DIR").is_none() {
        tracing::info!(
            output = %config.output_root.display(),
            "No output folder specified"
        );
    }
    if let Some(jobs) = jobs {
        config.jobs = jobs.max(1);
    }
    config.strict |= strict;

    let summary = run_batch(&config)
        .with_context(|| format!("Failed to convert {}", config.input_root.display()))?;

    if json {
        println!("{}", summary.to_json()?);
    } else {
        print_summary(&summary);
    }

    if !summary.is_success() {
        bail!("{} of {} file(s) failed", summary.failed.len(), summary.total);
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    if summary.total == 0 {
        println!("No .ian files found");
        return;
    }
    println!(
        "Converted {}/{} file(s) into {} ({} vertices, {} triangles, {} ms)",
        summary.converted,
        summary.total,
        summary.output_root.display(),
        summary.total_vertices(),
        summary.total_triangles(),
        summary.total_time_ms
    );
    for failure in &summary.failed {
        println!("  FAILED {}: {}", failure.path.display(), failure.reason);
    }
}

fn run_file(input: &Path, output: Option<PathBuf>, strict: bool) -> Result<()> {
    let encoder = ObjEncoder::new().strict(strict);
    let output = output.unwrap_or_else(|| input.with_extension("obj"));

    if output.as_os_str() == "-" {
        let bytes =
            std::fs::read(input).with_context(|| format!("Cannot read {}", input.display()))?;
        let mesh = ian_lite_core::decode(&bytes)
            .with_context(|| format!("Cannot decode {}", input.display()))?;
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        encoder.write_to(&mesh, &object_name_for(input), &mut lock)?;
        writeln!(lock)?;
        return Ok(());
    }

    let report = convert_file(input, &output, &encoder)?;
    println!(
        "Saved {} ({} vertices, {} triangles)",
        report.output.display(),
        report.vertices,
        report.triangles
    );
    Ok(())
}

fn run_inspect(input: &Path) -> Result<()> {
    let bytes = std::fs::read(input).with_context(|| format!("Cannot read {}", input.display()))?;
    let header = IanHeader::parse(&bytes)
        .with_context(|| format!("Cannot parse header of {}", input.display()))?;

    println!("File            : {}", input.display());
    println!("Size            : {} bytes", bytes.len());
    if let Some(name) = IanHeader::embedded_name(&bytes) {
        println!("Embedded name   : {}", name);
    }
    println!("Faces count     : {}", header.face_count);
    println!("Faces offset    : {}", header.face_offset);
    println!("Vertices count  : {}", header.vertex_count);
    println!("Vertices offset : {}", header.vertex_offset);
    println!("Trailer count   : {}", header.trailer_count);
    if header.trailer_fallback_applied() {
        println!(
            "Trailer offset  : {} (stored {} is past end of file)",
            header.trailer_offset, header.stored_trailer_offset
        );
    } else {
        println!("Trailer offset  : {}", header.trailer_offset);
    }

    match header.check_layout(bytes.len()) {
        Ok(()) => println!("Layout          : ok"),
        Err(e) => println!("Layout          : {}", e),
    }
    Ok(())
}
