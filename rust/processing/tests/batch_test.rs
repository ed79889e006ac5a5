// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch conversion over a temporary directory tree.

use ian_lite_core::{decode, HEADER_LEN};
use ian_lite_obj::{encode, ObjEncoder};
use ian_lite_processing::{convert_file, discover_ian_files, run_batch, BatchConfig, Error};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One triangle over three vertices, faces first then vertices
fn triangle_ian() -> Vec<u8> {
    let face_offset = HEADER_LEN;
    let vertex_offset = face_offset + 28;

    let mut bytes = vec![0u8; HEADER_LEN];
    for (offset, value) in [(0x14, 1), (0x18, 3), (0x1C, vertex_offset), (0x20, face_offset)] {
        bytes[offset..offset + 2].copy_from_slice(&(value as u16).to_le_bytes());
    }
    for index in [0u32, 1, 2] {
        bytes.extend_from_slice(&[0; 4]);
        bytes.extend_from_slice(&index.to_le_bytes());
    }
    bytes.extend_from_slice(&[0; 4]);

    let vertices: [[f32; 8]; 3] = [
        [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0],
    ];
    for record in vertices {
        for value in record {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }
    bytes
}

fn write(path: &Path, bytes: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn config(input: &Path, output: &Path, jobs: usize) -> BatchConfig {
    let mut config = BatchConfig::new(input, output);
    config.jobs = jobs;
    config
}

#[test]
fn discovers_nested_files_case_insensitively() {
    let input = TempDir::new().unwrap();
    write(&input.path().join("a.ian"), b"");
    write(&input.path().join("pcobject/ships/LFIGHTER.IAN"), b"");
    write(&input.path().join("pcobject/readme.txt"), b"");
    write(&input.path().join("pcobject/tree7.Ian"), b"");

    let files = discover_ian_files(input.path()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|f| f.strip_prefix(input.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        names,
        vec!["a.ian", "pcobject/ships/LFIGHTER.IAN", "pcobject/tree7.Ian"]
    );
}

#[test]
fn missing_input_root() {
    let input = TempDir::new().unwrap();
    let missing = input.path().join("nope");
    let err = run_batch(&config(&missing, input.path(), 1)).unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
}

#[test]
fn empty_input_does_no_work() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let out_root = output.path().join("export");

    let summary = run_batch(&config(input.path(), &out_root, 2)).unwrap();
    assert_eq!(summary.total, 0);
    assert!(summary.is_success());
    assert!(!out_root.exists());
}

#[test]
fn mirrors_tree_and_isolates_failures() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write(&input.path().join("ships/lfighter.ian"), &triangle_ian());
    write(&input.path().join("props/deep/tree7.IAN"), &triangle_ian());
    let mut broken = triangle_ian();
    broken.truncate(60);
    write(&input.path().join("props/broken.ian"), &broken);

    let summary = run_batch(&config(input.path(), output.path(), 4)).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.converted, 2);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].path.ends_with("props/broken.ian"));
    assert!(summary.failed[0].reason.contains("Truncated input"));
    assert_eq!(summary.total_triangles(), 2);
    assert_eq!(summary.total_vertices(), 6);

    let lfighter = fs::read_to_string(output.path().join("ships/lfighter.obj")).unwrap();
    assert!(lfighter.starts_with("o lfighter\n"));
    assert!(lfighter.ends_with("f 1/1/1 3/3/3 2/2/2"));

    let tree = fs::read_to_string(output.path().join("props/deep/tree7.obj")).unwrap();
    assert!(tree.starts_with("o tree7\n"));
    assert!(!output.path().join("props/broken.obj").exists());
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let input = TempDir::new().unwrap();
    for i in 0..6 {
        write(&input.path().join(format!("m{i}.ian")), &triangle_ian());
    }

    let seq_out = TempDir::new().unwrap();
    let par_out = TempDir::new().unwrap();
    let seq = run_batch(&config(input.path(), seq_out.path(), 1)).unwrap();
    let par = run_batch(&config(input.path(), par_out.path(), 3)).unwrap();

    assert_eq!(seq.converted, 6);
    assert_eq!(par.converted, 6);
    for (a, b) in seq.reports.iter().zip(&par.reports) {
        assert_eq!(a.input, b.input);
        assert_eq!(fs::read(&a.output).unwrap(), fs::read(&b.output).unwrap());
    }
}

#[test]
fn strict_mode_rejects_bad_indices() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut bytes = triangle_ian();
    // Third index of the only face: 2 -> 40
    let at = HEADER_LEN + 4 + 2 * 8;
    bytes[at..at + 4].copy_from_slice(&40u32.to_le_bytes());
    write(&input.path().join("bad.ian"), &bytes);

    let mut strict = config(input.path(), output.path(), 1);
    strict.strict = true;
    let summary = run_batch(&strict).unwrap();
    assert_eq!(summary.failed.len(), 1);
    assert!(!output.path().join("bad.obj").exists());

    let lenient = run_batch(&config(input.path(), output.path(), 1)).unwrap();
    assert!(lenient.is_success());
}

#[test]
fn single_file_conversion() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sphinx.ian");
    write(&input, &triangle_ian());
    let output = dir.path().join("nested/out/sphinx.obj");

    let report = convert_file(&input, &output, &ObjEncoder::new()).unwrap();
    assert_eq!(report.vertices, 3);
    assert_eq!(report.triangles, 1);
    assert!(!report.trailer_fallback);

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, encode(&decode(&triangle_ian()).unwrap(), "sphinx"));
}

#[test]
fn case_variant_names_do_not_share_an_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let lower = triangle_ian();
    let mut upper = triangle_ian();
    // First vertex x: 0.0 -> 2.0
    let at = HEADER_LEN + 28;
    upper[at..at + 4].copy_from_slice(&2.0f32.to_le_bytes());
    write(&input.path().join("m.ian"), &lower);
    write(&input.path().join("m.IAN"), &upper);

    let summary = run_batch(&config(input.path(), output.path(), 2)).unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.converted, 1);
    assert_eq!(summary.failed.len(), 1);

    // Sorted discovery puts "m.IAN" first, so it keeps m.obj
    assert!(summary.reports[0].input.ends_with("m.IAN"));
    assert!(summary.failed[0].path.ends_with("m.ian"));
    assert!(summary.failed[0].reason.contains("collides with"));

    let written: Vec<_> = fs::read_dir(output.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(written, vec!["m.obj"]);
    let text = fs::read_to_string(output.path().join("m.obj")).unwrap();
    assert_eq!(text, encode(&decode(&upper).unwrap(), "m"));
    assert!(text.starts_with("o m\nv 2.0 0.0 0.0\n"));
}

#[test]
fn summary_serializes_to_json() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("one.ian"), &triangle_ian());

    let summary = run_batch(&config(input.path(), output.path(), 1)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
    assert_eq!(json["converted"], 1);
    assert_eq!(json["reports"][0]["triangles"], 1);
}
