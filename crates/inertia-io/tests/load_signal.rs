// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_io::{SignalFormat, load_signal};
use std::fs;

#[test]
fn loads_single_column_csv() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("PURE.csv");
    fs::write(&path, "0.0\n0.5\n1.0\n").expect("csv should be written");

    let loaded = load_signal(&path).expect("csv should load");
    assert_eq!(loaded.format, SignalFormat::Csv);
    assert_eq!(loaded.shape, (3, 1));
    assert_eq!(loaded.signal.values(), &[0.0, 0.5, 1.0]);
    assert_eq!(loaded.path, path);
}

#[test]
fn loads_whitespace_text_and_flattens() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("grid.txt");
    fs::write(&path, "1 2 3\n4 5 6\n").expect("txt should be written");

    let loaded = load_signal(&path).expect("txt should load");
    assert_eq!(loaded.shape, (2, 3));
    assert_eq!(loaded.len(), 6);
    assert_eq!(
        loaded.into_signal().into_values(),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
    );
}

#[test]
fn empty_file_is_an_empty_signal() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").expect("csv should be written");

    let loaded = load_signal(&path).expect("empty csv is degenerate, not invalid");
    assert!(loaded.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let err = load_signal(dir.path().join("absent.csv")).expect_err("missing file");
    assert_eq!(err.code(), "io_error");
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn non_finite_cells_are_invalid_input() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("nan.csv");
    fs::write(&path, "1.0\nnan\n").expect("csv should be written");

    let err = load_signal(&path).expect_err("nan should be rejected");
    assert_eq!(err.code(), "invalid_input");
}

#[test]
fn loads_npy_written_by_hand() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("ramp.npy");

    let mut header = "{'descr': '<f8', 'fortran_order': False, 'shape': (4,), }".to_string();
    let padding = (16 - ((10 + header.len() + 1) % 16)) % 16;
    header.push_str(&" ".repeat(padding));
    header.push('\n');
    let mut bytes = b"\x93NUMPY\x01\x00".to_vec();
    bytes.extend_from_slice(&(header.len() as u16).to_le_bytes());
    bytes.extend_from_slice(header.as_bytes());
    for value in [-1.0f64, -0.5, 0.5, 1.0] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    fs::write(&path, bytes).expect("npy should be written");

    let loaded = load_signal(&path).expect("npy should load");
    assert_eq!(loaded.format, SignalFormat::Npy);
    assert_eq!(loaded.signal.values(), &[-1.0, -0.5, 0.5, 1.0]);
}
