//! Tests for the rename table
//!
//! These tests verify:
//! - Write then read yields the same association
//! - Output is deterministic
//! - Missing or malformed documents fail

use std::collections::HashMap;
use std::path::Path;

use bulkmeta::fs::MemFs;
use bulkmeta::rename::{read_rename_map, write_rename_map};
use bulkmeta::BulkError;

use crate::common::{failing_input, failing_output, table, BULK_DIR};

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_renames() -> HashMap<String, String> {
    ["f1", "f2", "f3", "f4", "f5"]
        .iter()
        .map(|f| (format!("old_{f}.rf"), format!("new_{f}.rf")))
        .collect()
}

fn rename_path() -> std::path::PathBuf {
    Path::new(BULK_DIR).join("renames.json")
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_write_read_renames() {
    let fs = MemFs::new();
    let renames = sample_renames();

    write_rename_map(&renames, Path::new(BULK_DIR), "renames.json", &table(), &fs).unwrap();
    let read = read_rename_map(Path::new(BULK_DIR), "renames.json", &table(), &fs).unwrap();

    assert_eq!(read.len(), 5, "Read renames file wrong size");
    assert_eq!(read, renames, "Read renames file different from what was written");
}

#[test]
fn test_empty_rename_table() {
    let fs = MemFs::new();

    write_rename_map(&HashMap::new(), Path::new(BULK_DIR), "renames.json", &table(), &fs).unwrap();
    let read = read_rename_map(Path::new(BULK_DIR), "renames.json", &table(), &fs).unwrap();

    assert!(read.is_empty());
    assert_eq!(&fs.get(&rename_path()).unwrap()[..], b"{}");
}

#[test]
fn test_output_is_sorted_object() {
    let fs = MemFs::new();
    let renames = HashMap::from([
        ("b.rf".to_string(), "I2.rf".to_string()),
        ("a.rf".to_string(), "I1.rf".to_string()),
    ]);

    write_rename_map(&renames, Path::new(BULK_DIR), "renames.json", &table(), &fs).unwrap();

    assert_eq!(
        std::str::from_utf8(&fs.get(&rename_path()).unwrap()).unwrap(),
        r#"{"a.rf":"I1.rf","b.rf":"I2.rf"}"#
    );
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_missing_rename_table() {
    let fs = MemFs::new();
    let result = read_rename_map(Path::new(BULK_DIR), "renames.json", &table(), &fs);
    assert!(matches!(result, Err(BulkError::Io(_))));
}

#[test]
fn test_malformed_rename_table() {
    let fs = MemFs::new();
    fs.insert(rename_path(), r#"{"a.rf": 5}"#);

    let result = read_rename_map(Path::new(BULK_DIR), "renames.json", &table(), &fs);
    assert!(matches!(result, Err(BulkError::Json(_))));
}

#[test]
fn test_rename_table_must_be_object() {
    let fs = MemFs::new();
    fs.insert(rename_path(), r#"["a.rf", "b.rf"]"#);

    let result = read_rename_map(Path::new(BULK_DIR), "renames.json", &table(), &fs);
    assert!(matches!(result, Err(BulkError::Json(_))));
}

#[test]
fn test_duplicate_old_name_rejected() {
    let fs = MemFs::new();
    fs.insert(rename_path(), r#"{"f1":"A","f1":"B"}"#);

    let result = read_rename_map(Path::new(BULK_DIR), "renames.json", &table(), &fs);
    match result {
        Err(BulkError::Json(e)) => assert!(e.to_string().contains("duplicate key")),
        other => panic!("expected duplicate key error, got {:?}", other),
    }
}

#[test]
fn test_read_failure_mid_table_is_io() {
    let fs = MemFs::new();
    write_rename_map(&sample_renames(), Path::new(BULK_DIR), "renames.json", &table(), &fs)
        .unwrap();
    let contents = fs.get(&rename_path()).unwrap();

    let input = failing_input(contents.to_vec(), 6);
    let result = read_rename_map(Path::new(BULK_DIR), "renames.json", &table(), &input);

    match result {
        Err(BulkError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_write_failure_is_io() {
    // Large enough to overflow the write buffer during serialization
    let renames: HashMap<String, String> = (0..2_000)
        .map(|i| (format!("old_{i:05}.rf"), format!("new_{i:05}.rf")))
        .collect();

    let result = write_rename_map(
        &renames,
        Path::new(BULK_DIR),
        "renames.json",
        &table(),
        &failing_output(),
    );

    assert!(matches!(result, Err(BulkError::Io(_))));
}
