//! Tests for BulkMetadata against the local filesystem
//!
//! These tests verify:
//! - Documents land at their configured names in the bulk directory
//! - The full partition → move → apply flow on disk
//! - Custom document names

use std::path::PathBuf;

use bulkmeta::fs::LocalFs;
use bulkmeta::{BulkError, BulkMetadata, Config};
use tempfile::TempDir;

use crate::common::{generate_mapping, rename_all, table};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_bulk_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bulk");
    (temp_dir, path)
}

// =============================================================================
// Local Filesystem Tests
// =============================================================================

#[test]
fn test_documents_at_well_known_paths() {
    let (_temp, dir) = setup_bulk_dir();
    let catalog = BulkMetadata::default();
    let mapping = generate_mapping(&table());

    let summary = catalog.write_load_mapping(&mapping, &dir, &table(), &LocalFs).unwrap();
    catalog
        .write_rename_map(&rename_all(&mapping), &dir, &table(), &LocalFs)
        .unwrap();

    assert_eq!(summary.path, dir.join("loadmap.json"));
    assert!(catalog.load_mapping_path(&dir).exists());
    assert!(catalog.rename_path(&dir).exists());
}

#[test]
fn test_full_flow_on_disk() {
    let (_temp, dir) = setup_bulk_dir();
    let catalog = BulkMetadata::default();
    let mapping = generate_mapping(&table());
    let renames = rename_all(&mapping);

    catalog.write_load_mapping(&mapping, &dir, &table(), &LocalFs).unwrap();
    catalog.write_rename_map(&renames, &dir, &table(), &LocalFs).unwrap();

    // Plain read sees the original names
    let mut plain = catalog.read_load_mapping(&dir, &table(), &LocalFs).unwrap();
    let (_, files) = plain.next_mapping().unwrap().unwrap();
    assert_eq!(files.iter().next().unwrap().name, "f7");
    plain.close();

    // Reconciled read sees the new names in the same order
    let mut updated = catalog.updated_load_mapping(&dir, &table(), &LocalFs).unwrap();
    let mut ends = Vec::new();
    while let Some((extent, files)) = updated.next_mapping().unwrap() {
        ends.push(extent.end_row().unwrap().to_vec());
        assert!(files.iter().all(|f| f.name.starts_with('N')));
    }
    updated.close();
    assert_eq!(ends, vec![b"b".to_vec(), b"c".to_vec(), b"d".to_vec()]);

    let all = catalog.all_files(&dir, &table(), &LocalFs).unwrap();
    assert_eq!(all.len(), 9);
    assert_eq!(all[0], "Nf1");
}

#[test]
fn test_custom_document_names() {
    let (_temp, dir) = setup_bulk_dir();
    let config = Config::builder()
        .load_mapping_file("mapping.dat")
        .rename_file("moves.dat")
        .aux_suffix(".dat")
        .pretty(false)
        .build()
        .unwrap();
    let catalog = BulkMetadata::new(config).unwrap();
    let mapping = generate_mapping(&table());
    let mut renames = rename_all(&mapping);
    renames.insert("mapping.dat".to_string(), "mapping.dat".to_string());

    catalog.write_load_mapping(&mapping, &dir, &table(), &LocalFs).unwrap();
    catalog.write_rename_map(&renames, &dir, &table(), &LocalFs).unwrap();

    assert!(dir.join("mapping.dat").exists());
    assert!(dir.join("moves.dat").exists());
    assert_eq!(catalog.all_files(&dir, &table(), &LocalFs).unwrap().len(), 9);
}

#[test]
fn test_rejects_invalid_config() {
    let config = Config {
        rename_file: String::new(),
        ..Config::default()
    };
    assert!(matches!(BulkMetadata::new(config), Err(BulkError::Config(_))));
}

#[test]
fn test_missing_bulk_dir() {
    let (_temp, dir) = setup_bulk_dir();
    let catalog = BulkMetadata::default();

    assert!(matches!(
        catalog.read_load_mapping(&dir, &table(), &LocalFs),
        Err(BulkError::Io(_))
    ));
    assert!(matches!(
        catalog.read_rename_map(&dir, &table(), &LocalFs),
        Err(BulkError::Io(_))
    ));
}
