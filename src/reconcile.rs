//! Reconciliation
//!
//! The load mapping is written before the move phase renames the data files.
//! These functions read it back under the files' current names.

use std::path::Path;

use crate::error::Result;
use crate::extent::TableId;
use crate::fs::Input;
use crate::mapping::{read_load_mapping, LoadMappingIterator};
use crate::rename::read_rename_map;

/// Stream the load mapping with every file name resolved through the rename
/// table.
///
/// The rename table is held in memory for the life of the iterator. A file
/// with no rename entry fails the pull that reaches it with
/// [`BulkError::UnresolvableRename`](crate::BulkError::UnresolvableRename).
pub fn updated_load_mapping(
    bulk_dir: &Path,
    mapping_file: &str,
    rename_file: &str,
    table_id: &TableId,
    fs: &dyn Input,
) -> Result<LoadMappingIterator> {
    let renames = read_rename_map(bulk_dir, rename_file, table_id, fs)?;
    let iter = read_load_mapping(bulk_dir, mapping_file, table_id, fs)?;
    Ok(iter.with_renames(renames))
}

/// Every current data file name for the table, sorted.
///
/// Read from the rename table alone; values ending in `aux_suffix` are
/// bookkeeping files and are left out. An empty suffix filters nothing.
pub fn all_files(
    bulk_dir: &Path,
    rename_file: &str,
    aux_suffix: &str,
    table_id: &TableId,
    fs: &dyn Input,
) -> Result<Vec<String>> {
    let renames = read_rename_map(bulk_dir, rename_file, table_id, fs)?;
    let mut files: Vec<String> = renames
        .into_values()
        .filter(|name| aux_suffix.is_empty() || !name.ends_with(aux_suffix))
        .collect();
    files.sort();
    Ok(files)
}
