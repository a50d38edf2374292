//! Bulk Metadata Catalog
//!
//! Binds the document names and output options from a [`Config`] to the
//! mapping, rename and reconciliation operations.
//!
//! ## Phases
//! 1. Partitioning: `write_load_mapping`
//! 2. Move: `write_rename_map`
//! 3. Apply: `updated_load_mapping` / `all_files`

use std::collections::HashMap;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::extent::{KeyExtent, TableId};
use crate::files::Files;
use crate::fs::{Input, Output};
use crate::mapping::{self, LoadMappingIterator, MappingSummary};
use crate::{reconcile, rename};

/// Reads and writes the metadata documents of bulk directories
#[derive(Debug, Clone, Default)]
pub struct BulkMetadata {
    config: Config,
}

impl BulkMetadata {
    /// Create a catalog, rejecting an invalid config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the load mapping document inside `bulk_dir`
    pub fn load_mapping_path(&self, bulk_dir: &Path) -> std::path::PathBuf {
        bulk_dir.join(&self.config.load_mapping_file)
    }

    /// Path of the rename table document inside `bulk_dir`
    pub fn rename_path(&self, bulk_dir: &Path) -> std::path::PathBuf {
        bulk_dir.join(&self.config.rename_file)
    }

    // =========================================================================
    // Load Mapping
    // =========================================================================

    pub fn write_load_mapping<'a, I>(
        &self,
        mapping: I,
        bulk_dir: &Path,
        table_id: &TableId,
        fs: &dyn Output,
    ) -> Result<MappingSummary>
    where
        I: IntoIterator<Item = (&'a KeyExtent, &'a Files)>,
    {
        mapping::write_load_mapping(
            mapping,
            bulk_dir,
            &self.config.load_mapping_file,
            table_id,
            self.config.pretty,
            fs,
        )
    }

    pub fn read_load_mapping(
        &self,
        bulk_dir: &Path,
        table_id: &TableId,
        fs: &dyn Input,
    ) -> Result<LoadMappingIterator> {
        mapping::read_load_mapping(bulk_dir, &self.config.load_mapping_file, table_id, fs)
    }

    // =========================================================================
    // Rename Table
    // =========================================================================

    pub fn write_rename_map(
        &self,
        renames: &HashMap<String, String>,
        bulk_dir: &Path,
        table_id: &TableId,
        fs: &dyn Output,
    ) -> Result<()> {
        rename::write_rename_map(renames, bulk_dir, &self.config.rename_file, table_id, fs)
    }

    pub fn read_rename_map(
        &self,
        bulk_dir: &Path,
        table_id: &TableId,
        fs: &dyn Input,
    ) -> Result<HashMap<String, String>> {
        rename::read_rename_map(bulk_dir, &self.config.rename_file, table_id, fs)
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    pub fn updated_load_mapping(
        &self,
        bulk_dir: &Path,
        table_id: &TableId,
        fs: &dyn Input,
    ) -> Result<LoadMappingIterator> {
        reconcile::updated_load_mapping(
            bulk_dir,
            &self.config.load_mapping_file,
            &self.config.rename_file,
            table_id,
            fs,
        )
    }

    pub fn all_files(
        &self,
        bulk_dir: &Path,
        table_id: &TableId,
        fs: &dyn Input,
    ) -> Result<Vec<String>> {
        reconcile::all_files(
            bulk_dir,
            &self.config.rename_file,
            &self.config.aux_suffix,
            table_id,
            fs,
        )
    }
}
