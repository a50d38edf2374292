//! Configuration for bulkmeta
//!
//! Well-known document names and output options, with sensible defaults.

use crate::error::{BulkError, Result};

/// Default name of the load mapping document inside a bulk directory
pub const DEFAULT_LOAD_MAPPING_FILE: &str = "loadmap.json";

/// Default name of the rename table document inside a bulk directory
pub const DEFAULT_RENAME_FILE: &str = "renames.json";

/// Names ending in this suffix are bookkeeping files, not data files
pub const DEFAULT_AUX_SUFFIX: &str = ".json";

/// Configuration for reading and writing bulk metadata
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Document Names
    // -------------------------------------------------------------------------
    /// File name of the load mapping document.
    /// Layout of a bulk directory:
    ///   {bulk_dir}/
    ///     ├── loadmap.json     (extent → files, streamed)
    ///     ├── renames.json     (old name → new name)
    ///     └── *.rf             (data files, untouched here)
    pub load_mapping_file: String,

    /// File name of the rename table document
    pub rename_file: String,

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------
    /// Rename-table values ending in this suffix are skipped by `all_files`
    pub aux_suffix: String,

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------
    /// Indent the load mapping document (two spaces) instead of compact output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_mapping_file: DEFAULT_LOAD_MAPPING_FILE.to_string(),
            rename_file: DEFAULT_RENAME_FILE.to_string(),
            aux_suffix: DEFAULT_AUX_SUFFIX.to_string(),
            pretty: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the document names are usable and distinct
    pub fn validate(&self) -> Result<()> {
        if self.load_mapping_file.is_empty() {
            return Err(BulkError::Config(
                "load mapping file name is empty".to_string(),
            ));
        }
        if self.rename_file.is_empty() {
            return Err(BulkError::Config("rename file name is empty".to_string()));
        }
        if self.load_mapping_file == self.rename_file {
            return Err(BulkError::Config(format!(
                "load mapping and rename table share the name {:?}",
                self.rename_file
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the load mapping document name
    pub fn load_mapping_file(mut self, name: impl Into<String>) -> Self {
        self.config.load_mapping_file = name.into();
        self
    }

    /// Set the rename table document name
    pub fn rename_file(mut self, name: impl Into<String>) -> Self {
        self.config.rename_file = name.into();
        self
    }

    /// Set the auxiliary file suffix
    pub fn aux_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.aux_suffix = suffix.into();
        self
    }

    /// Toggle indented output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
