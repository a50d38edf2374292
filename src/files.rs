//! File sets
//!
//! The data files assigned to one extent, with their size estimates.

use std::collections::HashMap;

use crate::error::{BulkError, Result};

/// One data file assigned to an extent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileInfo {
    /// Bare file name, no table or directory prefix
    pub name: String,
    /// Estimated size in bytes
    pub est_size: u64,
    /// Estimated entry count
    pub est_entries: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, est_size: u64, est_entries: u64) -> Self {
        Self {
            name: name.into(),
            est_size,
            est_entries,
        }
    }
}

/// Ordered set of files for one extent; insertion order is kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Files {
    files: Vec<FileInfo>,
}

impl Files {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: FileInfo) {
        self.files.push(file);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileInfo> {
        self.files.iter()
    }

    /// Total estimated size of every file in the set
    pub fn est_size(&self) -> u64 {
        self.files.iter().map(|f| f.est_size).sum()
    }

    /// Rewrite every name through `renames`, keeping sizes and order.
    ///
    /// Fails on the first name without an entry.
    pub fn map_names(&self, renames: &HashMap<String, String>) -> Result<Files> {
        let files = self
            .files
            .iter()
            .map(|f| match renames.get(&f.name) {
                Some(new_name) => Ok(FileInfo::new(new_name.clone(), f.est_size, f.est_entries)),
                None => Err(BulkError::UnresolvableRename {
                    name: f.name.clone(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Files { files })
    }
}

impl From<Vec<FileInfo>> for Files {
    fn from(files: Vec<FileInfo>) -> Self {
        Self { files }
    }
}

impl FromIterator<FileInfo> for Files {
    fn from_iter<I: IntoIterator<Item = FileInfo>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Files {
    type Item = FileInfo;
    type IntoIter = std::vec::IntoIter<FileInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a Files {
    type Item = &'a FileInfo;
    type IntoIter = std::slice::Iter<'a, FileInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
