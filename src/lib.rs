//! # bulkmeta
//!
//! Metadata layer for bulk-loading pre-sorted files into a sorted
//! key-value store:
//! - Load mapping: which files go into which key extent, streamed
//! - Rename table: each file's name before and after the move phase
//! - Reconciliation: the load mapping under current file names
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐        ┌──────────────┐
//! │ Partitioner  │        │  Move phase  │
//! └──────┬───────┘        └──────┬───────┘
//!        │ write_load_mapping    │ write_rename_map
//!        ▼                       ▼
//! ┌──────────────┐        ┌──────────────┐
//! │ loadmap.json │        │ renames.json │
//! │  (streamed)  │        │  (in memory) │
//! └──────┬───────┘        └──────┬───────┘
//!        │                       │
//!        └──────────┬────────────┘
//!                   ▼
//!        ┌─────────────────────┐
//!        │   Reconciliation    │
//!        │ (extent, new files) │
//!        └─────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod extent;
pub mod files;
pub mod fs;
pub mod mapping;
pub mod rename;
pub mod reconcile;
pub mod catalog;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BulkError, Result};
pub use config::Config;
pub use catalog::BulkMetadata;
pub use extent::{KeyExtent, TableId};
pub use files::{FileInfo, Files};
pub use mapping::{IteratorState, LoadMappingIterator, MappingSummary};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bulkmeta
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
