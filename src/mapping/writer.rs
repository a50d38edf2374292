//! Load Mapping Writer
//!
//! Writes sorted extent → files entries as a single JSON array document.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};

use crate::codec::MappingRecord;
use crate::error::Result;
use crate::extent::{KeyExtent, TableId};
use crate::files::Files;
use crate::fs::Output;

/// What a finished write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSummary {
    /// Path of the document
    pub path: PathBuf,
    /// Number of array elements written
    pub extents: u64,
    /// Number of file records across all elements
    pub files: u64,
}

/// Write `mapping` to `{bulk_dir}/{file_name}` in the order given.
///
/// Entries are not re-sorted; pass a `BTreeMap<KeyExtent, Files>` (or any
/// iterator already in canonical order). On error the document may be
/// partially written.
pub fn write_load_mapping<'a, I>(
    mapping: I,
    bulk_dir: &Path,
    file_name: &str,
    table_id: &TableId,
    pretty: bool,
    fs: &dyn Output,
) -> Result<MappingSummary>
where
    I: IntoIterator<Item = (&'a KeyExtent, &'a Files)>,
{
    let path = bulk_dir.join(file_name);
    let mut writer = BufWriter::new(fs.create(&path)?);

    writer.write_all(b"[")?;

    let mut extents = 0u64;
    let mut files = 0u64;
    let mut previous: Option<&KeyExtent> = None;

    for (extent, extent_files) in mapping {
        if previous.is_some_and(|prev| prev >= extent) {
            tracing::warn!(
                table_id = %table_id,
                extent = %extent,
                "Load mapping entries are out of order; writing them as given"
            );
        }
        previous = Some(extent);

        if extents > 0 {
            writer.write_all(b",")?;
        }

        let record = MappingRecord::new(extent, extent_files);
        if pretty {
            writer.write_all(b"\n  ")?;
            write_element(&mut writer, &record, PrettyFormatter::with_indent(b"  "))?;
        } else {
            write_element(&mut writer, &record, CompactFormatter)?;
        }

        extents += 1;
        files += extent_files.len() as u64;
    }

    if pretty && extents > 0 {
        writer.write_all(b"\n")?;
    }
    writer.write_all(b"]")?;
    writer.flush()?;

    tracing::debug!(
        path = %path.display(),
        table_id = %table_id,
        extents,
        files,
        "Wrote load mapping"
    );

    Ok(MappingSummary {
        path,
        extents,
        files,
    })
}

/// Serialize one element into the shared stream
fn write_element<W, F>(writer: &mut W, record: &MappingRecord, formatter: F) -> Result<()>
where
    W: Write,
    F: serde_json::ser::Formatter,
{
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    record.serialize(&mut ser)?;
    Ok(())
}
