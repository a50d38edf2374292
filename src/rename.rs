//! Rename Table
//!
//! Maps each file's name at partitioning time to its name after the move
//! phase. Written and read as one JSON object; it is bounded by file count,
//! so no streaming.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::extent::TableId;
use crate::fs::{Input, Output};

/// Write `renames` to `{bulk_dir}/{file_name}`.
///
/// Keys are written in sorted order so the same table always produces the
/// same bytes.
pub fn write_rename_map(
    renames: &HashMap<String, String>,
    bulk_dir: &Path,
    file_name: &str,
    table_id: &TableId,
    fs: &dyn Output,
) -> Result<()> {
    let path = bulk_dir.join(file_name);
    let mut writer = BufWriter::new(fs.create(&path)?);

    let sorted: BTreeMap<&str, &str> = renames
        .iter()
        .map(|(old, new)| (old.as_str(), new.as_str()))
        .collect();
    serde_json::to_writer(&mut writer, &sorted)?;
    writer.flush()?;

    tracing::debug!(
        path = %path.display(),
        table_id = %table_id,
        entries = renames.len(),
        "Wrote rename table"
    );
    Ok(())
}

/// Read the whole rename table at `{bulk_dir}/{file_name}`.
///
/// An old name that appears twice makes the document malformed.
pub fn read_rename_map(
    bulk_dir: &Path,
    file_name: &str,
    table_id: &TableId,
    fs: &dyn Input,
) -> Result<HashMap<String, String>> {
    let path = bulk_dir.join(file_name);
    let reader = BufReader::new(fs.open(&path)?);
    let UniqueRenames(renames) = serde_json::from_reader(reader)?;

    tracing::debug!(
        path = %path.display(),
        table_id = %table_id,
        entries = renames.len(),
        "Read rename table"
    );
    Ok(renames)
}

/// Old → new names, refusing a repeated old name
struct UniqueRenames(HashMap<String, String>);

impl<'de> Deserialize<'de> for UniqueRenames {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RenamesVisitor;

        impl<'de> Visitor<'de> for RenamesVisitor {
            type Value = UniqueRenames;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of old file name to new file name")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<UniqueRenames, A::Error> {
                let mut renames = HashMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((old, new)) = map.next_entry::<String, String>()? {
                    match renames.entry(old) {
                        Entry::Occupied(entry) => {
                            return Err(de::Error::custom(format!(
                                "duplicate key {:?}",
                                entry.key()
                            )))
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(new);
                        }
                    }
                }
                Ok(UniqueRenames(renames))
            }
        }

        deserializer.deserialize_map(RenamesVisitor)
    }
}
