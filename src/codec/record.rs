//! Load mapping element record

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::extent::{KeyExtent, TableId};
use crate::files::{FileInfo, Files};

use super::binary;

/// One array element of the load mapping document
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MappingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "binary::optional")]
    start_row: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "binary::optional")]
    end_row: Option<Vec<u8>>,
    #[serde(deserialize_with = "object_list")]
    files: Vec<FileRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileRecord {
    name: String,
    est_size: u64,
    est_entries: u64,
}

impl MappingRecord {
    /// Decode one element, which must be a JSON object
    pub(crate) fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ObjectOnly::deserialize(deserializer).map(|record| record.0)
    }

    /// Build a record, dropping the extent's table id
    pub(crate) fn new(extent: &KeyExtent, files: &Files) -> Self {
        Self {
            start_row: extent.start_row().map(<[u8]>::to_vec),
            end_row: extent.end_row().map(<[u8]>::to_vec),
            files: files
                .iter()
                .map(|f| FileRecord {
                    name: f.name.clone(),
                    est_size: f.est_size,
                    est_entries: f.est_entries,
                })
                .collect(),
        }
    }

    /// Rebuild the extent under `table_id` along with its files
    pub(crate) fn into_parts(self, table_id: &TableId) -> (KeyExtent, Files) {
        let extent = KeyExtent::new(table_id.clone(), self.end_row, self.start_row);
        let files = self
            .files
            .into_iter()
            .map(|f| FileInfo::new(f.name, f.est_size, f.est_entries))
            .collect();
        (extent, files)
    }
}

/// Accepts `T` only in object form; derived struct impls would also take
/// the positional array form.
struct ObjectOnly<T>(T);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ObjectOnly<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
            type Value = T;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
                T::deserialize(de::value::MapAccessDeserializer::new(map))
            }
        }

        deserializer
            .deserialize_map(ObjectVisitor(PhantomData))
            .map(ObjectOnly)
    }
}

fn object_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FileRecord>, D::Error> {
    let files = Vec::<ObjectOnly<FileRecord>>::deserialize(deserializer)?;
    Ok(files.into_iter().map(|file| file.0).collect())
}
