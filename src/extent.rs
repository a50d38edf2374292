//! Key extents
//!
//! A `KeyExtent` is a half-open slice of one table's key space:
//! `(start_row, end_row]`, where a missing bound means unbounded on that side.

use std::cmp::Ordering;
use std::fmt;

/// Opaque table identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId(String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contiguous range of rows belonging to one table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyExtent {
    table_id: TableId,
    /// Inclusive end row; `None` sorts after every bounded extent
    end_row: Option<Vec<u8>>,
    /// Exclusive start row; `None` means the range starts at the first row
    start_row: Option<Vec<u8>>,
}

impl KeyExtent {
    pub fn new(table_id: TableId, end_row: Option<Vec<u8>>, start_row: Option<Vec<u8>>) -> Self {
        Self {
            table_id,
            end_row,
            start_row,
        }
    }

    pub fn table_id(&self) -> &TableId {
        &self.table_id
    }

    pub fn end_row(&self) -> Option<&[u8]> {
        self.end_row.as_deref()
    }

    pub fn start_row(&self) -> Option<&[u8]> {
        self.start_row.as_deref()
    }

    /// True if `row` falls in `(start_row, end_row]`
    pub fn contains(&self, row: &[u8]) -> bool {
        let after_start = self.start_row().map_or(true, |start| row > start);
        let before_end = self.end_row().map_or(true, |end| row <= end);
        after_start && before_end
    }
}

impl Ord for KeyExtent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.table_id
            .cmp(&other.table_id)
            .then_with(|| match (&self.end_row, &other.end_row) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
            // Option orders None first, which is what an unbounded start wants
            .then_with(|| self.start_row.cmp(&other.start_row))
    }
}

impl PartialOrd for KeyExtent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KeyExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |r: Option<&[u8]>, unbounded: &str| match r {
            Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            None => unbounded.to_string(),
        };
        write!(
            f,
            "{};({}, {}]",
            self.table_id,
            row(self.start_row(), "-inf"),
            row(self.end_row(), "+inf")
        )
    }
}
