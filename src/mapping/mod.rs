//! Load Mapping Module
//!
//! Persists the extent → files association for one table as a JSON array
//! and streams it back one element at a time.
//!
//! ## Document Layout
//! ```text
//! [                          ← entered by `open`
//!   { extent 1 + files },    ← decoded on the 1st pull
//!   { extent 2 + files },    ← decoded on the 2nd pull
//!   ...
//! ]                          ← seen by `has_next`, never decoded
//! ```
//!
//! Elements appear in the order the writer was given them. Readers never
//! hold more than one decoded element.

mod iterator;
mod writer;

pub use iterator::{read_load_mapping, IteratorState, LoadMappingIterator};
pub use writer::{write_load_mapping, MappingSummary};
