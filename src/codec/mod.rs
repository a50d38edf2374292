//! Codec Module
//!
//! JSON encoding of load mapping elements.
//!
//! ## Element Format
//! ```text
//! {
//!   "startRow": "YQ==",          (optional, URL-safe base64)
//!   "endRow": "Yg==",            (optional, URL-safe base64)
//!   "files": [
//!     { "name": "f1.rf", "estSize": 1, "estEntries": 1 },
//!     ...
//!   ]
//! }
//! ```
//!
//! The table id is never written; readers supply it.

pub mod binary;
mod record;

pub(crate) use record::MappingRecord;
