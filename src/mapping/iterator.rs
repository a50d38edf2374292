//! Load Mapping Iterator
//!
//! Forward-only cursor over a load mapping document. The array brackets and
//! separators are scanned by hand; each element is handed to serde_json as it
//! is pulled, so memory stays at one element no matter how long the array is.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::codec::MappingRecord;
use crate::error::{BulkError, Result};
use crate::extent::{KeyExtent, TableId};
use crate::files::Files;
use crate::fs::Input;

/// Lifecycle of a [`LoadMappingIterator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// Stream acquired and `[` consumed, nothing pulled yet
    Open,
    /// At least one element pulled
    Iterating,
    /// A pull failed; only `close` is allowed
    Failed,
    /// Stream released; terminal
    Closed,
}

/// Where the cursor sits relative to the array structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Just after `[`
    BeforeFirst,
    /// Just before an element's `{`
    AtElement,
    /// Just after an element's `}`
    AfterElement,
    /// `]` consumed
    End,
}

/// Streams `(KeyExtent, Files)` pairs out of a load mapping document
///
/// Owns the underlying source until [`close`](Self::close) or drop.
pub struct LoadMappingIterator {
    table_id: TableId,
    path: PathBuf,
    reader: Option<BufReader<Box<dyn Read + Send>>>,
    renames: Option<HashMap<String, String>>,
    position: Position,
    state: IteratorState,
    pulled: u64,
}

/// Open `{bulk_dir}/{file_name}` and enter its top-level array.
///
/// Extents come back tagged with `table_id`; the document does not carry one.
pub fn read_load_mapping(
    bulk_dir: &Path,
    file_name: &str,
    table_id: &TableId,
    fs: &dyn Input,
) -> Result<LoadMappingIterator> {
    let path = bulk_dir.join(file_name);
    let mut reader = BufReader::new(fs.open(&path)?);

    match peek_token(&mut reader)? {
        Some(b'[') => reader.consume(1),
        Some(other) => {
            return Err(BulkError::Malformed(format!(
                "{}: expected '[', found {:?}",
                path.display(),
                other as char
            )))
        }
        None => {
            return Err(BulkError::Malformed(format!(
                "{}: empty document",
                path.display()
            )))
        }
    }

    tracing::debug!(path = %path.display(), table_id = %table_id, "Opened load mapping");

    Ok(LoadMappingIterator {
        table_id: table_id.clone(),
        path,
        reader: Some(reader),
        renames: None,
        position: Position::BeforeFirst,
        state: IteratorState::Open,
        pulled: 0,
    })
}

impl LoadMappingIterator {
    /// Rewrite every file name through `renames` as elements are pulled
    pub(crate) fn with_renames(mut self, renames: HashMap<String, String>) -> Self {
        self.renames = Some(renames);
        self
    }

    pub fn table_id(&self) -> &TableId {
        &self.table_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> IteratorState {
        self.state
    }

    /// Number of elements successfully pulled so far
    pub fn pulled(&self) -> u64 {
        self.pulled
    }

    /// True if another element follows.
    ///
    /// Only looks at the next structural byte; nothing is decoded.
    pub fn has_next(&mut self) -> Result<bool> {
        self.ensure_usable()?;
        let result = self.advance();
        if result.is_err() {
            self.state = IteratorState::Failed;
        }
        result
    }

    /// Decode the next element, or `Ok(None)` once the array has ended
    pub fn next_mapping(&mut self) -> Result<Option<(KeyExtent, Files)>> {
        if !self.has_next()? {
            return Ok(None);
        }
        match self.decode_next() {
            Ok(entry) => {
                self.position = Position::AfterElement;
                self.state = IteratorState::Iterating;
                self.pulled += 1;
                tracing::trace!(extent = %entry.0, files = entry.1.len(), "Decoded load mapping element");
                Ok(Some(entry))
            }
            Err(e) => {
                self.state = IteratorState::Failed;
                Err(e)
            }
        }
    }

    /// Release the underlying source. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.state == IteratorState::Closed {
            return;
        }
        self.reader = None;
        self.state = IteratorState::Closed;
        tracing::debug!(path = %self.path.display(), pulled = self.pulled, "Closed load mapping");
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn ensure_usable(&self) -> Result<()> {
        match self.state {
            IteratorState::Closed => Err(BulkError::IteratorClosed),
            IteratorState::Failed => Err(BulkError::IteratorPoisoned),
            IteratorState::Open | IteratorState::Iterating => Ok(()),
        }
    }

    /// Move past separators until the cursor is at an element or the end
    fn advance(&mut self) -> Result<bool> {
        let reader = self.reader.as_mut().ok_or(BulkError::IteratorClosed)?;

        match self.position {
            Position::AtElement => Ok(true),
            Position::End => Ok(false),
            Position::BeforeFirst => match peek_token(reader)? {
                Some(b']') => {
                    reader.consume(1);
                    self.position = Position::End;
                    Ok(false)
                }
                Some(_) => {
                    self.position = Position::AtElement;
                    Ok(true)
                }
                None => Err(unterminated(&self.path)),
            },
            Position::AfterElement => match peek_token(reader)? {
                Some(b',') => {
                    reader.consume(1);
                    match peek_token(reader)? {
                        Some(b']') => Err(BulkError::Malformed(format!(
                            "{}: trailing ',' before ']'",
                            self.path.display()
                        ))),
                        Some(_) => {
                            self.position = Position::AtElement;
                            Ok(true)
                        }
                        None => Err(unterminated(&self.path)),
                    }
                }
                Some(b']') => {
                    reader.consume(1);
                    self.position = Position::End;
                    Ok(false)
                }
                Some(other) => Err(BulkError::Malformed(format!(
                    "{}: expected ',' or ']' after element {}, found {:?}",
                    self.path.display(),
                    self.pulled,
                    other as char
                ))),
                None => Err(unterminated(&self.path)),
            },
        }
    }

    fn decode_next(&mut self) -> Result<(KeyExtent, Files)> {
        let reader = self.reader.as_mut().ok_or(BulkError::IteratorClosed)?;

        // An element ends at its closing '}', so the deserializer never
        // reads past it into the separator.
        let mut de = serde_json::Deserializer::from_reader(reader);
        let record = MappingRecord::decode(&mut de)?;
        let (extent, files) = record.into_parts(&self.table_id);

        let files = match &self.renames {
            Some(renames) => files.map_names(renames)?,
            None => files,
        };
        Ok((extent, files))
    }
}

impl Iterator for LoadMappingIterator {
    type Item = Result<(KeyExtent, Files)>;

    /// Yields each error once, then stops
    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, IteratorState::Failed | IteratorState::Closed) {
            return None;
        }
        self.next_mapping().transpose()
    }
}

impl Drop for LoadMappingIterator {
    fn drop(&mut self) {
        if self.state != IteratorState::Closed {
            tracing::debug!(path = %self.path.display(), "Load mapping dropped without close");
            self.close();
        }
    }
}

/// Skip JSON whitespace and return the next byte without consuming it
fn peek_token<R: BufRead>(reader: &mut R) -> Result<Option<u8>> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(None);
        }
        match buf
            .iter()
            .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
        {
            Some(skip) => {
                let token = buf[skip];
                reader.consume(skip);
                return Ok(Some(token));
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

fn unterminated(path: &Path) -> BulkError {
    BulkError::Malformed(format!("{}: array is not terminated", path.display()))
}
