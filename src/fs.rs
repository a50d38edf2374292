//! Storage collaborators
//!
//! The only places this crate touches physical storage. Callers hand in an
//! [`Output`] to create documents and an [`Input`] to open them, so every
//! operation also runs against [`MemFs`] without a disk.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

/// Opens a writable sink for a path, replacing whatever was there
pub trait Output {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;
}

/// Opens a readable source for a path
pub trait Input {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;
}

impl<F> Output for F
where
    F: Fn(&Path) -> io::Result<Box<dyn Write + Send>>,
{
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        self(path)
    }
}

impl<F> Input for F
where
    F: Fn(&Path) -> io::Result<Box<dyn Read + Send>>,
{
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        self(path)
    }
}

// =============================================================================
// Local Filesystem
// =============================================================================

/// `std::fs` backed collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Output for LocalFs {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Box::new(file))
    }
}

impl Input for LocalFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }
}

// =============================================================================
// In-Memory Filesystem
// =============================================================================

/// In-memory collaborator for tests and dry runs
///
/// ## Concurrency:
/// - `files`: Mutex over path → contents, contents are immutable `Bytes`
/// - `open_readers`: Atomic count of sources not yet dropped
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    files: Arc<Mutex<HashMap<PathBuf, Bytes>>>,
    open_readers: Arc<AtomicUsize>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `contents` at `path` directly
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Bytes>) {
        self.files.lock().insert(path.into(), contents.into());
    }

    /// Current contents at `path`, if any
    pub fn get(&self, path: &Path) -> Option<Bytes> {
        self.files.lock().get(path).cloned()
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    /// Number of sources handed out by `open` that are still alive
    pub fn open_readers(&self) -> usize {
        self.open_readers.load(Ordering::SeqCst)
    }
}

impl Output for MemFs {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        // Visible as empty right away, like a truncated file
        self.insert(path, Bytes::new());
        Ok(Box::new(MemSink {
            path: path.to_path_buf(),
            buf: Vec::new(),
            files: Arc::clone(&self.files),
        }))
    }
}

impl Input for MemFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let contents = self.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })?;
        self.open_readers.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemSource {
            cursor: Cursor::new(contents),
            open_readers: Arc::clone(&self.open_readers),
        }))
    }
}

/// Buffers writes and publishes them on flush and on drop
struct MemSink {
    path: PathBuf,
    buf: Vec<u8>,
    files: Arc<Mutex<HashMap<PathBuf, Bytes>>>,
}

impl MemSink {
    fn publish(&self) {
        self.files
            .lock()
            .insert(self.path.clone(), Bytes::copy_from_slice(&self.buf));
    }
}

impl Write for MemSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.publish();
        Ok(())
    }
}

impl Drop for MemSink {
    fn drop(&mut self) {
        self.publish();
    }
}

struct MemSource {
    cursor: Cursor<Bytes>,
    open_readers: Arc<AtomicUsize>,
}

impl Read for MemSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Drop for MemSource {
    fn drop(&mut self) {
        self.open_readers.fetch_sub(1, Ordering::SeqCst);
    }
}
