//! Raw open / read / close primitives.
//!
//! The input layer reaches the operating system only through
//! [`SourceOpener`] and [`ByteSource`]. Tests and embedders swap in
//! [`MemoryOpener`] to serve files that never touch the disk.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// An open, readable byte stream.
///
/// `close` consumes the source so a closed handle cannot be read again.
/// Its error is surfaced as a warning by the caller; the default closes by
/// dropping, which cannot fail.
pub trait ByteSource: Read {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

impl ByteSource for File {}

impl ByteSource for io::Stdin {}

impl ByteSource for Cursor<Vec<u8>> {}

/// Opens named sources and standard input.
pub trait SourceOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn ByteSource>>;

    fn stdin(&self) -> Box<dyn ByteSource>;
}

/// Opens files on the local file system.
#[derive(Copy, Clone, Debug, Default)]
pub struct FsOpener;

impl SourceOpener for FsOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn ByteSource>> {
        Ok(Box::new(File::open(path)?))
    }

    fn stdin(&self) -> Box<dyn ByteSource> {
        Box::new(io::stdin())
    }
}

/// Serves sources from memory, keyed by path.
///
/// Unknown paths fail with [`io::ErrorKind::NotFound`], as a missing file
/// would.
#[derive(Clone, Debug, Default)]
pub struct MemoryOpener {
    files: HashMap<PathBuf, Vec<u8>>,
    stdin: Vec<u8>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    #[must_use]
    pub fn with_stdin(mut self, contents: impl Into<Vec<u8>>) -> Self {
        self.stdin = contents.into();
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl SourceOpener for MemoryOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn ByteSource>> {
        let Some(contents) = self.files.get(path) else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        };
        Ok(Box::new(Cursor::new(contents.clone())))
    }

    fn stdin(&self) -> Box<dyn ByteSource> {
        Box::new(Cursor::new(self.stdin.clone()))
    }
}
