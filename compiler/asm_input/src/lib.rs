//! Source byte supply for the assembler front end.
//!
//! This crate is the only place that touches input handles. Everything
//! above it asks an [`InputFile`] for the next buffer of bytes and never
//! sees a file, a pipe, or standard input directly.
//!
//! # Flow
//!
//! ```text
//! open(name, hint)  ── sniff first line ──▶  preprocess flag decided
//!        │
//!        ▼
//! next_buffer(buf)  ── raw read ──────────▶  bytes (+ optional UTF-8 check)
//!                   └─ preprocess ─▶ Scrubber::scrub ─▶ bytes
//!        │
//!        ▼ 0 bytes: stream closed, every later call returns 0
//! ```
//!
//! Nested inclusion is cooperative: [`InputFile::push`] hands the caller a
//! [`SavedFile`] holding the outer stream, a nested file is opened and read
//! to exhaustion, and [`InputFile::pop`] resumes the outer stream exactly
//! where it stopped.
//!
//! # Directives
//!
//! A file whose first line is `#NO_APP` is read raw even when the caller
//! asked for preprocessing; `#APP` forces preprocessing on. Compilers emit
//! these to mark text that is already expanded.

mod config;
mod error;
mod multibyte;
mod scrub;
mod session;
mod sniff;
mod source;
mod stream;

pub use config::{InputConfig, MultibyteHandling};
pub use error::InputError;
pub use multibyte::{MultibyteScanner, Utf8Scanner};
pub use scrub::{Passthrough, RawSupply, Scrubber};
pub use session::{InputFile, SavedFile};
pub use sniff::{Directive, Sniffed};
pub use source::{ByteSource, FsOpener, MemoryOpener, SourceOpener};
pub use stream::{InputStream, RawRead};

/// Size of the chunks [`InputFile::next_buffer`] is designed to fill.
///
/// Chosen for read throughput. Callers size their buffer once, before the
/// nature of any input is known.
pub const BUFFER_SIZE: usize = 32 * 1024;

/// Display name used in diagnostics when reading standard input.
pub const STDIN_NAME: &str = "{standard input}";

#[cfg(test)]
mod test_support;
