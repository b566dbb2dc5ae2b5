//! Seam for the preprocessing (scrubbing) transform.
//!
//! When a file is preprocessed, [`InputFile::next_buffer`](crate::InputFile::next_buffer)
//! does not read the file itself. It hands the scrubber a [`RawSupply`] and
//! lets the scrubber pull as many raw bytes as it needs to produce one
//! output buffer.

use asm_diagnostic::DiagnosticSink;

use crate::error::InputError;
use crate::multibyte::{MultibyteScanner, Utf8Scanner};
use crate::stream::InputStream;

/// Pull-based access to the raw bytes of the current file.
pub struct RawSupply<'a> {
    stream: &'a mut InputStream,
    file: &'a str,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> RawSupply<'a> {
    pub(crate) fn new(
        stream: &'a mut InputStream,
        file: &'a str,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        RawSupply { stream, file, sink }
    }

    /// Fill `buf` with raw bytes. Returns 0 once the file is exhausted.
    ///
    /// A read failure is reported here, once. The bytes read before it are
    /// returned, and every later call returns 0.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let read = self.stream.read_chunk(buf);
        if let Some(source) = read.error {
            self.sink.report(
                InputError::Read {
                    name: self.file.to_string(),
                    source,
                }
                .into_diagnostic(),
            );
        }
        read.count
    }

    /// Display name of the file being read.
    pub fn file_name(&self) -> &str {
        self.file
    }

    /// Where scrubbers report their own diagnostics.
    pub fn sink(&mut self) -> &mut dyn DiagnosticSink {
        &mut *self.sink
    }
}

/// A transform applied to raw input before tokenization.
///
/// The scrubber may keep state across calls (an unterminated string, a
/// half-read comment). When the input layer suspends a preprocessed file
/// to read a nested one it calls [`save`](Self::save), and
/// [`restore`](Self::restore) when the file resumes. The state is opaque to
/// the input layer. Whenever a source is released outside that protocol
/// (closed early, or replaced by a new `open`) it calls
/// [`reset`](Self::reset) instead.
pub trait Scrubber {
    type State;

    /// Produce up to `out.len()` bytes, pulling raw input from `input`.
    /// Returning 0 means the input is exhausted.
    ///
    /// When `warn_multibyte` is set the scrubber is responsible for
    /// checking multibyte sequences in what it reads.
    fn scrub(&mut self, input: &mut RawSupply<'_>, out: &mut [u8], warn_multibyte: bool) -> usize;

    fn save(&mut self) -> Self::State;

    fn restore(&mut self, state: Self::State);

    /// Forget everything carried over from the source just released.
    fn reset(&mut self);
}

/// Scrubber that copies raw bytes unchanged.
///
/// Used when no preprocessing transform is linked in. The only state it
/// carries is a multibyte sequence split across two buffers.
#[derive(Clone, Debug, Default)]
pub struct Passthrough {
    scanner: Utf8Scanner,
}

impl Scrubber for Passthrough {
    type State = Vec<u8>;

    fn scrub(&mut self, input: &mut RawSupply<'_>, out: &mut [u8], warn_multibyte: bool) -> usize {
        let count = input.read(out);
        if warn_multibyte {
            let file = input.file;
            if count == 0 {
                self.scanner.finish(file, &mut *input.sink);
            } else {
                self.scanner.scan(&out[..count], file, &mut *input.sink);
            }
        }
        count
    }

    fn save(&mut self) -> Vec<u8> {
        self.scanner.take_partial()
    }

    fn restore(&mut self, state: Vec<u8>) {
        self.scanner.restore_partial(state);
    }

    fn reset(&mut self) {
        self.scanner = Utf8Scanner::new();
    }
}
