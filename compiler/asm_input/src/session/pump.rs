//! Chunked delivery of the current source.

use asm_diagnostic::DiagnosticSink;

use super::InputFile;
use crate::error::InputError;
use crate::scrub::{RawSupply, Scrubber};

impl<S: Scrubber> InputFile<S> {
    /// Fill `buf` with the next bytes of the current source.
    ///
    /// Returns the number of bytes written; 0 means the source is
    /// exhausted. On exhaustion the stream is closed, and every later call
    /// returns 0 until [`open`](Self::open) or [`pop`](Self::pop) installs
    /// another source. With nothing open, or an empty `buf`, this returns 0
    /// immediately and leaves the current source untouched.
    ///
    /// Preprocessed sources go through the scrubber, which decides how many
    /// raw bytes to pull. Raw sources are copied as read, and checked for
    /// malformed multibyte sequences when the configuration asks for it.
    pub fn next_buffer(&mut self, buf: &mut [u8], sink: &mut dyn DiagnosticSink) -> usize {
        let InputFile {
            session,
            scrubber,
            scanner,
            config,
            ..
        } = self;

        let Some(stream) = session.stream.as_mut() else {
            return 0;
        };
        if buf.is_empty() {
            return 0;
        }
        let file = session.name.as_deref().unwrap_or_default();
        let warn = config.multibyte.warns();

        let size = if session.preprocess {
            let mut supply = RawSupply::new(stream, file, &mut *sink);
            scrubber.scrub(&mut supply, buf, warn)
        } else {
            let size = RawSupply::new(stream, file, &mut *sink).read(buf);
            if warn {
                if size == 0 {
                    scanner.finish(file, &mut *sink);
                } else {
                    scanner.scan(&buf[..size], file, &mut *sink);
                }
            }
            size
        };

        if size > 0 {
            tracing::trace!(file, size, "buffer delivered");
            return size;
        }

        tracing::debug!(file, "input exhausted");
        if let Some(stream) = session.stream.take() {
            if let Err(source) = stream.close() {
                sink.report(
                    InputError::Close {
                        name: file.to_string(),
                        source,
                    }
                    .into_diagnostic(),
                );
            }
        }
        0
    }
}
