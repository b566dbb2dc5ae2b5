//! Multibyte validity checks over delivered buffers.
//!
//! Scanning never changes the bytes or their count; it only reports.

use std::fmt::Write as _;

use asm_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};

/// Reports problems with multibyte sequences in raw input.
///
/// Scanners may hold a partial sequence between calls so that a character
/// split across two buffers is judged whole. The input layer saves that
/// partial sequence across [`push`](crate::InputFile::push) and
/// [`pop`](crate::InputFile::pop) so nested files do not see it.
pub trait MultibyteScanner {
    /// Scan one buffer of `file`.
    fn scan(&mut self, bytes: &[u8], file: &str, sink: &mut dyn DiagnosticSink);

    /// The input of `file` ended; report anything still pending.
    fn finish(&mut self, file: &str, sink: &mut dyn DiagnosticSink) {
        let _ = (file, sink);
    }

    /// Remove and return the pending partial sequence.
    fn take_partial(&mut self) -> Vec<u8> {
        Vec::new()
    }

    /// Reinstate a partial sequence returned by `take_partial`.
    fn restore_partial(&mut self, partial: Vec<u8>) {
        let _ = partial;
    }
}

/// Reports byte sequences that are not valid UTF-8.
#[derive(Clone, Debug, Default)]
pub struct Utf8Scanner {
    partial: Vec<u8>,
}

impl Utf8Scanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MultibyteScanner for Utf8Scanner {
    fn scan(&mut self, bytes: &[u8], file: &str, sink: &mut dyn DiagnosticSink) {
        if bytes.is_empty() {
            return;
        }

        let joined;
        let mut rest: &[u8] = if self.partial.is_empty() {
            bytes
        } else {
            joined = [self.partial.as_slice(), bytes].concat();
            &joined
        };
        self.partial.clear();

        while let Err(err) = std::str::from_utf8(rest) {
            let valid = err.valid_up_to();
            let Some(len) = err.error_len() else {
                // Truncated sequence at the end; may complete next time.
                self.partial.extend_from_slice(&rest[valid..]);
                break;
            };
            sink.report(invalid_sequence(&rest[valid..valid + len], file));
            rest = &rest[valid + len..];
        }
    }

    fn finish(&mut self, file: &str, sink: &mut dyn DiagnosticSink) {
        if !self.partial.is_empty() {
            let partial = std::mem::take(&mut self.partial);
            sink.report(invalid_sequence(&partial, file));
        }
    }

    fn take_partial(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.partial)
    }

    fn restore_partial(&mut self, partial: Vec<u8>) {
        self.partial = partial;
    }
}

fn invalid_sequence(bytes: &[u8], file: &str) -> Diagnostic {
    let mut hex = String::new();
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            hex.push(' ');
        }
        let _ = write!(hex, "{byte:#04x}");
    }
    Diagnostic::warning(ErrorCode::E0004)
        .with_message(format!("invalid UTF-8 sequence ({hex}) in {file}"))
        .with_file(file)
}
