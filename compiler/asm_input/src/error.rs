//! Input failures and their diagnostic rendering.

use std::io;

use asm_diagnostic::{Diagnostic, ErrorCode};

/// A failure of one of the raw open, read or close primitives.
///
/// None of these abort the process. The input layer reports them through a
/// [`DiagnosticSink`](asm_diagnostic::DiagnosticSink) and returns a sentinel
/// (nothing open, or zero bytes).
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("can't open {name} for reading: {source}")]
    Open { name: String, source: io::Error },

    #[error("can't read from {name}: {source}")]
    Read { name: String, source: io::Error },

    #[error("can't close {name}: {source}")]
    Close { name: String, source: io::Error },
}

impl InputError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InputError::Open { .. } => ErrorCode::E0001,
            InputError::Read { .. } => ErrorCode::E0002,
            InputError::Close { .. } => ErrorCode::E0003,
        }
    }

    /// Display name of the source the failure concerns.
    pub fn file_name(&self) -> &str {
        match self {
            InputError::Open { name, .. }
            | InputError::Read { name, .. }
            | InputError::Close { name, .. } => name,
        }
    }

    /// Convert into a diagnostic. Close failures are only warnings: by the
    /// time a stream is closed all of its bytes have been delivered.
    pub fn into_diagnostic(self) -> Diagnostic {
        let diag = match self {
            InputError::Close { .. } => Diagnostic::warning(self.code()),
            InputError::Open { .. } | InputError::Read { .. } => Diagnostic::error(self.code()),
        };
        diag.with_message(self.to_string())
            .with_file(self.file_name())
    }
}
