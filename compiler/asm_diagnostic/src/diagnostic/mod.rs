//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`] and [`Severity`], the building blocks the input
//! layer uses to report open, read, close and encoding problems.

use std::fmt;

use crate::ErrorCode;

/// How serious a diagnostic is. Only errors make a run fail.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic with the context needed to explain an input problem.
///
/// Input diagnostics are file-scoped rather than span-scoped: the input
/// layer never tokenizes, so the display name of the source is the only
/// location it can offer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    /// One line, no trailing period, e.g. `can't open a.s for reading: ...`.
    pub message: String,
    /// Display name of the source, `{standard input}` included.
    pub file: Option<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn blank(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            file: None,
            notes: Vec::new(),
        }
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::blank(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::blank(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the display name of the offending source.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Append a `= note:` line.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}: ")?;
        }
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        self.notes
            .iter()
            .try_for_each(|note| write!(f, "\n  = note: {note}"))
    }
}

#[cfg(test)]
mod tests;
