//! Where diagnostics go: the [`DiagnosticSink`] seam and the
//! [`DiagnosticQueue`] that `asmc` reports into.
//!
//! The queue stops accepting errors past a limit (recording one E9002 in
//! their place) and drops a diagnostic equal to the one just before it, so a
//! repeatedly failing device does not flood the terminal.

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed, Severity};

/// Destination for diagnostics.
///
/// Reporting never alters the reporter's control flow: implementations
/// must not block and must not panic.
pub trait DiagnosticSink {
    /// Record a diagnostic of any severity.
    fn report(&mut self, diag: Diagnostic);

    /// Record an error and get proof it was emitted.
    fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        self.report(diag);
        ErrorGuaranteed::new()
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diag: Diagnostic) {
        self.push(diag);
    }
}

/// Limits applied by a [`DiagnosticQueue`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Errors accepted before the queue refuses more; 0 means no limit.
    pub error_limit: usize,
    /// Drop a diagnostic identical to the one reported just before it.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Accept everything, duplicates included.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Diagnostics in the order they were reported, with running counts.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// input.open("a.s", false, &mut queue);
/// for diag in queue.flush() { emitter.emit(&diag); }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    /// E9002 already queued.
    limit_reported: bool,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
            limit_reported: false,
            config,
        }
    }

    /// Queue `diag` unless a limit or deduplication filters it out.
    ///
    /// Returns whether it was queued.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if diag.is_error() && self.limit_reached() {
            if !std::mem::replace(&mut self.limit_reported, true) {
                let limit = self.config.error_limit;
                self.diagnostics.push(too_many_errors(limit));
            }
            return false;
        }
        if self.config.deduplicate && self.diagnostics.last() == Some(&diag) {
            return false;
        }

        match diag.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        self.diagnostics.push(diag);
        true
    }

    /// True once `error_limit` errors have been accepted.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Errors accepted so far, including ones already flushed.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Take the queued diagnostics. Counts survive, so a final summary is
    /// still accurate after several flushes.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn report(&mut self, diag: Diagnostic) {
        self.add(diag);
    }
}

/// The E9002 entry queued in place of errors past the limit.
#[cold]
pub fn too_many_errors(limit: usize) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message(format!("aborting after {limit} errors"))
        .with_note("use --error-limit to increase the limit")
}
