//! Rendering of queued diagnostics.
//!
//! `asmc` only prints to a terminal. Embedders that want another format
//! implement [`DiagnosticEmitter`] themselves.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Writes diagnostics somewhere a user will see them.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit in order, e.g. everything flushed from a queue.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);

    /// Closing line once a run is over; silent when both counts are zero.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
