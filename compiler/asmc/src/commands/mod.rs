//! Command handlers for the `asmc` CLI.
//!
//! `cat` and `sniff` collect diagnostics into a [`DiagnosticQueue`] and
//! leave rendering to [`report_diagnostics`], so they can be driven with
//! in-memory writers.

use std::io::IsTerminal;

use asm_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use asm_diagnostic::DiagnosticQueue;
use asm_input::InputFile;

use crate::options::InputOptions;

mod cat;
mod explain;
mod sniff;

pub use cat::cat_files;
pub use explain::explain_error;
pub use sniff::{sniff_files, SniffReport};

/// An input layer configured from the command line.
fn input_for(options: &InputOptions) -> InputFile {
    let mut input = InputFile::new(options.config.clone());
    input.begin();
    input
}

/// Render queued diagnostics and a summary to stderr.
///
/// Returns `true` if any error was reported.
pub fn report_diagnostics(queue: &mut DiagnosticQueue, color: ColorMode) -> bool {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(color, is_tty);

    emitter.emit_all(&queue.flush());
    emitter.emit_summary(queue.error_count(), queue.warning_count());
    emitter.flush();

    queue.has_errors().is_some()
}
