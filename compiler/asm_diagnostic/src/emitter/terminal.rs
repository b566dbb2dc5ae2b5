//! Plain-text diagnostics for a terminal, optionally colored.
//!
//! ```text
//! nope.s: error[E0001]: can't open nope.s for reading: No such file or directory
//!   = note: check the include path
//! error: aborting due to previous error
//! ```

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// `1 warning`, `2 warnings`.
fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// When to emit ANSI escapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color=` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Writes one diagnostic per line, notes indented beneath it.
///
/// Write errors are ignored: there is nowhere left to report them.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn paint(&mut self, text: &str, color: &str) {
        let _ = if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            self.writer.write_all(text.as_bytes())
        };
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if let Some(file) = &diagnostic.file {
            self.paint(file, colors::BOLD);
            let _ = self.writer.write_all(b": ");
        }
        let severity = diagnostic.severity;
        self.paint(&severity.to_string(), Self::severity_color(severity));
        self.paint(&format!("[{}]", diagnostic.code), colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for note in &diagnostic.notes {
            let _ = self.writer.write_all(b"  = ");
            self.paint("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let warnings = (warning_count > 0).then(|| counted(warning_count, "warning"));

        if error_count > 0 {
            let cause = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            self.paint("error", colors::ERROR);
            let _ = match warnings {
                Some(warnings) => {
                    writeln!(self.writer, ": aborting due to {cause}; {warnings} emitted")
                }
                None => writeln!(self.writer, ": aborting due to {cause}"),
            };
        } else if let Some(warnings) = warnings {
            self.paint("warning", colors::WARNING);
            let _ = writeln!(self.writer, ": {warnings} emitted");
        }
    }
}
