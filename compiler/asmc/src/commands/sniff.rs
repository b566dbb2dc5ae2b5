//! The `sniff` command: report how each file would be read.

use std::fmt;
use std::io::{self, Write};

use asm_diagnostic::DiagnosticQueue;

use super::input_for;
use crate::options::InputOptions;

/// Effective reading mode of one file after directive detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SniffReport {
    /// Display name as the input layer reports it.
    pub name: String,
    /// `None` if the file was empty and closed at once.
    pub preprocess: Option<bool>,
}

impl fmt::Display for SniffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.preprocess {
            Some(true) => "preprocess",
            Some(false) => "raw",
            None => "empty",
        };
        write!(f, "{}: {mode}", self.name)
    }
}

/// Open each file, print its effective mode, and close it again.
///
/// Files that fail to open are left out of the output; their errors are
/// queued.
#[tracing::instrument(level = "debug", skip_all, fields(files = options.files.len()))]
pub fn sniff_files(
    options: &InputOptions,
    out: &mut dyn Write,
    queue: &mut DiagnosticQueue,
) -> io::Result<Vec<SniffReport>> {
    let mut input = input_for(options);
    let mut reports = Vec::with_capacity(options.files.len());

    for file in &options.files {
        if queue.limit_reached() {
            break;
        }
        if input.open(InputOptions::open_name(file), options.preprocess, queue).is_err() {
            continue;
        }

        let report = SniffReport {
            name: input.file_name().unwrap_or(file).to_string(),
            preprocess: input.is_open().then(|| input.preprocess()),
        };
        writeln!(out, "{report}")?;
        reports.push(report);
        input.close();
    }

    input.end();
    out.flush()?;
    Ok(reports)
}
