//! The `cat` command: stream files through the input layer to a writer.

use std::io::{self, Write};

use asm_diagnostic::DiagnosticQueue;

use super::input_for;
use crate::options::InputOptions;

/// Copy every file in `options.files` to `out`, buffer by buffer.
///
/// A file that fails to open is skipped after its error is queued; the
/// remaining files are still processed unless the error limit is hit.
/// Only a failure to write `out` is returned.
#[tracing::instrument(level = "debug", skip_all, fields(files = options.files.len()))]
pub fn cat_files(
    options: &InputOptions,
    out: &mut dyn Write,
    queue: &mut DiagnosticQueue,
) -> io::Result<()> {
    let mut input = input_for(options);
    let mut buf = vec![0u8; input.buffer_size()];

    for file in &options.files {
        if queue.limit_reached() {
            break;
        }
        let name = InputOptions::open_name(file);
        if input.open(name, options.preprocess, queue).is_err() {
            continue;
        }

        loop {
            let n = input.next_buffer(&mut buf, queue);
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n])?;
        }
    }

    input.end();
    out.flush()
}
