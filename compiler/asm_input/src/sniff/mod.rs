//! First-line directive detection.
//!
//! Compilers that emit assembly mark text needing no preprocessing with a
//! leading `#NO_APP` line, and text that does with `#APP`. Right after a
//! file is opened its first bytes are inspected once for these markers;
//! the result overrides the caller's preprocess hint for the whole file.
//!
//! Sniffing leaves the stream as if it had not happened, except for bytes a
//! directive genuinely consumed:
//!
//! | First bytes            | Left for the reader       |
//! |------------------------|---------------------------|
//! | not a comment trigger  | everything                |
//! | `#NO_APP\n...`         | `\n...`                   |
//! | `#APP\n...`            | `\n...`                   |
//! | `#\n...`               | `\n...`                   |
//! | `#Nxyz\n...` (no match)| `\n...`                   |
//! | `#` + 79 bytes, no `\n`| `#` + the rest of the line|
//! | `#x...`                | `#...` (the `x` is lost)  |

use std::io;

use crate::config::InputConfig;
use crate::stream::InputStream;

/// Size of the line buffer used for the directive check, including room
/// for a terminator; at most one byte less is read.
const LINE_LOOKAHEAD: usize = 80;

/// A preprocessing directive found on the first line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `#APP`: preprocess this file.
    App,
    /// `#NO_APP`: read this file raw.
    NoApp,
}

impl Directive {
    /// The preprocess setting this directive forces.
    pub fn preprocess(self) -> bool {
        matches!(self, Directive::App)
    }

    fn tail(self) -> &'static [u8] {
        match self {
            Directive::App => b"PP",
            Directive::NoApp => b"O_APP",
        }
    }
}

/// Result of inspecting the start of a freshly opened stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sniffed {
    /// The stream holds no bytes at all.
    Empty,
    /// No directive; the caller's hint stands.
    NoDirective,
    Directive(Directive),
}

/// Inspect the first line of `stream` for `#APP` / `#NO_APP`.
pub(crate) fn sniff(stream: &mut InputStream, config: &InputConfig) -> io::Result<Sniffed> {
    let Some(lead) = stream.read_byte()? else {
        return Ok(Sniffed::Empty);
    };

    if !config.is_comment_trigger(lead) {
        stream.unread(lead);
        return Ok(Sniffed::NoDirective);
    }

    match stream.read_byte()? {
        Some(b'N') => sniff_line(stream, config, lead, Directive::NoApp),
        Some(b'A') => sniff_line(stream, config, lead, Directive::App),
        Some(eol) if config.is_end_of_line(Some(eol)) => {
            stream.unread(eol);
            Ok(Sniffed::NoDirective)
        }
        _ => {
            stream.unread(lead);
            Ok(Sniffed::NoDirective)
        }
    }
}

/// Read the rest of the first line and match it against `directive`.
///
/// A complete line is replaced by its newline. A line too long for the
/// lookahead, or cut off by end of input, is replaced by `lead` and the
/// bytes read are dropped.
fn sniff_line(
    stream: &mut InputStream,
    config: &InputConfig,
    lead: u8,
    directive: Directive,
) -> io::Result<Sniffed> {
    let line = stream.read_line(LINE_LOOKAHEAD)?;

    let tail = directive.tail();
    let matched = line.as_deref().is_some_and(|line| {
        line.starts_with(tail) && config.is_end_of_line(line.get(tail.len()).copied())
    });

    let complete = line
        .as_deref()
        .is_some_and(|line| memchr::memchr(b'\n', line).is_some());
    stream.unread(if complete { b'\n' } else { lead });

    Ok(if matched {
        Sniffed::Directive(directive)
    } else {
        Sniffed::NoDirective
    })
}
