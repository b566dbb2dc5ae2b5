//! The live input session and its save/restore protocol.
//!
//! An [`InputFile`] owns exactly one `FileSession`: the open stream (if
//! any), its display name, and whether it is preprocessed. Nesting is the
//! caller's business. [`InputFile::push`] moves the session out into a
//! [`SavedFile`] and leaves a blank one behind; [`InputFile::pop`] consumes
//! the `SavedFile` and reinstalls it.
//!
//! ```text
//! let outer = input.push();
//! input.open("inc.s", true, &mut queue)?;
//! while input.next_buffer(&mut buf, &mut queue) > 0 { ... }
//! input.pop(outer);   // resumes exactly where the outer file stopped
//! ```

mod pump;

use std::path::Path;
use std::rc::Rc;

use asm_diagnostic::{DiagnosticSink, ErrorGuaranteed};

use crate::config::InputConfig;
use crate::error::InputError;
use crate::multibyte::{MultibyteScanner, Utf8Scanner};
use crate::scrub::{Passthrough, Scrubber};
use crate::sniff::{sniff, Sniffed};
use crate::source::{FsOpener, SourceOpener};
use crate::stream::InputStream;
use crate::{BUFFER_SIZE, STDIN_NAME};

/// State of the source currently being read.
///
/// `Default` is the "nothing open" session.
#[derive(Debug, Default)]
pub(crate) struct FileSession {
    stream: Option<InputStream>,
    /// Shared with any `SavedFile` taken while this source was current.
    name: Option<Rc<str>>,
    preprocess: bool,
}

/// A suspended session, returned by [`InputFile::push`].
///
/// Owns the suspended stream. Passing it to [`InputFile::pop`] resumes the
/// stream; dropping it closes the stream and loses the rest of the file.
#[must_use = "a saved file must be passed back to `InputFile::pop` to resume reading it"]
#[derive(Debug)]
pub struct SavedFile<T> {
    session: FileSession,
    /// Present iff `session.preprocess` was set at push time.
    scrub_state: Option<T>,
    multibyte_partial: Vec<u8>,
}

impl<T> SavedFile<T> {
    /// Display name of the suspended source, if one was open.
    pub fn file_name(&self) -> Option<&str> {
        self.session.name.as_deref()
    }

    pub fn preprocess(&self) -> bool {
        self.session.preprocess
    }

    /// Whether a stream was open when the session was saved.
    pub fn is_open(&self) -> bool {
        self.session.stream.is_some()
    }
}

/// The gateway through which the assembler reads source bytes.
pub struct InputFile<S: Scrubber = Passthrough> {
    session: FileSession,
    scrubber: S,
    scanner: Box<dyn MultibyteScanner>,
    opener: Box<dyn SourceOpener>,
    config: InputConfig,
}

impl InputFile<Passthrough> {
    /// An input layer reading the local file system, without a
    /// preprocessing transform.
    pub fn new(config: InputConfig) -> Self {
        Self::with_scrubber(config, Passthrough::default())
    }
}

impl<S: Scrubber> InputFile<S> {
    pub fn with_scrubber(config: InputConfig, scrubber: S) -> Self {
        InputFile {
            session: FileSession::default(),
            scrubber,
            scanner: Box::new(Utf8Scanner::new()),
            opener: Box::new(FsOpener),
            config,
        }
    }

    /// Replace how named sources and standard input are opened.
    #[must_use]
    pub fn with_opener(mut self, opener: impl SourceOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// Replace the multibyte scanner used on raw (non-preprocessed) input.
    #[must_use]
    pub fn with_scanner(mut self, scanner: impl MultibyteScanner + 'static) -> Self {
        self.scanner = Box::new(scanner);
        self
    }

    /// Reset to "nothing open". Idempotent.
    ///
    /// A stream still open is released without reporting.
    pub fn begin(&mut self) {
        self.close();
        self.session = FileSession::default();
    }

    /// End of input processing; releases whatever is still open.
    pub fn end(&mut self) {
        self.close();
    }

    /// Size of the buffers [`next_buffer`](Self::next_buffer) is meant to fill.
    pub fn buffer_size(&self) -> usize {
        BUFFER_SIZE
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn scrubber(&self) -> &S {
        &self.scrubber
    }

    pub fn scrubber_mut(&mut self) -> &mut S {
        &mut self.scrubber
    }

    pub fn is_open(&self) -> bool {
        self.session.stream.is_some()
    }

    /// Display name of the current (or most recently opened) source.
    pub fn file_name(&self) -> Option<&str> {
        self.session.name.as_deref()
    }

    /// Whether the current source is passed through the scrubber.
    pub fn preprocess(&self) -> bool {
        self.session.preprocess
    }

    /// Suspend the current session and install a blank one.
    ///
    /// Scrubber state is captured only when the current source is
    /// preprocessed.
    #[tracing::instrument(level = "debug", skip_all, fields(file = self.file_name()))]
    pub fn push(&mut self) -> SavedFile<S::State> {
        let session = std::mem::take(&mut self.session);
        let scrub_state = session.preprocess.then(|| self.scrubber.save());
        SavedFile {
            session,
            scrub_state,
            multibyte_partial: self.scanner.take_partial(),
        }
    }

    /// Close the current source and resume a suspended one.
    #[tracing::instrument(level = "debug", skip_all, fields(file = saved.file_name()))]
    pub fn pop(&mut self, saved: SavedFile<S::State>) {
        self.end();

        let SavedFile {
            session,
            scrub_state,
            multibyte_partial,
        } = saved;
        self.session = session;
        if let Some(state) = scrub_state {
            self.scrubber.restore(state);
        }
        self.scanner.restore_partial(multibyte_partial);
    }

    /// Open `name` for reading; the empty name means standard input.
    ///
    /// `preprocess` is the caller's hint. A `#APP` or `#NO_APP` first line
    /// overrides it. An empty source is closed immediately and is not an
    /// error. On failure the problem is reported to `sink`, nothing is
    /// left open, and the caller should abandon the unit of work.
    #[tracing::instrument(level = "debug", skip_all, fields(name = %name, preprocess = preprocess))]
    pub fn open(
        &mut self,
        name: &str,
        preprocess: bool,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), ErrorGuaranteed> {
        self.close();
        self.session.preprocess = preprocess;

        let (source, shown_name): (_, Rc<str>) = if name.is_empty() {
            (Ok(self.opener.stdin()), Rc::from(STDIN_NAME))
        } else {
            (self.opener.open(Path::new(name)), Rc::from(name))
        };
        self.session.name = Some(Rc::clone(&shown_name));

        let mut stream = match source {
            Ok(source) => InputStream::new(source),
            Err(source) => {
                return Err(sink.emit_error(
                    InputError::Open {
                        name: shown_name.to_string(),
                        source,
                    }
                    .into_diagnostic(),
                ));
            }
        };

        match sniff(&mut stream, &self.config) {
            Ok(Sniffed::Empty) => {
                tracing::debug!(file = &*shown_name, "empty input");
                release(stream, &shown_name);
                Ok(())
            }
            Ok(Sniffed::NoDirective) => {
                self.session.stream = Some(stream);
                Ok(())
            }
            Ok(Sniffed::Directive(directive)) => {
                tracing::debug!(file = &*shown_name, ?directive, "first-line directive");
                self.session.preprocess = directive.preprocess();
                self.session.stream = Some(stream);
                Ok(())
            }
            Err(source) => {
                release(stream, &shown_name);
                Err(sink.emit_error(
                    InputError::Read {
                        name: shown_name.to_string(),
                        source,
                    }
                    .into_diagnostic(),
                ))
            }
        }
    }

    /// Release the current stream, if any.
    ///
    /// Whatever the scanner and scrubber still hold from that stream is
    /// discarded, so the next source starts clean.
    pub fn close(&mut self) {
        if let Some(stream) = self.session.stream.take() {
            let name = self.session.name.as_deref().unwrap_or_default();
            release(stream, name);
        }
        self.scanner.take_partial();
        self.scrubber.reset();
    }
}

/// Close a stream whose close result nobody is waiting for.
fn release(stream: InputStream, name: &str) {
    if let Err(err) = stream.close() {
        tracing::debug!(file = name, %err, "close failed");
    }
}
