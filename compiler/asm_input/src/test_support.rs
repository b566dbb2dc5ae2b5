//! Scripted byte sources for exercising failure paths.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::source::{ByteSource, SourceOpener};

/// Serves `data` in pieces of at most `step` bytes, then optionally fails.
///
/// `fail_at` makes the read that would cross that offset return an error
/// after the bytes before it were delivered. `closed` records whether
/// `close` ran.
pub(crate) struct ScriptedSource {
    data: Vec<u8>,
    pos: usize,
    step: usize,
    fail_at: Option<usize>,
    fail_close: bool,
    pub(crate) closed: Rc<Cell<bool>>,
}

impl ScriptedSource {
    pub(crate) fn new(data: impl Into<Vec<u8>>) -> Self {
        ScriptedSource {
            data: data.into(),
            pos: 0,
            step: usize::MAX,
            fail_at: None,
            fail_close: false,
            closed: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn step(mut self, step: usize) -> Self {
        self.step = step.max(1);
        self
    }

    pub(crate) fn fail_at(mut self, offset: usize) -> Self {
        self.fail_at = Some(offset);
        self
    }

    pub(crate) fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub(crate) fn boxed(self) -> Box<dyn ByteSource> {
        Box::new(self)
    }
}

impl Read for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(fail_at) = self.fail_at {
            if self.pos >= fail_at {
                return Err(io::Error::other("scripted read failure"));
            }
        }

        let end = self
            .fail_at
            .unwrap_or(self.data.len())
            .min(self.data.len())
            .min(self.pos.saturating_add(self.step))
            .min(self.pos + buf.len());
        let n = end - self.pos;
        buf[..n].copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(n)
    }
}

impl ByteSource for ScriptedSource {
    fn close(self: Box<Self>) -> io::Result<()> {
        self.closed.set(true);
        if self.fail_close {
            Err(io::Error::other("scripted close failure"))
        } else {
            Ok(())
        }
    }
}

/// Opener handing out pre-built scripted sources, each at most once.
#[derive(Default)]
pub(crate) struct ScriptedOpener {
    sources: RefCell<HashMap<PathBuf, ScriptedSource>>,
}

impl ScriptedOpener {
    pub(crate) fn with(self, path: &str, source: ScriptedSource) -> Self {
        self.sources.borrow_mut().insert(PathBuf::from(path), source);
        self
    }
}

impl SourceOpener for ScriptedOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn ByteSource>> {
        self.sources
            .borrow_mut()
            .remove(path)
            .map(ScriptedSource::boxed)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
    }

    fn stdin(&self) -> Box<dyn ByteSource> {
        ScriptedSource::new("").boxed()
    }
}
