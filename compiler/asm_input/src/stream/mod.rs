//! Buffered byte stream with explicit one-byte pushback.
//!
//! The directive sniffer needs to look ahead and then put bytes back. The
//! amount it ever puts back is a single byte, so instead of an open-ended
//! unget primitive the stream owns exactly one pushback slot.
//!
//! End of input and read failure are sticky, mirroring the eof/error flags
//! of a C stream: once either is seen, the underlying source is not read
//! again. A byte in the pushback slot is still delivered first.

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

use crate::source::ByteSource;

/// Outcome of a bulk read: bytes transferred, plus the error that stopped
/// the read early, if any.
#[derive(Debug)]
pub struct RawRead {
    pub count: usize,
    pub error: Option<io::Error>,
}

pub struct InputStream {
    reader: BufReader<Box<dyn ByteSource>>,
    pushback: Option<u8>,
    eof: bool,
    failed: bool,
}

impl InputStream {
    pub fn new(source: Box<dyn ByteSource>) -> Self {
        InputStream {
            reader: BufReader::new(source),
            pushback: None,
            eof: false,
            failed: false,
        }
    }

    /// Whether the underlying source reported end of input.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Whether a read from the underlying source failed.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Read one byte. `Ok(None)` at end of input or after a failure.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }
        if self.eof || self.failed {
            return Ok(None);
        }

        loop {
            let first = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.failed = true;
                    return Err(err);
                }
            };

            if first.is_some() {
                self.reader.consume(1);
            } else {
                self.eof = true;
            }
            return Ok(first);
        }
    }

    /// Read one line of at most `max - 1` bytes, keeping the newline.
    ///
    /// Stops after a newline, at end of input, or when the limit is hit.
    /// Returns `Ok(None)` if end of input is reached before any byte.
    pub fn read_line(&mut self, max: usize) -> io::Result<Option<Vec<u8>>> {
        let limit = max.saturating_sub(1);
        let mut line = Vec::with_capacity(limit);

        while line.len() < limit {
            let Some(byte) = self.read_byte()? else {
                break;
            };
            line.push(byte);
            if byte == b'\n' {
                break;
            }
        }

        if line.is_empty() && limit > 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    /// Push one byte back so the next read returns it.
    ///
    /// Only one byte of pushback exists; the slot must be empty.
    pub fn unread(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "pushback slot already full");
        self.pushback = Some(byte);
    }

    /// Fill `buf` as far as the source allows.
    ///
    /// Keeps reading until the buffer is full, input ends, or a read fails.
    /// On failure the bytes transferred so far are still counted.
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> RawRead {
        let mut count = 0;
        if buf.is_empty() {
            return RawRead { count, error: None };
        }

        if let Some(byte) = self.pushback.take() {
            buf[0] = byte;
            count = 1;
        }

        while count < buf.len() && !self.eof && !self.failed {
            match self.reader.read(&mut buf[count..]) {
                Ok(0) => self.eof = true,
                Ok(n) => count += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.failed = true;
                    return RawRead {
                        count,
                        error: Some(err),
                    };
                }
            }
        }

        RawRead { count, error: None }
    }

    /// Release the underlying source. Buffered, unread bytes are discarded.
    pub fn close(self) -> io::Result<()> {
        self.reader.into_inner().close()
    }
}

impl fmt::Debug for InputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStream")
            .field("pushback", &self.pushback)
            .field("eof", &self.eof)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
