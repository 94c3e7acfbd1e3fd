use std::io::{self, ErrorKind, Read};
use std::time::{Duration, Instant};

use crate::prelude::*;

/// Point in time after which reads give up with [Error::Timeout]. A deadline
/// without a limit never expires.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn new(limit: Option<Duration>) -> Self {
        Deadline {
            start: Instant::now(),
            limit,
        }
    }

    pub fn check(&self) -> Result<()> {
        match self.limit {
            Some(limit) if self.start.elapsed() >= limit => Err(Error::Timeout(limit)),
            _ => Ok(()),
        }
    }
}

/// Transports like serial ports report an expired per-read timeout as an error even
/// though more bytes may still arrive.
fn is_retryable(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
    )
}

/// Bytes reads single bytes, or exact-sized chunks, from a reader while keeping
/// count of how many bytes have been consumed.
///
/// Reads that fail with a retryable transport timeout are repeated until the
/// provided [Deadline] expires, so partially received chunks are never lost.
pub(crate) struct Bytes<R>
where
    R: Read + Send,
{
    reader: R,
    num_read: usize,
    buf: [u8; 1],
}

impl<R> Bytes<R>
where
    R: Read + Send,
{
    pub fn new(reader: R) -> Self {
        Bytes {
            reader,
            num_read: 0,
            buf: [0u8; 1],
        }
    }

    /// Next byte from the reader, or `None` at end of stream.
    pub fn next(&mut self, deadline: &Deadline) -> Result<Option<u8>> {
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.num_read += 1;
                    return Ok(Some(self.buf[0]));
                }
                Err(err) if is_retryable(&err) => deadline.check()?,
                Err(err) => return Err(Error::Io(err)),
            }
        }
    }

    /// Fill `buf` completely. Returns `false` if the stream ended first.
    pub fn fill(&mut self, buf: &mut [u8], deadline: &Deadline) -> Result<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    filled += n;
                    self.num_read += n;
                }
                Err(err) if is_retryable(&err) => deadline.check()?,
                Err(err) => return Err(Error::Io(err)),
            }
        }
        Ok(true)
    }

    /// Number of bytes consumed from the reader.
    pub fn offset(&self) -> usize {
        self.num_read
    }
}
