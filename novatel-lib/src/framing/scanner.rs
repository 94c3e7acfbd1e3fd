use std::io::Read;
use std::time::Duration;

use tracing::{debug, trace};

use super::bytes::{Bytes, Deadline};
use super::{crc32, RawFrame, SYNC};
use crate::prelude::*;

/// Options controlling a [Scanner].
#[derive(Debug, Clone)]
pub struct ScanOpts {
    /// Overall time allowed to produce a single frame. `None` scans until a frame
    /// is found or the stream ends.
    pub timeout: Option<Duration>,
}

impl Default for ScanOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanOpts {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

    /// Options using [ScanOpts::DEFAULT_TIMEOUT].
    #[must_use]
    pub fn new() -> Self {
        ScanOpts {
            timeout: Some(Self::DEFAULT_TIMEOUT),
        }
    }

    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut slf = self.clone();
        slf.timeout = Some(timeout);
        slf
    }

    /// Scan without a deadline. Intended for captured data and interactive debugging
    /// where the stream is known to end or the operator will interrupt.
    #[must_use]
    pub fn without_timeout(&self) -> Self {
        let mut slf = self.clone();
        slf.timeout = None;
        slf
    }
}

/// Counters describing what a [Scanner] has seen so far.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Frames returned.
    pub frames: usize,
    /// Candidate frames dropped because of a checksum mismatch.
    pub checksum_mismatches: usize,
    /// Candidate frames dropped because the header length was unusable.
    pub malformed: usize,
    /// Bytes discarded while searching for the sync preamble.
    pub skipped_bytes: usize,
}

/// Position in the sync preamble search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    WantSync1,
    WantSync2,
    WantSync3,
    WantHeaderLen,
}

/// Result of reading the rest of a frame once the preamble is found.
#[derive(Debug)]
enum Candidate {
    Valid(RawFrame),
    ChecksumMismatch { expected: u32, computed: u32 },
    Malformed { header_len: usize },
    EndOfStream,
}

/// Scanner locates binary logs in an unstructured byte stream.
///
/// Bytes are consumed one at a time until the sync preamble is found, after which
/// the header, body and trailing checksum are read. Frames whose checksum does not
/// match are dropped and the search resumes with the byte following them.
///
/// A sync byte 1 seen while matching the rest of the preamble becomes the start of
/// the next candidate preamble, so `0xAA 0xAA 0x44 0x12` syncs on the second `0xAA`.
pub struct Scanner<R>
where
    R: Read + Send,
{
    bytes: Bytes<R>,
    opts: ScanOpts,
    /// Counts of frames and discarded data.
    pub stats: ScanStats,
}

impl<R> Scanner<R>
where
    R: Read + Send,
{
    pub fn new(reader: R, opts: ScanOpts) -> Self {
        Scanner {
            bytes: Bytes::new(reader),
            opts,
            stats: ScanStats::default(),
        }
    }

    /// Number of bytes consumed from the stream.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.bytes.offset()
    }

    /// Scan for the next valid frame.
    ///
    /// Returns `Ok(None)` if the stream ends before a complete valid frame is read.
    ///
    /// # Errors
    /// [Error::Timeout] if the configured timeout elapses before a valid frame is
    /// found. [Error::Io] for any transport failure other than a read timeout.
    pub fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        let deadline = Deadline::new(self.opts.timeout);
        let mut state = SyncState::WantSync1;

        loop {
            deadline.check()?;

            if state == SyncState::WantHeaderLen {
                let Some(header_len) = self.bytes.next(&deadline)? else {
                    return Ok(None);
                };
                match self.read_candidate(header_len, &deadline)? {
                    Candidate::Valid(frame) => {
                        self.stats.frames += 1;
                        trace!(
                            message_id = frame.message_id(),
                            len = frame.as_bytes().len(),
                            offset = self.offset(),
                            "frame"
                        );
                        return Ok(Some(frame));
                    }
                    Candidate::ChecksumMismatch { expected, computed } => {
                        self.stats.checksum_mismatches += 1;
                        debug!(
                            offset = self.offset(),
                            "checksum mismatch: expected {expected:#010x}, computed {computed:#010x}"
                        );
                    }
                    Candidate::Malformed { header_len } => {
                        self.stats.malformed += 1;
                        debug!(offset = self.offset(), header_len, "unusable header length");
                    }
                    Candidate::EndOfStream => return Ok(None),
                }
                state = SyncState::WantSync1;
                continue;
            }

            let Some(b) = self.bytes.next(&deadline)? else {
                return Ok(None);
            };
            state = match (state, b) {
                (SyncState::WantSync1, b) if b == SYNC[0] => SyncState::WantSync2,
                (SyncState::WantSync1, _) => {
                    self.stats.skipped_bytes += 1;
                    SyncState::WantSync1
                }
                (SyncState::WantSync2, b) if b == SYNC[1] => SyncState::WantSync3,
                (SyncState::WantSync3, b) if b == SYNC[2] => SyncState::WantHeaderLen,
                // A new sync byte 1 anchors the next candidate, dropping the bytes
                // matched before it.
                (SyncState::WantSync2 | SyncState::WantSync3, b) if b == SYNC[0] => {
                    self.stats.skipped_bytes += Self::matched(state);
                    SyncState::WantSync2
                }
                (SyncState::WantSync2 | SyncState::WantSync3, _) => {
                    self.stats.skipped_bytes += Self::matched(state) + 1;
                    SyncState::WantSync1
                }
                (SyncState::WantHeaderLen, _) => unreachable!("header length handled above"),
            };
        }
    }

    /// Number of preamble bytes already matched in `state`.
    fn matched(state: SyncState) -> usize {
        match state {
            SyncState::WantSync1 => 0,
            SyncState::WantSync2 => 1,
            SyncState::WantSync3 => 2,
            SyncState::WantHeaderLen => 3,
        }
    }

    /// Read the remainder of a frame whose preamble and header length byte have
    /// been consumed, followed by its checksum.
    fn read_candidate(&mut self, header_len: u8, deadline: &Deadline) -> Result<Candidate> {
        let header_len = header_len as usize;
        if header_len < RawFrame::MIN_HEADER_LEN {
            return Ok(Candidate::Malformed { header_len });
        }

        let mut data = vec![0u8; header_len];
        data[..SYNC.len()].copy_from_slice(&SYNC);
        data[RawFrame::HEADER_LEN_OFFSET] = header_len as u8;
        if !self.bytes.fill(&mut data[RawFrame::HEADER_LEN_OFFSET + 1..], deadline)? {
            return Ok(Candidate::EndOfStream);
        }

        let off = RawFrame::BODY_LEN_OFFSET;
        let body_len = u16::from_le_bytes([data[off], data[off + 1]]) as usize;
        data.resize(header_len + body_len, 0);
        if !self.bytes.fill(&mut data[header_len..], deadline)? {
            return Ok(Candidate::EndOfStream);
        }

        let mut crc = [0u8; 4];
        if !self.bytes.fill(&mut crc, deadline)? {
            return Ok(Candidate::EndOfStream);
        }
        let expected = u32::from_le_bytes(crc);
        let computed = crc32(&data);
        if expected != computed {
            return Ok(Candidate::ChecksumMismatch { expected, computed });
        }

        Ok(Candidate::Valid(RawFrame::new_unchecked(data)))
    }
}

impl<R> IntoIterator for Scanner<R>
where
    R: Read + Send,
{
    type Item = Result<RawFrame>;
    type IntoIter = FrameIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        FrameIter {
            scanner: self,
            done: false,
        }
    }
}

/// Iterates over valid frames produced by a [Scanner].
///
/// ## Errors
/// The iterator ends at end of stream and after a transport error, which is passed
/// on first. Timeouts are passed on and scanning continues on the following call.
pub struct FrameIter<R>
where
    R: Read + Send,
{
    scanner: Scanner<R>,
    done: bool,
}

impl<R> FrameIter<R>
where
    R: Read + Send,
{
    /// Counts for the underlying scanner.
    #[must_use]
    pub fn stats(&self) -> &ScanStats {
        &self.scanner.stats
    }
}

impl<R> Iterator for FrameIter<R>
where
    R: Read + Send,
{
    type Item = Result<RawFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                if !err.is_timeout() {
                    self.done = true;
                }
                Some(Err(err))
            }
        }
    }
}

/// Creates an iterator of valid frames read from `reader`.
///
/// For more control over the scanning process see [Scanner].
pub fn read_frames<R>(reader: R, opts: ScanOpts) -> FrameIter<R>
where
    R: Read + Send,
{
    Scanner::new(reader, opts).into_iter()
}
