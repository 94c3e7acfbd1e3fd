use std::time::Duration;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Not enough bytes")]
    NotEnoughData { actual: usize, minimum: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No valid frame was produced before the scan deadline.
    #[error("no valid frame within {0:?}")]
    Timeout(Duration),

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// A checksum-valid frame whose fixed field offsets run past its data. This
    /// indicates corrupt content rather than a stream problem.
    #[error("message {message_id} field at offset {offset} (len {len}) overruns {available} bytes")]
    FieldOverrun {
        message_id: u16,
        offset: usize,
        len: usize,
        available: usize,
    },
}

impl Error {
    /// True for errors where the caller may simply try again, e.g., request the log
    /// again and rescan.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
