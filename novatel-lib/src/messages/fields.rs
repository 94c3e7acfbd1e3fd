use crate::framing::{MessageId, RawFrame};
use crate::prelude::*;

/// Typed little-endian reads at fixed offsets into a frame body.
///
/// Offsets are relative to the start of the body. Any read past the end of the
/// frame is an [Error::FieldOverrun].
pub(crate) struct Fields<'a> {
    message_id: MessageId,
    body: &'a [u8],
}

impl<'a> Fields<'a> {
    pub fn new(frame: &'a RawFrame) -> Self {
        Fields {
            message_id: frame.message_id(),
            body: frame.body(),
        }
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.body.get(offset..end))
            .ok_or_else(|| Error::FieldOverrun {
                message_id: self.message_id,
                offset,
                len,
                available: self.body.len(),
            })
    }

    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.slice(offset, N)?);
        Ok(buf)
    }

    pub fn u8(&self, offset: usize) -> Result<u8> {
        Ok(self.array::<1>(offset)?[0])
    }

    pub fn i32(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.array(offset)?))
    }

    pub fn f32(&self, offset: usize) -> Result<f32> {
        Ok(f32::from_le_bytes(self.array(offset)?))
    }

    pub fn f64(&self, offset: usize) -> Result<f64> {
        Ok(f64::from_le_bytes(self.array(offset)?))
    }

    /// Fixed width, null padded ASCII text. The text ends at the first null, or
    /// fills the field when there is none. Non-ASCII bytes become `?`.
    pub fn ascii(&self, offset: usize, len: usize) -> Result<String> {
        let dat = self.slice(offset, len)?;
        let end = dat.iter().position(|b| *b == 0).unwrap_or(dat.len());
        Ok(dat[..end]
            .iter()
            .map(|b| if b.is_ascii() { char::from(*b) } else { '?' })
            .collect())
    }
}
