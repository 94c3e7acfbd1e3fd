#[cfg(feature = "serde")]
use serde::Serialize;

use super::crc32;
use crate::messages::tables::time_status_label;
use crate::prelude::*;

/// Binary log sync preamble.
pub const SYNC: [u8; 3] = [0xaa, 0x44, 0x12];

/// Message id as found at header offset 4.
pub type MessageId = u16;

/// A complete binary log, `header || body`, whose checksum has been verified.
///
/// The trailing checksum is not part of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    data: Vec<u8>,
}

impl RawFrame {
    /// Offset of the header length byte.
    pub const HEADER_LEN_OFFSET: usize = 3;
    /// Offset of the message id.
    pub const MESSAGE_ID_OFFSET: usize = 4;
    /// Offset of the body length.
    pub const BODY_LEN_OFFSET: usize = 8;
    /// Smallest header that still contains the body length field.
    pub const MIN_HEADER_LEN: usize = Self::BODY_LEN_OFFSET + 2;

    /// Wrap data already validated by the scanner.
    pub(crate) fn new_unchecked(data: Vec<u8>) -> Self {
        debug_assert!(data.len() >= Self::MIN_HEADER_LEN);
        RawFrame { data }
    }

    /// Construct from `header || body` bytes, e.g., a log captured elsewhere.
    ///
    /// The checksum is not verified since it is not part of the data.
    ///
    /// # Errors
    /// [Error::InvalidFrame] if the sync bytes are missing or the header is too short
    /// to contain the body length, [Error::NotEnoughData] if `data` is shorter than
    /// the lengths in its header claim, or longer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() < Self::MIN_HEADER_LEN {
            return Err(Error::NotEnoughData {
                actual: data.len(),
                minimum: Self::MIN_HEADER_LEN,
            });
        }
        if data[..SYNC.len()] != SYNC {
            return Err(Error::InvalidFrame(format!(
                "bad sync bytes {:02x?}",
                &data[..SYNC.len()]
            )));
        }
        let frame = RawFrame { data };
        if frame.header_len() < Self::MIN_HEADER_LEN {
            return Err(Error::InvalidFrame(format!(
                "header length {} is less than {}",
                frame.header_len(),
                Self::MIN_HEADER_LEN
            )));
        }
        let want = frame.header_len() + frame.body_len();
        if frame.data.len() < want {
            return Err(Error::NotEnoughData {
                actual: frame.data.len(),
                minimum: want,
            });
        }
        if frame.data.len() > want {
            return Err(Error::InvalidFrame(format!(
                "{} bytes, expected {want}",
                frame.data.len()
            )));
        }
        Ok(frame)
    }

    #[must_use]
    pub fn header_len(&self) -> usize {
        self.data[Self::HEADER_LEN_OFFSET] as usize
    }

    #[must_use]
    pub fn body_len(&self) -> usize {
        let off = Self::BODY_LEN_OFFSET;
        u16::from_le_bytes([self.data[off], self.data[off + 1]]) as usize
    }

    #[must_use]
    pub fn message_id(&self) -> MessageId {
        let off = Self::MESSAGE_ID_OFFSET;
        u16::from_le_bytes([self.data[off], self.data[off + 1]])
    }

    #[must_use]
    pub fn header_bytes(&self) -> &[u8] {
        &self.data[..self.header_len()]
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.data[self.header_len()..]
    }

    /// All frame bytes, header and body.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Checksum of the frame data, i.e., the value that trails it on the wire.
    #[must_use]
    pub fn crc(&self) -> u32 {
        crc32(&self.data)
    }

    /// Decoded header, or `None` if this frame uses a header shorter than the
    /// standard binary header.
    #[must_use]
    pub fn header(&self) -> Option<Header> {
        Header::decode(self.header_bytes())
    }
}

/// Format of a log, from bits 5-6 of the message type.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Binary,
    Ascii,
    AbbreviatedAscii,
    Reserved,
}

/// Standard binary log header.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub header_len: u8,
    pub message_id: MessageId,
    pub message_type: u8,
    pub port_address: u8,
    /// Length of the body in bytes.
    pub message_len: u16,
    pub sequence: u16,
    /// Processor idle time, in units of 0.5%.
    pub idle_time: u8,
    pub time_status: u8,
    /// GPS reference week.
    pub week: u16,
    /// Milliseconds into the GPS reference week.
    pub milliseconds: u32,
    pub receiver_status: u32,
    pub reserved: u16,
    pub receiver_sw_version: u16,
}

impl Header {
    /// Length of the standard header.
    pub const LEN: usize = 28;

    const RESPONSE_BIT: u8 = 0x80;

    /// Decode from bytes, or `None` if there are not enough bytes.
    #[must_use]
    pub fn decode(dat: &[u8]) -> Option<Self> {
        if dat.len() < Self::LEN {
            return None;
        }
        let u16_at = |off: usize| u16::from_le_bytes([dat[off], dat[off + 1]]);
        let u32_at =
            |off: usize| u32::from_le_bytes([dat[off], dat[off + 1], dat[off + 2], dat[off + 3]]);

        Some(Header {
            header_len: dat[3],
            message_id: u16_at(4),
            message_type: dat[6],
            port_address: dat[7],
            message_len: u16_at(8),
            sequence: u16_at(10),
            idle_time: dat[12],
            time_status: dat[13],
            week: u16_at(14),
            milliseconds: u32_at(16),
            receiver_status: u32_at(20),
            reserved: u16_at(24),
            receiver_sw_version: u16_at(26),
        })
    }

    #[must_use]
    pub fn format(&self) -> MessageFormat {
        match (self.message_type >> 5) & 0x3 {
            0 => MessageFormat::Binary,
            1 => MessageFormat::Ascii,
            2 => MessageFormat::AbbreviatedAscii,
            _ => MessageFormat::Reserved,
        }
    }

    /// True if this log is a response to a command rather than an original log.
    #[must_use]
    pub fn is_response(&self) -> bool {
        self.message_type & Self::RESPONSE_BIT == Self::RESPONSE_BIT
    }

    /// Processor idle time as a percentage.
    #[must_use]
    pub fn idle_percent(&self) -> f32 {
        f32::from(self.idle_time) / 2.0
    }

    #[must_use]
    pub fn time_status_label(&self) -> &'static str {
        time_status_label(self.time_status)
    }

    /// GPS time of this log.
    #[cfg(feature = "timecode")]
    #[must_use]
    pub fn epoch(&self) -> hifitime::Epoch {
        hifitime::Epoch::from_time_of_week(
            u32::from(self.week),
            u64::from(self.milliseconds) * 1_000_000,
            hifitime::TimeScale::GPST,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes() -> Vec<u8> {
        hex::decode(concat!(
            "aa44121c", // sync, header length 28
            "2a00",     // message id 42
            "02",       // message type, binary original
            "20",       // port address
            "4800",     // message length 72
            "0700",     // sequence 7
            "91",       // idle 72.5%
            "b4",       // time status 180 FINESTEERING
            "e907",     // week 2025
            "10a7d201", // milliseconds 30_582_544
            "00000002", // receiver status
            "0000",     // reserved
            "fe43",     // sw version 17406
        ))
        .unwrap()
    }

    #[test]
    fn decode_header() {
        let header = Header::decode(&header_bytes()).unwrap();

        assert_eq!(header.header_len, 28);
        assert_eq!(header.message_id, 42);
        assert_eq!(header.format(), MessageFormat::Binary);
        assert!(!header.is_response());
        assert_eq!(header.port_address, 0x20);
        assert_eq!(header.message_len, 72);
        assert_eq!(header.sequence, 7);
        assert!((header.idle_percent() - 72.5).abs() < f32::EPSILON);
        assert_eq!(header.time_status_label(), "FINESTEERING");
        assert_eq!(header.week, 2025);
        assert_eq!(header.milliseconds, 30_582_544);
        assert_eq!(header.receiver_status, 0x0200_0000);
        assert_eq!(header.receiver_sw_version, 17406);
    }

    #[test]
    fn decode_header_is_none_when_data_too_short() {
        assert!(Header::decode(&header_bytes()[..27]).is_none());
    }

    #[test]
    fn response_and_ascii_format_bits() {
        let mut dat = header_bytes();
        dat[6] = 0x80 | 0x20;
        let header = Header::decode(&dat).unwrap();
        assert!(header.is_response());
        assert_eq!(header.format(), MessageFormat::Ascii);
    }

    #[cfg(feature = "timecode")]
    #[test]
    fn header_epoch_is_gps_time_of_week() {
        let header = Header::decode(&header_bytes()).unwrap();
        let epoch = header.epoch();
        let (week, nanos) = epoch.to_time_of_week();
        assert_eq!(week, 2025);
        assert_eq!(nanos, 30_582_544 * 1_000_000);
    }

    #[test]
    fn from_bytes_accepts_consistent_frame() {
        let mut dat = header_bytes();
        dat[8] = 4;
        dat[9] = 0;
        dat.extend([1, 2, 3, 4]);
        let frame = RawFrame::from_bytes(dat).unwrap();

        assert_eq!(frame.header_len(), 28);
        assert_eq!(frame.body_len(), 4);
        assert_eq!(frame.message_id(), 42);
        assert_eq!(frame.header_bytes().len(), 28);
        assert_eq!(frame.body(), &[1, 2, 3, 4]);
        assert_eq!(frame.header().unwrap().message_len, 4);
    }

    #[test]
    fn from_bytes_rejects_truncated_body() {
        let zult = RawFrame::from_bytes(header_bytes());
        assert!(
            matches!(
                zult,
                Err(Error::NotEnoughData {
                    actual: 28,
                    minimum: 100
                })
            ),
            "got {zult:?}"
        );
    }

    #[test]
    fn from_bytes_rejects_bad_sync() {
        let mut dat = header_bytes();
        dat[1] = 0x45;
        assert!(matches!(
            RawFrame::from_bytes(dat),
            Err(Error::InvalidFrame(_))
        ));
    }

    #[test]
    fn from_bytes_rejects_short_header_len() {
        let mut dat = header_bytes();
        dat[3] = 9;
        assert!(matches!(
            RawFrame::from_bytes(dat),
            Err(Error::InvalidFrame(_))
        ));
    }

    #[test]
    fn short_header_has_no_decoded_header() {
        // 12 byte header, no body
        let dat = vec![0xaa, 0x44, 0x12, 12, 42, 0, 0, 0, 0, 0, 0, 0];
        let frame = RawFrame::from_bytes(dat).unwrap();
        assert_eq!(frame.message_id(), 42);
        assert!(frame.header().is_none());
        assert!(frame.body().is_empty());
    }
}
