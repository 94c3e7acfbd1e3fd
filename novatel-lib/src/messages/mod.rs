//! Decoding of framed binary logs into records.
//!
//! Fields are read from fixed offsets relative to the end of the header. Only
//! [BestPos] and [Version] logs are decoded; every other message id is skipped.
mod bestpos;
mod fields;
pub mod flags;
pub mod tables;
mod version;

use std::io::Read;

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::trace;

use crate::framing::{read_frames, RawFrame, ScanOpts};
use crate::prelude::*;

pub use bestpos::BestPos;
pub use version::{Component, Version};

/// An enumerated field value along with its label.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coded {
    pub code: i32,
    pub label: &'static str,
}

impl Coded {
    fn new(code: i32, lookup: fn(i32) -> &'static str) -> Self {
        Coded {
            code,
            label: lookup(code),
        }
    }
}

impl std::fmt::Display for Coded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

/// A decoded log.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "log", rename_all = "lowercase"))]
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Record {
    BestPos(BestPos),
    Version(Version),
}

impl Record {
    #[must_use]
    pub fn message_id(&self) -> u16 {
        match self {
            Record::BestPos(_) => BestPos::MESSAGE_ID,
            Record::Version(_) => Version::MESSAGE_ID,
        }
    }
}

/// Decode the fields of `frame`.
///
/// Returns `Ok(None)` for message ids that are not decoded; such frames are valid
/// but their content is ignored.
///
/// # Errors
/// [Error::FieldOverrun] if the frame is too short for the fields of its message
/// type. Since frames are checksum validated this means the log content is corrupt.
pub fn decode(frame: &RawFrame) -> Result<Option<Record>> {
    let record: Record = match frame.message_id() {
        BestPos::MESSAGE_ID => BestPos::decode(frame)?.into(),
        Version::MESSAGE_ID => Version::decode(frame)?.into(),
        id => {
            trace!(message_id = id, "not decoding message");
            return Ok(None);
        }
    };
    Ok(Some(record))
}

/// Creates an iterator of [Record]s decoded from frames found in `reader`.
///
/// Frames with message ids that are not decoded are skipped.
///
/// # Errors
/// Scan errors are passed on as described for [FrameIter](crate::framing::FrameIter),
/// as are errors from [decode].
pub fn decode_records<R>(reader: R, opts: ScanOpts) -> impl Iterator<Item = Result<Record>>
where
    R: Read + Send,
{
    read_frames(reader, opts).filter_map(|frame| match frame {
        Ok(frame) => decode(&frame).transpose(),
        Err(err) => Some(Err(err)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::crc32;

    const HEADER_LEN: u8 = 28;

    fn frame(message_id: u16, body: &[u8]) -> RawFrame {
        let mut dat = vec![0u8; HEADER_LEN as usize];
        dat[..3].copy_from_slice(&[0xaa, 0x44, 0x12]);
        dat[3] = HEADER_LEN;
        dat[4..6].copy_from_slice(&message_id.to_le_bytes());
        dat[8..10].copy_from_slice(&u16::try_from(body.len()).unwrap().to_le_bytes());
        dat.extend(body);
        RawFrame::from_bytes(dat).unwrap()
    }

    fn bestpos_body(position_type: i32) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend(0i32.to_le_bytes());
        body.extend(position_type.to_le_bytes());
        body.extend(37.123_456_789_0f64.to_le_bytes());
        body.extend((-122.987_654_321_0f64).to_le_bytes());
        body.extend(12.345f64.to_le_bytes());
        body.extend((-31.5f32).to_le_bytes());
        body.extend(61i32.to_le_bytes());
        body.extend(1.25f32.to_le_bytes());
        body.extend(0.75f32.to_le_bytes());
        body.extend(2.5f32.to_le_bytes());
        body.extend(b"AB1\0");
        body.extend(3.0f32.to_le_bytes());
        body.extend(0.5f32.to_le_bytes());
        body.extend([22, 18, 17, 15]);
        body.extend([0, 0x07, 0x31, 0x37]);
        body
    }

    fn component(kind: i32, model: &str) -> Vec<u8> {
        let mut rec = kind.to_le_bytes().to_vec();
        let field = |s: &str, len: usize| {
            let mut f = s.as_bytes().to_vec();
            f.resize(len, 0);
            f
        };
        rec.extend(field(model, 16));
        rec.extend(field("BMHR15470120X", 16));
        rec.extend(field("OEM615-2.00", 16));
        rec.extend(field("OEM060700RN0000", 16));
        rec.extend(field("OEM060200RB0000", 16));
        rec.extend(field("2016/Nov/28", 12));
        rec.extend(field("11:13:46", 12));
        assert_eq!(rec.len(), Version::COMPONENT_LEN);
        rec
    }

    #[test]
    fn decode_bestpos() {
        let frame = frame(BestPos::MESSAGE_ID, &bestpos_body(16));

        let Some(Record::BestPos(pos)) = decode(&frame).unwrap() else {
            panic!("expected bestpos");
        };

        assert_eq!(pos.solution_status.label, "Solution computed");
        assert_eq!(pos.position_type.code, 16);
        assert_eq!(pos.position_type.label, "SINGLE");
        assert!(pos.is_single_point());
        assert_eq!(pos.latitude, 37.123_456_789_0);
        assert_eq!(pos.longitude, -122.987_654_321_0);
        assert_eq!(pos.height, 12.345);
        assert_eq!(pos.undulation, -31.5);
        assert_eq!(pos.datum.label, "WGS84");
        assert_eq!(pos.latitude_std_dev, 1.25);
        assert_eq!(pos.longitude_std_dev, 0.75);
        assert_eq!(pos.height_std_dev, 2.5);
        assert_eq!(pos.base_station_id, "AB1");
        assert_eq!(pos.differential_age, 3.0);
        assert_eq!(pos.solution_age, 0.5);
        assert_eq!(
            (pos.sats_tracked, pos.sats_used, pos.sats_l1_used, pos.sats_multi_used),
            (22, 18, 17, 15)
        );
        assert_eq!(pos.extended_status.glide, Some(true));
        assert!(pos.extended_status.iono_multi_frequency);
        assert!(pos.signals_used.beidou_b2);
        assert!(pos.signals_used.gps_l5);
    }

    #[test]
    fn decode_bestpos_glide_not_reported_unless_single() {
        let frame = frame(BestPos::MESSAGE_ID, &bestpos_body(50));

        let Some(Record::BestPos(pos)) = decode(&frame).unwrap() else {
            panic!("expected bestpos");
        };
        assert_eq!(pos.position_type.label, "NARROW_INT");
        assert_eq!(pos.extended_status.glide, None);
    }

    #[test]
    fn decode_bestpos_with_full_base_station_id() {
        let mut body = bestpos_body(16);
        body[52..56].copy_from_slice(b"BASE");
        let frame = frame(BestPos::MESSAGE_ID, &body);

        let Some(Record::BestPos(pos)) = decode(&frame).unwrap() else {
            panic!("expected bestpos");
        };
        assert_eq!(pos.base_station_id, "BASE");
    }

    #[test]
    fn decode_truncated_bestpos_is_overrun() {
        let body = bestpos_body(16);
        let frame = frame(BestPos::MESSAGE_ID, &body[..60]);

        let zult = decode(&frame);
        assert!(
            matches!(
                zult,
                Err(Error::FieldOverrun {
                    message_id: 42,
                    available: 60,
                    ..
                })
            ),
            "got {zult:?}"
        );
    }

    #[test]
    fn decode_version() {
        let mut body = 2i32.to_le_bytes().to_vec();
        body.extend(component(1, "CARD"));
        body.extend(component(0x3A7A_0000, "HEIGHTMODEL"));
        let frame = frame(Version::MESSAGE_ID, &body);

        let Some(Record::Version(version)) = decode(&frame).unwrap() else {
            panic!("expected version");
        };

        assert_eq!(version.components.len(), 2);
        let card = &version.components[0];
        assert_eq!(card.component_type.label, "OEM family component");
        assert_eq!(card.model, "CARD");
        assert_eq!(card.serial_number, "BMHR15470120X");
        assert_eq!(card.hardware_version, "OEM615-2.00");
        assert_eq!(card.software_version, "OEM060700RN0000");
        assert_eq!(card.boot_version, "OEM060200RB0000");
        assert_eq!(card.compile_date, "2016/Nov/28");
        assert_eq!(card.compile_time, "11:13:46");

        let db = &version.components[1];
        assert_eq!(db.component_type.label, "Height/track model data");
        assert_eq!(db.model, "HEIGHTMODEL");
    }

    #[test]
    fn decode_version_with_negative_count_has_no_components() {
        let frame = frame(Version::MESSAGE_ID, &(-1i32).to_le_bytes());

        let Some(Record::Version(version)) = decode(&frame).unwrap() else {
            panic!("expected version");
        };
        assert!(version.components.is_empty());
    }

    #[test]
    fn decode_version_count_past_data_is_overrun() {
        let mut body = 3i32.to_le_bytes().to_vec();
        body.extend(component(1, "CARD"));
        let frame = frame(Version::MESSAGE_ID, &body);

        assert!(matches!(
            decode(&frame),
            Err(Error::FieldOverrun { message_id: 37, .. })
        ));
    }

    #[test]
    fn decode_unknown_message_is_none() {
        let frame = frame(8, &[1, 2, 3, 4]);

        assert!(decode(&frame).unwrap().is_none());
    }

    #[test]
    fn decode_records_skips_unknown_messages() {
        let mut stream = vec![0x55, 0xaa];
        for (id, body) in [
            (8u16, vec![1u8, 2, 3]),
            (BestPos::MESSAGE_ID, bestpos_body(16)),
            (Version::MESSAGE_ID, 0i32.to_le_bytes().to_vec()),
        ] {
            let frame = frame(id, &body);
            stream.extend(frame.as_bytes());
            stream.extend(crc32(frame.as_bytes()).to_le_bytes());
        }

        let ids: Vec<u16> = decode_records(&stream[..], ScanOpts::new().without_timeout())
            .map(|rec| rec.unwrap().message_id())
            .collect();
        assert_eq!(ids, vec![42, 37]);
    }
}
