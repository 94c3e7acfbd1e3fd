//! Bit flags carried in position logs.
//!
//! A flag is active only when *all* of its bits are set. Several ionospheric
//! correction values share bits, e.g., multi-frequency (`0x06`) is only active when
//! both the Klobuchar (`0x02`) and SBAS (`0x04`) bits are set.

#[cfg(feature = "serde")]
use serde::Serialize;

/// True when every bit of `flag` is set in `value`.
#[must_use]
pub fn is_flag_active(value: u8, flag: u8) -> bool {
    value & flag == flag
}

/// Extended solution status bits.
pub mod extended_status {
    pub const GLIDE: u8 = 0x01;
    pub const IONO_KLOBUCHAR: u8 = 0x02;
    pub const IONO_SBAS: u8 = 0x04;
    pub const IONO_MULTI_FREQUENCY: u8 = 0x06;
    pub const IONO_PSRDIFF: u8 = 0x08;
    pub const IONO_NOVATEL: u8 = 0x0A;
    pub const ANTENNA_WARNING: u8 = 0x20;
}

/// Signals used mask bits. The two mask bytes have their own bit meanings, so
/// GLONASS and BeiDou reuse the same values.
pub mod signals_used {
    /// Galileo/BeiDou mask.
    pub const GALILEO_E1: u8 = 0x01;
    pub const BEIDOU_B1: u8 = 0x10;
    pub const BEIDOU_B2: u8 = 0x20;

    /// GPS/GLONASS mask.
    pub const GPS_L1: u8 = 0x01;
    pub const GPS_L2: u8 = 0x02;
    pub const GPS_L5: u8 = 0x04;
    pub const GLONASS_L1: u8 = 0x10;
    pub const GLONASS_L2: u8 = 0x20;
}

/// Decoded extended solution status.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedStatus {
    pub raw: u8,
    /// Glide state. Only reported for single point solutions.
    pub glide: Option<bool>,
    pub iono_klobuchar: bool,
    pub iono_sbas: bool,
    pub iono_multi_frequency: bool,
    pub iono_psrdiff: bool,
    pub iono_novatel: bool,
    pub antenna_warning: bool,
}

impl ExtendedStatus {
    #[must_use]
    pub fn new(raw: u8, single_point: bool) -> Self {
        use extended_status::*;
        ExtendedStatus {
            raw,
            glide: single_point.then(|| is_flag_active(raw, GLIDE)),
            iono_klobuchar: is_flag_active(raw, IONO_KLOBUCHAR),
            iono_sbas: is_flag_active(raw, IONO_SBAS),
            iono_multi_frequency: is_flag_active(raw, IONO_MULTI_FREQUENCY),
            iono_psrdiff: is_flag_active(raw, IONO_PSRDIFF),
            iono_novatel: is_flag_active(raw, IONO_NOVATEL),
            antenna_warning: is_flag_active(raw, ANTENNA_WARNING),
        }
    }
}

/// Decoded signals used masks.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalsUsed {
    pub galileo_beidou_mask: u8,
    pub gps_glonass_mask: u8,
    pub galileo_e1: bool,
    pub beidou_b1: bool,
    pub beidou_b2: bool,
    pub gps_l1: bool,
    pub gps_l2: bool,
    pub gps_l5: bool,
    pub glonass_l1: bool,
    pub glonass_l2: bool,
}

impl SignalsUsed {
    #[must_use]
    pub fn new(galileo_beidou_mask: u8, gps_glonass_mask: u8) -> Self {
        use signals_used::*;
        SignalsUsed {
            galileo_beidou_mask,
            gps_glonass_mask,
            galileo_e1: is_flag_active(galileo_beidou_mask, GALILEO_E1),
            beidou_b1: is_flag_active(galileo_beidou_mask, BEIDOU_B1),
            beidou_b2: is_flag_active(galileo_beidou_mask, BEIDOU_B2),
            gps_l1: is_flag_active(gps_glonass_mask, GPS_L1),
            gps_l2: is_flag_active(gps_glonass_mask, GPS_L2),
            gps_l5: is_flag_active(gps_glonass_mask, GPS_L5),
            glonass_l1: is_flag_active(gps_glonass_mask, GLONASS_L1),
            glonass_l2: is_flag_active(gps_glonass_mask, GLONASS_L2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0x06, extended_status::IONO_MULTI_FREQUENCY, true; "multi frequency all bits")]
    #[test_case(0x02, extended_status::IONO_MULTI_FREQUENCY, false; "multi frequency partial")]
    #[test_case(0x0e, extended_status::IONO_NOVATEL, true; "novatel with extra bits")]
    #[test_case(0x08, extended_status::IONO_NOVATEL, false; "novatel partial")]
    #[test_case(0x00, 0x00, true; "empty flag")]
    fn flag_requires_all_bits(value: u8, flag: u8, expected: bool) {
        assert_eq!(is_flag_active(value, flag), expected);
    }

    #[test]
    fn multi_frequency_implies_component_bits() {
        let status = ExtendedStatus::new(0x06, false);
        assert!(status.iono_multi_frequency);
        assert!(status.iono_klobuchar);
        assert!(status.iono_sbas);
        assert!(!status.iono_psrdiff);
        assert!(!status.antenna_warning);
    }

    #[test]
    fn glide_only_reported_for_single_point() {
        assert_eq!(ExtendedStatus::new(0x01, true).glide, Some(true));
        assert_eq!(ExtendedStatus::new(0x00, true).glide, Some(false));
        assert_eq!(ExtendedStatus::new(0x01, false).glide, None);
    }

    #[test]
    fn antenna_warning() {
        let status = ExtendedStatus::new(0x20, false);
        assert!(status.antenna_warning);
        assert!(!status.iono_klobuchar);
    }

    #[test]
    fn mask_bytes_have_separate_meanings() {
        let signals = SignalsUsed::new(0x10, 0x20);
        assert!(signals.beidou_b1);
        assert!(!signals.beidou_b2);
        assert!(!signals.glonass_l1);
        assert!(signals.glonass_l2);
        assert!(!signals.galileo_e1);
        assert!(!signals.gps_l1);
    }

    #[test]
    fn all_signals() {
        let signals = SignalsUsed::new(0x31, 0x37);
        assert!(signals.galileo_e1 && signals.beidou_b1 && signals.beidou_b2);
        assert!(signals.gps_l1 && signals.gps_l2 && signals.gps_l5);
        assert!(signals.glonass_l1 && signals.glonass_l2);
    }
}
