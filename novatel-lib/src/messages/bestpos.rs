#[cfg(feature = "serde")]
use serde::Serialize;

use super::fields::Fields;
use super::flags::{ExtendedStatus, SignalsUsed};
use super::tables::{datum_label, position_type_label, solution_status_label, POSTYPE_SINGLE};
use super::Coded;
use crate::framing::RawFrame;
use crate::prelude::*;

/// Best available position solution.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BestPos {
    pub solution_status: Coded,
    pub position_type: Coded,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Height above mean sea level in meters.
    pub height: f64,
    /// Geoid undulation in meters.
    pub undulation: f32,
    pub datum: Coded,
    pub latitude_std_dev: f32,
    pub longitude_std_dev: f32,
    pub height_std_dev: f32,
    pub base_station_id: String,
    /// Differential age in seconds.
    pub differential_age: f32,
    /// Solution age in seconds.
    pub solution_age: f32,
    pub sats_tracked: u8,
    pub sats_used: u8,
    /// Satellites with L1/E1/B1 signals used in the solution.
    pub sats_l1_used: u8,
    /// Satellites with multi-frequency signals used in the solution.
    pub sats_multi_used: u8,
    pub extended_status: ExtendedStatus,
    pub signals_used: SignalsUsed,
}

impl BestPos {
    pub const MESSAGE_ID: u16 = 42;

    pub(super) fn decode(frame: &RawFrame) -> Result<Self> {
        let f = Fields::new(frame);

        let position_type = f.i32(4)?;
        Ok(BestPos {
            solution_status: Coded::new(f.i32(0)?, solution_status_label),
            position_type: Coded::new(position_type, position_type_label),
            latitude: f.f64(8)?,
            longitude: f.f64(16)?,
            height: f.f64(24)?,
            undulation: f.f32(32)?,
            datum: Coded::new(f.i32(36)?, datum_label),
            latitude_std_dev: f.f32(40)?,
            longitude_std_dev: f.f32(44)?,
            height_std_dev: f.f32(48)?,
            base_station_id: f.ascii(52, 4)?,
            differential_age: f.f32(56)?,
            solution_age: f.f32(60)?,
            sats_tracked: f.u8(64)?,
            sats_used: f.u8(65)?,
            sats_l1_used: f.u8(66)?,
            sats_multi_used: f.u8(67)?,
            extended_status: ExtendedStatus::new(f.u8(69)?, position_type == POSTYPE_SINGLE),
            signals_used: SignalsUsed::new(f.u8(70)?, f.u8(71)?),
        })
    }

    #[must_use]
    pub fn is_single_point(&self) -> bool {
        self.position_type.code == POSTYPE_SINGLE
    }
}
