#[cfg(feature = "serde")]
use serde::Serialize;

use super::fields::Fields;
use super::tables::component_type_label;
use super::Coded;
use crate::framing::RawFrame;
use crate::prelude::*;

/// Receiver hardware and firmware versions, one entry per component.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub components: Vec<Component>,
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub component_type: Coded,
    pub model: String,
    pub serial_number: String,
    pub hardware_version: String,
    pub software_version: String,
    pub boot_version: String,
    pub compile_date: String,
    pub compile_time: String,
}

impl Version {
    pub const MESSAGE_ID: u16 = 37;
    /// Size of a single component record.
    pub const COMPONENT_LEN: usize = 108;

    pub(super) fn decode(frame: &RawFrame) -> Result<Self> {
        let f = Fields::new(frame);

        // A negative count has no components
        let count = usize::try_from(f.i32(0)?).unwrap_or(0);
        let mut components = Vec::new();
        for idx in 0..count {
            let base = 4 + idx * Self::COMPONENT_LEN;
            components.push(Component {
                component_type: Coded::new(f.i32(base)?, component_type_label),
                model: f.ascii(base + 4, 16)?,
                serial_number: f.ascii(base + 20, 16)?,
                hardware_version: f.ascii(base + 36, 16)?,
                software_version: f.ascii(base + 52, 16)?,
                boot_version: f.ascii(base + 68, 16)?,
                compile_date: f.ascii(base + 84, 12)?,
                compile_time: f.ascii(base + 96, 12)?,
            });
        }

        Ok(Version { components })
    }
}
