#![doc = include_str!("../README.md")]

mod error;

pub mod framing;
pub mod messages;

pub use error::{Error, Result};

mod prelude {
    pub(crate) use crate::error::{Error, Result};
}
