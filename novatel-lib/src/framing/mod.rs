//! Binary log framing.
//!
//! Logs are located in a byte stream by their sync preamble, read using the lengths
//! in their header and validated against the trailing 32-bit checksum.
//!
//! ```text
//! | 0xAA 0x44 0x12 | header len | ... header ... | body (body len bytes) | crc32 (LE) |
//!                                  ^ message id @4, body len @8
//! ```
mod bytes;
mod checksum;
mod frame;
mod scanner;

pub use checksum::*;
pub use frame::*;
pub use scanner::*;
