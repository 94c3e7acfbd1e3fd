//! The 32-bit checksum trailing every binary log.
//!
//! This is a bit-reflected CRC-32 using polynomial `0xEDB88320`, computed one
//! byte at a time with no initial or final complement. It is *not* the common
//! IEEE/zlib CRC-32, which complements both ends.

/// Reflected form of the CRC-32 polynomial.
pub const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;

/// Shift `index` through 8 rounds of the polynomial.
fn crc32_value(index: u8) -> u32 {
    let mut crc = u32::from(index);
    for _ in 0..8 {
        if crc & 1 == 1 {
            crc = (crc >> 1) ^ CRC32_POLYNOMIAL;
        } else {
            crc >>= 1;
        }
    }
    crc
}

/// Compute the checksum of `data`. An empty slice has a checksum of 0.
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    data.iter().fold(0u32, |crc, b| {
        let index = (crc as u8) ^ b;
        (crc >> 8) ^ crc32_value(index)
    })
}
