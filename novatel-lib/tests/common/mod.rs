use std::path::PathBuf;

use novatel::framing::crc32;

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    let mut path =
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    path.push("tests/fixtures");
    path.push(name);
    path
}

/// Binary log bytes, including trailing checksum, with a standard 28 byte header.
#[allow(dead_code)]
pub fn frame_bytes(message_id: u16, body: &[u8]) -> Vec<u8> {
    let mut dat = vec![0u8; 28];
    dat[..4].copy_from_slice(&[0xaa, 0x44, 0x12, 28]);
    dat[4..6].copy_from_slice(&message_id.to_le_bytes());
    dat[8..10].copy_from_slice(&u16::try_from(body.len()).unwrap().to_le_bytes());
    dat.extend(body);
    let crc = crc32(&dat);
    dat.extend(crc.to_le_bytes());
    dat
}
