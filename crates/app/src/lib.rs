pub mod camera;
pub mod seed;
pub mod viewer;

pub const APP_NAME: &str = "Level Generator";

/// Format a graph fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Split a packed `0xAARRGGBB` edge colour into RGBA bytes.
pub fn unpack_colour(colour: u32) -> [u8; 4] {
    let [a, r, g, b] = colour.to_be_bytes();
    [r, g, b, a]
}
