//! Test fixtures

/// PNG signature followed by an IHDR chunk header
pub fn minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52,
    ]
}

/// PNG-looking payload of exactly `size` bytes
pub fn png_of_size(size: usize) -> Vec<u8> {
    let mut data = minimal_png();
    data.resize(size, 0xab);
    data
}
