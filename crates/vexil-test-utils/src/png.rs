#![forbid(unsafe_code)]

//! Tiny in-memory PNG fixtures for decode paths.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

/// Encode a solid-color PNG of the given size.
///
/// # Panics
///
/// Panics if PNG encoding fails (it cannot for valid dimensions).
#[must_use]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([0x00, 0x2b, 0x7f, 0xff]),
    ));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("encode fixture PNG");
    buf.into_inner()
}
