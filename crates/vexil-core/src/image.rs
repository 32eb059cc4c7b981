#![forbid(unsafe_code)]

use ::image::DynamicImage;

use crate::error::CoreResult;

/// A decoded image ready for display.
///
/// Wraps the decoded pixel buffer; loaders hand these out behind `Arc`, so
/// one decode is shared by every caller waiting on the same resource.
#[derive(Clone, Debug)]
pub struct Image {
    pixels: DynamicImage,
}

impl Image {
    /// Decode an image from raw fetched bytes.
    ///
    /// Pure and synchronous; the container format (PNG, JPEG, ...) is
    /// sniffed from the bytes themselves.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Decode`](crate::CoreError::Decode) if the bytes
    /// do not contain a decodable image.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let pixels = ::image::load_from_memory(bytes)?;
        Ok(Self { pixels })
    }

    /// Width and height in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the decoded pixel buffer.
    #[must_use]
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

impl From<DynamicImage> for Image {
    fn from(pixels: DynamicImage) -> Self {
        Self { pixels }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ::image::{ImageFormat, RgbaImage};

    use super::*;
    use crate::CoreError;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            ::image::Rgba([0x12, 0x34, 0x56, 0xff]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_png_bytes() {
        let bytes = png_bytes(3, 2);
        let image = Image::from_bytes(&bytes).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn rejects_non_image_bytes() {
        let result = Image::from_bytes(b"this is not an image");
        assert!(matches!(result, Err(CoreError::Decode(_))));
    }

    #[test]
    fn rejects_empty_bytes() {
        assert!(Image::from_bytes(&[]).is_err());
    }
}
