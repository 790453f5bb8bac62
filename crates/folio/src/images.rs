//! Image downsizing for list responses.

use std::io::Cursor;

use folio_core::content::{mime_type, ImageCompressor};
use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageFormat};

pub const DEFAULT_JPEG_QUALITY: u8 = 70;

/// Shrinks images so their longer side fits `max_dimension`, keeping the
/// aspect ratio and the original format.
///
/// An image is only replaced when the re-encoded bytes are smaller.
#[derive(Debug, Clone)]
pub struct Thumbnailer {
    max_dimension: u32,
    jpeg_quality: u8,
}

impl Thumbnailer {
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    fn shrink(&self, image: DynamicImage) -> DynamicImage {
        if image.width() <= self.max_dimension && image.height() <= self.max_dimension {
            return image;
        }
        image.thumbnail(self.max_dimension, self.max_dimension)
    }

    fn encode(&self, image: &DynamicImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut out, self.jpeg_quality);
                DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
            }
            other => image.write_to(&mut out, other)?,
        }
        Ok(out.into_inner())
    }
}

impl ImageCompressor for Thumbnailer {
    fn compress(&self, image_format: &str, bytes: &[u8]) -> Option<Vec<u8>> {
        let format = mime_type(image_format).and_then(ImageFormat::from_mime_type)?;

        let decoded = match image::load_from_memory_with_format(bytes, format) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::debug!(image_format, error = %e, "keeping undecodable image");
                return None;
            }
        };

        let encoded = match self.encode(&self.shrink(decoded), format) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(image_format, error = %e, "failed to re-encode image");
                return None;
            }
        };

        (encoded.len() < bytes.len()).then_some(encoded)
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, format)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_large_png_is_downsized_keeping_aspect_ratio() {
        let original = encoded(1600, 800, ImageFormat::Png);

        let smaller = Thumbnailer::new(800)
            .compress("data:image/png;base64", &original)
            .unwrap();

        let decoded = image::load_from_memory_with_format(&smaller, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 400));
    }

    #[test]
    fn test_large_jpeg_stays_jpeg() {
        let original = encoded(1200, 1200, ImageFormat::Jpeg);

        let smaller = Thumbnailer::new(300)
            .compress("data:image/jpeg;base64", &original)
            .unwrap();

        assert_eq!(image::guess_format(&smaller).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&smaller).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 300));
    }

    #[test]
    fn test_small_png_is_kept() {
        let original = encoded(16, 16, ImageFormat::Png);

        assert!(Thumbnailer::new(800)
            .compress("data:image/png;base64", &original)
            .is_none());
    }

    #[test]
    fn test_undecodable_image_is_kept() {
        assert!(Thumbnailer::new(800)
            .compress("data:image/png;base64", b"not an image")
            .is_none());
    }

    #[test]
    fn test_unknown_format_is_kept() {
        let original = encoded(1600, 800, ImageFormat::Png);

        assert!(Thumbnailer::new(800)
            .compress("data:image/x-unknown;base64", &original)
            .is_none());
    }
}
