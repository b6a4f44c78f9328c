//! Decode, re-encode and resize operations.
//!
//! All functions here are synchronous and CPU-bound; the pipeline
//! calls them from its single worker task.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::{MediaError, MediaResult};

/// Decode an image from raw bytes, sniffing the format.
pub fn decode(bytes: &[u8]) -> MediaResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| MediaError::decode(e.to_string()))
}

/// Encode an image to the canonical WebP output format.
pub fn encode_webp(img: &DynamicImage) -> MediaResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::WebP)
        .map_err(|e| MediaError::encode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Resize to fit a `width`-wide bounding box, preserving aspect ratio.
///
/// Height follows proportionally; the result is never wider than
/// `width`.
pub fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    img.resize(width, u32::MAX, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode(b"definitely not an image").is_err());
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn decode_accepts_png() {
        let img = decode(&png_bytes(10, 10)).unwrap();
        assert_eq!(img.dimensions(), (10, 10));
    }

    #[test]
    fn encode_produces_webp_container() {
        let img = DynamicImage::new_rgb8(4, 4);
        let bytes = encode_webp(&img).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn encoded_webp_round_trips_through_decode() {
        let img = DynamicImage::new_rgb8(16, 9);
        let bytes = encode_webp(&img).unwrap();
        let back = decode(&bytes).unwrap();
        assert_eq!(back.dimensions(), (16, 9));
    }

    #[test]
    fn resize_scales_height_proportionally() {
        let img = decode(&png_bytes(500, 500)).unwrap();
        let resized = resize_to_width(&img, 400);
        assert_eq!(resized.dimensions(), (400, 400));

        let wide = decode(&png_bytes(1000, 500)).unwrap();
        let resized = resize_to_width(&wide, 400);
        assert_eq!(resized.dimensions(), (400, 200));
    }

    #[test]
    fn resize_never_exceeds_target_width() {
        let img = decode(&png_bytes(1000, 400)).unwrap();
        for &w in &[400u32, 800, 1200] {
            let resized = resize_to_width(&img, w);
            assert!(resized.dimensions().0 <= w);
        }
    }
}
