// Image normalization for vision model input

use crate::error::{AppError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::path::Path;
use tracing::debug;

/// Longest edge, in pixels, sent to the model.
pub const MAX_DIMENSION: u32 = 1024;

/// JPEG quality used for the re-encoded payload.
pub const JPEG_QUALITY: u8 = 80;

/// A menu photo ready to embed in a chat-completions request.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub mime_type: &'static str,
    /// Standard base64 of the encoded bytes.
    pub base64: String,
}

impl PreparedImage {
    /// `data:` URL form accepted by OpenAI-style `image_url` parts.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Decode, downscale to fit inside [`MAX_DIMENSION`] and re-encode as JPEG.
///
/// The format is sniffed from the file contents, not the extension. Decoding
/// runs on the blocking pool.
pub async fn prepare_image(path: &Path) -> Result<PreparedImage> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || prepare_image_blocking(&path))
        .await
        .map_err(|e| AppError::Internal(format!("Image task failed: {}", e)))?
}

pub fn prepare_image_blocking(path: &Path) -> Result<PreparedImage> {
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| AppError::Preprocess(format!("Cannot decode {}: {}", path.display(), e)))?;

    encode_for_model(&image)
}

/// Fit-inside resize (never upscaling) followed by JPEG re-encoding.
pub fn encode_for_model(image: &DynamicImage) -> Result<PreparedImage> {
    let (width, height) = image.dimensions();
    let resized = if width > MAX_DIMENSION || height > MAX_DIMENSION {
        image.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        image.clone()
    };

    // JPEG has no alpha channel.
    let rgb = resized.to_rgb8();
    let mut bytes = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY))
        .map_err(|e| AppError::Preprocess(format!("JPEG encoding failed: {}", e)))?;

    debug!(
        "Prepared image {}x{} -> {}x{} ({} bytes)",
        width,
        height,
        rgb.width(),
        rgb.height(),
        bytes.len()
    );

    Ok(PreparedImage {
        width: rgb.width(),
        height: rgb.height(),
        mime_type: "image/jpeg",
        base64: BASE64.encode(&bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn decode(prepared: &PreparedImage) -> DynamicImage {
        let bytes = BASE64.decode(&prepared.base64).unwrap();
        image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn test_large_image_fits_inside_bounds() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3000, 1500, Rgb([200, 10, 10])));
        let prepared = encode_for_model(&image).unwrap();

        assert_eq!((prepared.width, prepared.height), (1024, 512));
        assert_eq!(decode(&prepared).dimensions(), (1024, 512));
    }

    #[test]
    fn test_portrait_image_keeps_aspect_ratio() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(800, 2400));
        let prepared = encode_for_model(&image).unwrap();

        assert_eq!(prepared.height, 1024);
        assert!((341..=342).contains(&prepared.width));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(320, 200));
        let prepared = encode_for_model(&image).unwrap();
        assert_eq!((prepared.width, prepared.height), (320, 200));
    }

    #[test]
    fn test_alpha_is_dropped_and_output_is_jpeg() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([0, 0, 255, 128])));
        let prepared = encode_for_model(&image).unwrap();

        let bytes = BASE64.decode(&prepared.base64).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8, 0xFF]));
        assert!(prepared.data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(prepare_image_blocking(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(prepare_image_blocking(&dir.path().join("nope.jpg")).is_err());
    }

    #[tokio::test]
    async fn test_prepare_image_sniffs_format() {
        let dir = tempfile::tempdir().unwrap();
        // Wrong extension on purpose.
        let path = dir.path().join("menu.bin");
        RgbImage::new(40, 30).save_with_format(&path, image::ImageFormat::Png).unwrap();

        let prepared = prepare_image(&path).await.unwrap();
        assert_eq!((prepared.width, prepared.height), (40, 30));
    }
}
