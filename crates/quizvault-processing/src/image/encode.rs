use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageResult};
use quizvault_core::constants::{JPEG_QUALITY, WEBP_QUALITY};
use std::io::Cursor;

/// Formats the normalizer writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl TargetFormat {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(TargetFormat::Jpeg),
            "image/png" => Some(TargetFormat::Png),
            "image/webp" => Some(TargetFormat::WebP),
            "image/gif" => Some(TargetFormat::Gif),
            _ => None,
        }
    }

    pub fn to_image_format(self) -> ImageFormat {
        match self {
            TargetFormat::Jpeg => ImageFormat::Jpeg,
            TargetFormat::Png => ImageFormat::Png,
            TargetFormat::WebP => ImageFormat::WebP,
            TargetFormat::Gif => ImageFormat::Gif,
        }
    }
}

/// Encode an image in the target format with the normalization settings
pub fn encode(img: &DynamicImage, format: TargetFormat) -> ImageResult<Vec<u8>> {
    match format {
        TargetFormat::Jpeg => encode_jpeg(img),
        TargetFormat::Png => encode_png(img),
        TargetFormat::WebP => Ok(encode_webp(img)),
        TargetFormat::Gif => {
            let mut buffer = Vec::new();
            img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Gif)?;
            Ok(buffer)
        }
    }
}

/// JPEG has no alpha channel, so the image is flattened to RGB first
fn encode_jpeg(img: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
    Ok(buffer)
}

fn encode_png(img: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(buffer)
}

/// Lossy WebP via libwebp
fn encode_webp(img: &DynamicImage) -> Vec<u8> {
    let (width, height) = img.dimensions();
    let rgba_img = img.to_rgba8();

    let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
    encoder.encode(WEBP_QUALITY).to_vec()
}
