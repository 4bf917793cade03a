//! Encoders and the content-sniffing decoder.
//!
//! GIF, JPEG and PNG go through the `image` crate. WBMP and GD2 are handled
//! by the sibling [`wbmp`](crate::graphics::wbmp) and
//! [`gd2`](crate::graphics::gd2) modules.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, Frame, ImageEncoder, RgbaImage};

use crate::graphics::color::{Color, OPAQUE};
use crate::graphics::format::{PngFilter, DEFAULT_JPEG_QUALITY, MAX_PNG_COMPRESSION};
use crate::graphics::{gd2, wbmp};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Unexpected end of image data")]
    Truncated,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// GIF has 1-bit transparency: pixels equal to `transparent` become clear,
/// everything else is written opaque.
pub fn encode_gif(image: &RgbaImage, transparent: Option<Color>) -> Result<Vec<u8>, CodecError> {
    let mut frame = image.clone();
    for px in frame.pixels_mut() {
        let clear = transparent.map_or(false, |t| Color::from_rgba(px.0) == t);
        px.0[3] = if clear { 0 } else { OPAQUE };
    }

    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder.encode_frame(Frame::new(frame))?;
    }
    Ok(buf)
}

/// Baseline JPEG. The alpha channel is discarded.
///
/// `interlace` is accepted for parity with the raster state but the encoder
/// only produces baseline scans.
pub fn encode_jpeg(
    image: &RgbaImage,
    quality: Option<u8>,
    interlace: bool,
) -> Result<Vec<u8>, CodecError> {
    let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
    if interlace {
        log::debug!("progressive JPEG requested, writing baseline scans");
    }
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    Ok(buf)
}

/// PNG with zlib level `compression` (0-9). Without `save_alpha` the alpha
/// channel is dropped and RGB is written.
pub fn encode_png(
    image: &RgbaImage,
    save_alpha: bool,
    compression: Option<u8>,
    filter: Option<PngFilter>,
) -> Result<Vec<u8>, CodecError> {
    let compression = match compression.map(|q| q.min(MAX_PNG_COMPRESSION)) {
        None => CompressionType::Default,
        Some(0..=3) => CompressionType::Fast,
        Some(4..=6) => CompressionType::Default,
        Some(_) => CompressionType::Best,
    };
    let filter = filter.unwrap_or_default().to_image_filter();

    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, compression, filter);
    if save_alpha {
        encoder.write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )?;
    } else {
        let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
        encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    }
    Ok(buf)
}

pub fn encode_wbmp(image: &RgbaImage, threshold: u8) -> Result<Vec<u8>, CodecError> {
    Ok(wbmp::encode(image, threshold))
}

pub fn encode_gd2(
    image: &RgbaImage,
    chunk_size: u16,
    transparent: Option<Color>,
) -> Result<Vec<u8>, CodecError> {
    let (width, height) = image.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(CodecError::Unsupported(format!(
            "GD2 cannot store {}x{}",
            width, height
        )));
    }
    Ok(gd2::encode(image, chunk_size, transparent))
}

/// Decode by looking at the data rather than trusting a file extension.
pub fn decode(data: &[u8]) -> Result<RgbaImage, CodecError> {
    if data.starts_with(gd2::MAGIC) {
        return gd2::decode(data);
    }
    if wbmp::looks_like_wbmp(data) {
        return wbmp::decode(data);
    }
    let format = image::guess_format(data)?;
    let decoded = image::load(Cursor::new(data), format)?;
    Ok(decoded.to_rgba8())
}
