//! WBMP (Wireless Bitmap, type 0) reader and writer.
//!
//! Layout: type field and fix-header byte (both zero), width and height as
//! multi-byte integers, then one bit per pixel, rows padded to a whole byte,
//! most significant bit first. A set bit is white.

use crate::graphics::codec::CodecError;
use crate::graphics::color::{Color, BLACK, WHITE};
use image::{Rgba, RgbaImage};

/// Encode `image`, writing pixels whose luma is below `threshold` as black.
pub fn encode(image: &RgbaImage, threshold: u8) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let row_bytes = (width as usize + 7) / 8;
    let mut out = Vec::with_capacity(8 + row_bytes * height as usize);

    write_multibyte(&mut out, 0);
    out.push(0);
    write_multibyte(&mut out, width);
    write_multibyte(&mut out, height);

    for y in 0..height {
        let mut row = vec![0u8; row_bytes];
        for x in 0..width {
            let color = Color::from_rgba(image.get_pixel(x, y).0);
            if color.luminance() >= threshold {
                row[x as usize / 8] |= 0x80 >> (x % 8);
            }
        }
        out.extend_from_slice(&row);
    }
    out
}

/// Decode a type 0 WBMP.
pub fn decode(data: &[u8]) -> Result<RgbaImage, CodecError> {
    let mut pos = 0;
    let kind = read_multibyte(data, &mut pos)?;
    if kind != 0 {
        return Err(CodecError::Unsupported(format!("WBMP type {}", kind)));
    }
    let fix_header = *data.get(pos).ok_or(CodecError::Truncated)?;
    pos += 1;
    if fix_header & 0x9F != 0 {
        return Err(CodecError::InvalidHeader("WBMP extension headers".into()));
    }
    let width = read_multibyte(data, &mut pos)?;
    let height = read_multibyte(data, &mut pos)?;
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidHeader(format!(
            "WBMP dimensions {}x{}",
            width, height
        )));
    }

    let row_bytes = (width as usize + 7) / 8;
    let needed = row_bytes
        .checked_mul(height as usize)
        .ok_or_else(|| CodecError::InvalidHeader("WBMP dimensions overflow".into()))?;
    let bits = data.get(pos..pos + needed).ok_or(CodecError::Truncated)?;

    let mut image = RgbaImage::new(width, height);
    for y in 0..height {
        let row = &bits[y as usize * row_bytes..(y as usize + 1) * row_bytes];
        for x in 0..width {
            let set = row[x as usize / 8] & (0x80 >> (x % 8)) != 0;
            let color = if set { WHITE } else { BLACK };
            image.put_pixel(x, y, Rgba(color.to_rgba()));
        }
    }
    Ok(image)
}

/// Cheap structural check used when sniffing unknown data: the header parses
/// and the payload length matches the declared dimensions exactly.
pub fn looks_like_wbmp(data: &[u8]) -> bool {
    if data.len() < 4 || data[0] != 0 || data[1] != 0 {
        return false;
    }
    let mut pos = 2;
    let (Ok(width), Ok(height)) = (
        read_multibyte(data, &mut pos),
        read_multibyte(data, &mut pos),
    ) else {
        return false;
    };
    if width == 0 || height == 0 {
        return false;
    }
    let row_bytes = (width as usize + 7) / 8;
    row_bytes
        .checked_mul(height as usize)
        .map_or(false, |n| data.len() - pos == n)
}

fn write_multibyte(out: &mut Vec<u8>, mut value: u32) {
    let mut groups = [0u8; 5];
    let mut count = 0;
    loop {
        groups[count] = (value & 0x7F) as u8;
        count += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..count).rev() {
        let cont = if i > 0 { 0x80 } else { 0 };
        out.push(groups[i] | cont);
    }
}

fn read_multibyte(data: &[u8], pos: &mut usize) -> Result<u32, CodecError> {
    let mut value: u32 = 0;
    for _ in 0..5 {
        let byte = *data.get(*pos).ok_or(CodecError::Truncated)?;
        *pos += 1;
        value = value
            .checked_shl(7)
            .filter(|v| v >> 7 == value)
            .ok_or_else(|| CodecError::InvalidHeader("WBMP integer overflow".into()))?
            | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(CodecError::InvalidHeader("WBMP integer too long".into()))
}
