//! GD2 reader and writer (uncompressed chunks only).
//!
//! Header: `"gd2\0"`, then big-endian 16-bit version, width, height, chunk
//! size, format, chunk columns and chunk rows. Version 2 adds a true-color
//! flag byte before the color table. Pixels are stored chunk by chunk, each
//! chunk row-major.
//!
//! True-color pixels are 32-bit words `A<<24 | R<<16 | G<<8 | B` where `A` is
//! a 7-bit transparency (0 opaque, 127 clear).

use image::{Rgba, RgbaImage};

use crate::graphics::codec::CodecError;
use crate::graphics::color::Color;

pub const MAGIC: &[u8; 4] = b"gd2\0";
const VERSION: u16 = 2;
const FMT_RAW: u16 = 1;
const FMT_COMPRESSED: u16 = 2;
const FMT_TRUECOLOR_RAW: u16 = 3;
const FMT_TRUECOLOR_COMPRESSED: u16 = 4;
const PALETTE_SIZE: usize = 256;
const GD_ALPHA_MAX: u8 = 127;
/// Chunk edge lengths accepted by libgd.
const CHUNK_SIZE_MIN: u16 = 64;
const CHUNK_SIZE_MAX: u16 = 4096;

/// Encode as version 2, raw true-color chunks of `chunk_size` pixels.
/// `chunk_size` is clamped to the range readers accept.
pub fn encode(image: &RgbaImage, chunk_size: u16, transparent: Option<Color>) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let cs = chunk_size.clamp(CHUNK_SIZE_MIN, CHUNK_SIZE_MAX) as u32;
    let ncx = (width + cs - 1) / cs;
    let ncy = (height + cs - 1) / cs;

    let mut out = Vec::with_capacity(32 + width as usize * height as usize * 4);
    out.extend_from_slice(MAGIC);
    put_word(&mut out, VERSION);
    put_word(&mut out, width as u16);
    put_word(&mut out, height as u16);
    put_word(&mut out, cs as u16);
    put_word(&mut out, FMT_TRUECOLOR_RAW);
    put_word(&mut out, ncx as u16);
    put_word(&mut out, ncy as u16);

    out.push(1);
    let transparent = transparent.map_or(-1, |c| to_gd_truecolor(c) as i32);
    out.extend_from_slice(&transparent.to_be_bytes());

    for cy in 0..ncy {
        for cx in 0..ncx {
            let (ylo, yhi) = (cy * cs, ((cy + 1) * cs).min(height));
            let (xlo, xhi) = (cx * cs, ((cx + 1) * cs).min(width));
            for y in ylo..yhi {
                for x in xlo..xhi {
                    let color = Color::from_rgba(image.get_pixel(x, y).0);
                    out.extend_from_slice(&to_gd_truecolor(color).to_be_bytes());
                }
            }
        }
    }
    out
}

/// Decode raw palette or raw true-color GD2 data.
///
/// Version 1 files carry a byte color count, a word transparent index and
/// RGB palette entries; version 2 uses a word count, an int transparent
/// value and RGBA entries. The palette's transparent index decodes clear.
pub fn decode(data: &[u8]) -> Result<RgbaImage, CodecError> {
    let mut r = Reader { data, pos: 0 };
    if r.take(4)? != MAGIC {
        return Err(CodecError::InvalidHeader("missing gd2 signature".into()));
    }
    let version = r.word()?;
    if version != 1 && version != 2 {
        return Err(CodecError::Unsupported(format!("GD2 version {}", version)));
    }
    let width = r.word()? as u32;
    let height = r.word()? as u32;
    let cs = r.word()?;
    let fmt = r.word()?;
    let ncx = r.word()? as u32;
    let ncy = r.word()? as u32;

    match fmt {
        FMT_RAW | FMT_TRUECOLOR_RAW => {}
        FMT_COMPRESSED | FMT_TRUECOLOR_COMPRESSED => {
            return Err(CodecError::Unsupported("compressed GD2 chunks".into()))
        }
        other => return Err(CodecError::InvalidHeader(format!("GD2 format {}", other))),
    }
    if !(CHUNK_SIZE_MIN..=CHUNK_SIZE_MAX).contains(&cs) {
        return Err(CodecError::InvalidHeader(format!("GD2 chunk size {}", cs)));
    }
    let cs = cs as u32;
    if width == 0 || height == 0 || ncx * cs < width || ncy * cs < height {
        return Err(CodecError::InvalidHeader(format!(
            "GD2 geometry {}x{} with {}x{} chunks of {}",
            width, height, ncx, ncy, cs
        )));
    }

    let truecolor = if version == 2 { r.byte()? != 0 } else { false };
    if truecolor != (fmt == FMT_TRUECOLOR_RAW) {
        return Err(CodecError::InvalidHeader(
            "GD2 true-color flag disagrees with format".into(),
        ));
    }

    let mut palette = Vec::new();
    if !truecolor {
        let transparent = if version == 2 {
            let _colors_total = r.word()?;
            r.int()?
        } else {
            let _colors_total = r.byte()?;
            r.word()? as i32
        };
        for _ in 0..PALETTE_SIZE {
            let color = if version == 2 {
                let px = r.take(4)?;
                from_gd_parts(px[0], px[1], px[2], px[3])
            } else {
                let px = r.take(3)?;
                Color::new(px[0], px[1], px[2])
            };
            palette.push(color);
        }
        if let Ok(index) = usize::try_from(transparent) {
            if let Some(entry) = palette.get_mut(index) {
                entry.a = 0;
            }
        }
    } else {
        let _transparent = r.int()?;
    }

    let bytes_per_pixel = if truecolor { 4 } else { 1 };
    let needed = width as u64 * height as u64 * bytes_per_pixel;
    if (r.remaining() as u64) < needed {
        return Err(CodecError::Truncated);
    }

    let mut image = RgbaImage::new(width, height);
    for cy in 0..ncy {
        for cx in 0..ncx {
            let (ylo, yhi) = ((cy * cs).min(height), ((cy + 1) * cs).min(height));
            let (xlo, xhi) = ((cx * cs).min(width), ((cx + 1) * cs).min(width));
            for y in ylo..yhi {
                for x in xlo..xhi {
                    let color = if truecolor {
                        from_gd_truecolor(r.int()? as u32)
                    } else {
                        palette[r.byte()? as usize]
                    };
                    image.put_pixel(x, y, Rgba(color.to_rgba()));
                }
            }
        }
    }
    Ok(image)
}

fn to_gd_alpha(a: u8) -> u8 {
    GD_ALPHA_MAX - (a >> 1)
}

fn from_gd_alpha(a: u8) -> u8 {
    let a = a.min(GD_ALPHA_MAX);
    255 - ((a << 1) + (a >> 6))
}

fn to_gd_truecolor(c: Color) -> u32 {
    (to_gd_alpha(c.a) as u32) << 24 | (c.r as u32) << 16 | (c.g as u32) << 8 | c.b as u32
}

fn from_gd_truecolor(v: u32) -> Color {
    from_gd_parts((v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8 & 0x7F)
}

fn from_gd_parts(r: u8, g: u8, b: u8, gd_alpha: u8) -> Color {
    Color::with_alpha(r, g, b, from_gd_alpha(gd_alpha))
}

fn put_word(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let slice = self
            .data
            .get(self.pos..self.pos + n)
            .ok_or(CodecError::Truncated)?;
        self.pos += n;
        Ok(slice)
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn byte(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    fn word(&mut self) -> Result<u16, CodecError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn int(&mut self) -> Result<i32, CodecError> {
        let b = self.take(4)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
