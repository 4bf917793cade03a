use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::graphics::{ImageType, PngFilter};
use crate::logging::LogLevel;

/// Options for one `imagix` run, built from defaults plus CLI arguments
#[derive(Debug, Clone)]
pub struct Options {
    /// Image to load; a blank canvas is created when absent
    pub input: Option<PathBuf>,
    /// Destination file; encoded bytes go to stdout when absent
    pub output: Option<PathBuf>,
    pub format: ImageType,
    /// Size of a blank canvas
    pub size: Size,
    /// Flood fill applied from the origin before export
    pub fill: Option<Fill>,
    pub quality: Option<u8>,
    pub filter: Option<PngFilter>,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Fill color as given on the command line; `a` is `None` for "RRGGBB".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            format: ImageType::Png,
            size: Size {
                width: 1,
                height: 1,
            },
            fill: None,
            quality: None,
            filter: None,
            log_level: LogLevel::Warning,
        }
    }
}

/// Parse a size string in the format "WIDTHxHEIGHT"
pub fn parse_size(s: &str) -> Result<Size> {
    let parts: Vec<&str> = s.split(['x', 'X']).collect();
    if parts.len() != 2 {
        anyhow::bail!("Size must be in WIDTHxHEIGHT format");
    }

    let width: u32 = parts[0].trim().parse().context("Invalid width value")?;
    let height: u32 = parts[1].trim().parse().context("Invalid height value")?;

    if width == 0 || height == 0 {
        anyhow::bail!("Size values must be positive");
    }

    Ok(Size { width, height })
}

/// Parse "RRGGBB" or "RRGGBBAA", with or without a leading '#'
pub fn parse_hex_color(s: &str) -> Result<Fill> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        anyhow::bail!("Color must be RRGGBB or RRGGBBAA, got '{}'", s);
    }
    let channel = |i: usize| -> Result<u8> {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .with_context(|| format!("Invalid hex digits in color '{}'", s))
    };
    let a = if hex.len() == 8 { Some(channel(6)?) } else { None };
    Ok(Fill {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a,
    })
}

/// Parse a quality value; range depends on the output format
pub fn parse_quality(s: &str, format: ImageType) -> Result<u8> {
    let quality: u8 = s.trim().parse().context("Invalid quality value")?;
    let max = match format {
        ImageType::Png | ImageType::TransparentPng => 9,
        _ => 100,
    };
    if quality > max {
        anyhow::bail!("Quality for {} must be between 0 and {}", format, max);
    }
    Ok(quality)
}

pub fn parse_format(s: &str) -> Result<ImageType> {
    s.parse::<ImageType>().map_err(anyhow::Error::from)
}

pub fn parse_filter(s: &str) -> Result<PngFilter> {
    s.parse::<PngFilter>()
        .map_err(|_| anyhow::anyhow!("Invalid PNG filter: {}. Valid options: none, sub, up, avg, paeth, adaptive", s))
}
