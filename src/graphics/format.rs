//! Export formats and their parameters.

use std::fmt;
use std::str::FromStr;

/// Default JPEG quality when none is requested.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;
/// Highest zlib level accepted as PNG "quality".
pub const MAX_PNG_COMPRESSION: u8 = 9;
/// Edge length of a GD2 chunk.
pub const GD2_CHUNK_SIZE: u16 = 128;
/// Pixels with luma below this are written as black WBMP bits.
pub const WBMP_THRESHOLD: u8 = 128;

/// File extensions accepted by `Canvas::from_file`.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["gif", "jpeg", "jpg", "png", "wbmp", "gd2"];

/// Output file type. Discriminants match the numeric codes accepted by
/// `Canvas::to_image_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Gif = 0,
    Jpeg = 1,
    Png = 2,
    Wbmp = 3,
    Gd2 = 4,
    InterlacedJpeg = 5,
    TransparentPng = 6,
}

impl ImageType {
    pub const ALL: [ImageType; 7] = [
        ImageType::Gif,
        ImageType::Jpeg,
        ImageType::Png,
        ImageType::Wbmp,
        ImageType::Gd2,
        ImageType::InterlacedJpeg,
        ImageType::TransparentPng,
    ];

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Gif),
            1 => Some(Self::Jpeg),
            2 => Some(Self::Png),
            3 => Some(Self::Wbmp),
            4 => Some(Self::Gd2),
            5 => Some(Self::InterlacedJpeg),
            6 => Some(Self::TransparentPng),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Jpeg | Self::InterlacedJpeg => "jpg",
            Self::Png | Self::TransparentPng => "png",
            Self::Wbmp => "wbmp",
            Self::Gd2 => "gd2",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Wbmp => "wbmp",
            Self::Gd2 => "gd2",
            Self::InterlacedJpeg => "interlaced-jpeg",
            Self::TransparentPng => "png24",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown image type '{0}' (expected gif, jpeg, interlaced-jpeg, png, png24, wbmp, gd2)")]
pub struct UnknownFormat(pub String);

impl FromStr for ImageType {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gif" => Ok(Self::Gif),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "interlaced-jpeg" | "progressive-jpeg" => Ok(Self::InterlacedJpeg),
            "png" => Ok(Self::Png),
            "png24" | "transparent-png" => Ok(Self::TransparentPng),
            "wbmp" => Ok(Self::Wbmp),
            "gd2" => Ok(Self::Gd2),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// PNG row filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PngFilter {
    None,
    Sub,
    Up,
    Avg,
    Paeth,
    #[default]
    Adaptive,
}

impl PngFilter {
    pub(crate) fn to_image_filter(self) -> image::codecs::png::FilterType {
        use image::codecs::png::FilterType;
        match self {
            Self::None => FilterType::NoFilter,
            Self::Sub => FilterType::Sub,
            Self::Up => FilterType::Up,
            Self::Avg => FilterType::Avg,
            Self::Paeth => FilterType::Paeth,
            Self::Adaptive => FilterType::Adaptive,
        }
    }
}

impl FromStr for PngFilter {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "sub" => Ok(Self::Sub),
            "up" => Ok(Self::Up),
            "avg" | "average" => Ok(Self::Avg),
            "paeth" => Ok(Self::Paeth),
            "adaptive" | "all" => Ok(Self::Adaptive),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Outcome of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Export {
    /// Encoded image returned in memory.
    Bytes(Vec<u8>),
    /// Encoded image written to the requested file.
    Written,
    /// Unknown type, encoder failure or write failure. Nothing usable was
    /// produced.
    Failed,
}

impl Export {
    pub fn is_success(&self) -> bool {
        !matches!(self, Export::Failed)
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Export::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Whether `ext` names a loadable file type (case-insensitive).
pub fn is_supported_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}
