//! Colors, cache keys and backend color handles.
//!
//! Alpha is straight 8-bit alpha: 255 is opaque, 0 is fully transparent.
//! Colors requested without an alpha channel are stored as opaque.

pub const OPAQUE: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: OPAQUE }
    }
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
    pub const fn from_rgba(px: [u8; 4]) -> Self {
        Self::with_alpha(px[0], px[1], px[2], px[3])
    }
    pub const fn is_opaque(self) -> bool {
        self.a == OPAQUE
    }

    /// Packs the channels as `R<<24 | G<<16 | B<<8 | A`.
    pub const fn packed(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    pub const fn unpack(value: u32) -> Self {
        Self::with_alpha(
            (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        )
    }

    /// Rec. 601 luma, used for 1-bit conversion.
    pub fn luminance(self) -> u8 {
        let y = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        (y / 1000) as u8
    }

    /// Source-over blend of `self` onto `dst`.
    pub fn blend_over(self, dst: Color) -> Color {
        let sa = self.a as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a as u32;
        // out_a scaled by 255
        let out_a = sa * 255 + da * (255 - sa);
        if out_a == 0 {
            return Color::with_alpha(0, 0, 0, 0);
        }
        let channel = |s: u8, d: u8| -> u8 {
            let num = s as u32 * sa * 255 + d as u32 * da * (255 - sa);
            ((num + out_a / 2) / out_a) as u8
        };
        Color::with_alpha(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            ((out_a + 127) / 255) as u8,
        )
    }
}

/// Key under which a canvas caches an allocated color.
///
/// A color requested without alpha shares its key with the same color
/// requested at full opacity; both denote the same pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(u32);

impl ColorKey {
    pub fn new(r: u8, g: u8, b: u8, a: Option<u8>) -> Self {
        Self(Color::with_alpha(r, g, b, a.unwrap_or(OPAQUE)).packed())
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Opaque reference to a color allocated by a raster backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorHandle(u32);

impl ColorHandle {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
    pub const fn raw(self) -> u32 {
        self.0
    }
}

pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
pub const GREEN: Color = Color::new(0x00, 0xFF, 0x00);
pub const BLUE: Color = Color::new(0x00, 0x00, 0xFF);
pub const YELLOW: Color = Color::new(0xFF, 0xFF, 0x00);
pub const MAGENTA: Color = Color::new(0xFF, 0x00, 0xFF);
pub const CYAN: Color = Color::new(0x00, 0xFF, 0xFF);
/// Background fill of a fresh canvas and the designated transparent color
/// of alpha-aware PNG exports.
pub const TRANSPARENT: Color = Color::with_alpha(0xFF, 0xFF, 0xFF, 0x7F);
