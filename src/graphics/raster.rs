//! True-color raster surface.
//!
//! [`Raster`] is the default [`RasterBackend`]: an RGBA8 pixel buffer plus the
//! handful of export flags (interlace, save-alpha, alpha blending and the
//! designated transparent color) that the encoders consult.
//!
//! Color handles are the packed RGBA value of the color, so allocation never
//! fails and a handle can always be resolved without a lookup table.

use std::fmt;

use image::{Rgba, RgbaImage};

use crate::graphics::backend::RasterBackend;
use crate::graphics::color::{Color, ColorHandle, OPAQUE};

pub struct Raster {
    pixels: RgbaImage,
    interlace: bool,
    save_alpha: bool,
    alpha_blending: bool,
    transparent: Option<ColorHandle>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_rgba_image(RgbaImage::new(width, height))
    }

    pub fn from_rgba_image(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            interlace: false,
            save_alpha: false,
            alpha_blending: false,
            transparent: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    fn get(&self, x: u32, y: u32) -> Color {
        Color::from_rgba(self.pixels.get_pixel(x, y).0)
    }
}

impl RasterBackend for Raster {
    fn new_truecolor(width: u32, height: u32) -> Self {
        Raster::new(width, height)
    }

    fn from_image(image: RgbaImage) -> Self {
        Raster::from_rgba_image(image)
    }

    fn allocate_color(&mut self, r: u8, g: u8, b: u8) -> ColorHandle {
        ColorHandle::from_raw(Color::with_alpha(r, g, b, OPAQUE).packed())
    }

    fn allocate_color_alpha(&mut self, r: u8, g: u8, b: u8, a: u8) -> ColorHandle {
        ColorHandle::from_raw(Color::with_alpha(r, g, b, a).packed())
    }

    fn resolve(&self, handle: ColorHandle) -> Color {
        Color::unpack(handle.raw())
    }

    fn flood_fill(&mut self, x: i64, y: i64, color: ColorHandle) -> usize {
        if !self.contains(x, y) {
            log::debug!(
                "flood fill start ({}, {}) outside {}x{} raster, ignored",
                x,
                y,
                self.width(),
                self.height()
            );
            return 0;
        }

        let (sx, sy) = (x as u32, y as u32);
        let target = self.get(sx, sy);
        let fill = self.resolve(color);
        let paint = if self.alpha_blending {
            fill.blend_over(target)
        } else {
            fill
        };
        if paint == target {
            return 0;
        }

        let width = self.width();
        let height = self.height();
        let mut written = 0;
        let mut stack = vec![(sx, sy)];

        // Scanline fill: extend each seed left and right, then queue the
        // rows above and below.
        while let Some((px, py)) = stack.pop() {
            if self.get(px, py) != target {
                continue;
            }
            let mut left = px;
            while left > 0 && self.get(left - 1, py) == target {
                left -= 1;
            }
            let mut right = px;
            while right + 1 < width && self.get(right + 1, py) == target {
                right += 1;
            }

            for cx in left..=right {
                self.pixels.put_pixel(cx, py, Rgba(paint.to_rgba()));
                written += 1;
                if py > 0 && self.get(cx, py - 1) == target {
                    stack.push((cx, py - 1));
                }
                if py + 1 < height && self.get(cx, py + 1) == target {
                    stack.push((cx, py + 1));
                }
            }
        }

        written
    }

    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(self.get(x, y))
        } else {
            None
        }
    }

    fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    fn set_interlace(&mut self, enabled: bool) {
        self.interlace = enabled;
    }

    fn interlace(&self) -> bool {
        self.interlace
    }

    fn set_save_alpha(&mut self, enabled: bool) {
        self.save_alpha = enabled;
    }

    fn save_alpha(&self) -> bool {
        self.save_alpha
    }

    fn set_alpha_blending(&mut self, enabled: bool) {
        self.alpha_blending = enabled;
    }

    fn alpha_blending(&self) -> bool {
        self.alpha_blending
    }

    fn set_transparent(&mut self, color: Option<ColorHandle>) {
        self.transparent = color;
    }

    fn transparent(&self) -> Option<ColorHandle> {
        self.transparent
    }
}

impl Drop for Raster {
    fn drop(&mut self) {
        log::trace!("releasing {}x{} raster", self.width(), self.height());
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("interlace", &self.interlace)
            .field("save_alpha", &self.save_alpha)
            .field("alpha_blending", &self.alpha_blending)
            .field("transparent", &self.transparent)
            .finish()
    }
}
