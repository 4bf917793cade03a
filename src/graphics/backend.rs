//! Raster backend seam.
//!
//! A [`Canvas`](crate::graphics::Canvas) never touches pixels directly; it
//! allocates colors, fills and reads export state through this trait. The
//! default implementation is [`Raster`](crate::graphics::Raster).

use image::RgbaImage;

use crate::graphics::color::{Color, ColorHandle};

pub trait RasterBackend {
    /// Create a true-color surface. Contents are unspecified until filled.
    fn new_truecolor(width: u32, height: u32) -> Self
    where
        Self: Sized;

    /// Wrap an already decoded image.
    fn from_image(image: RgbaImage) -> Self
    where
        Self: Sized;

    /// Allocate an opaque color.
    fn allocate_color(&mut self, r: u8, g: u8, b: u8) -> ColorHandle;

    /// Allocate a color carrying an alpha channel.
    fn allocate_color_alpha(&mut self, r: u8, g: u8, b: u8, a: u8) -> ColorHandle;

    /// Resolve a handle back into the color it was allocated for.
    fn resolve(&self, handle: ColorHandle) -> Color;

    /// Flood fill the region connected to `(x, y)` that shares its color.
    /// Returns the number of pixels written.
    fn flood_fill(&mut self, x: i64, y: i64, color: ColorHandle) -> usize;

    fn dimensions(&self) -> (u32, u32);

    fn pixel(&self, x: u32, y: u32) -> Option<Color>;

    fn image(&self) -> &RgbaImage;

    fn set_interlace(&mut self, enabled: bool);
    fn interlace(&self) -> bool;

    fn set_save_alpha(&mut self, enabled: bool);
    fn save_alpha(&self) -> bool;

    fn set_alpha_blending(&mut self, enabled: bool);
    fn alpha_blending(&self) -> bool;

    fn set_transparent(&mut self, color: Option<ColorHandle>);
    fn transparent(&self) -> Option<ColorHandle>;
}
