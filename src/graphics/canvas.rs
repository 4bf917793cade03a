//! Canvas: a true-color raster with a color cache and multi-format export.
//!
//! A [`Canvas`] owns exactly one [`RasterBackend`] and the colors allocated
//! in it. Colors are memoized per canvas, so asking for the same RGBA tuple
//! twice never reaches the backend a second time.
//!
//! Export goes through [`Canvas::to_image`], which either returns the encoded
//! bytes or writes them to a file. Only argument problems (bad input path,
//! unwritable target) are errors; encoder and write failures are reported as
//! [`Export::Failed`].
//!
//! The backend is released when the canvas is dropped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::graphics::backend::RasterBackend;
use crate::graphics::codec::{self, CodecError};
use crate::graphics::color::{
    self, Color, ColorHandle, ColorKey, BLACK, BLUE, CYAN, GREEN, MAGENTA, RED, WHITE, YELLOW,
};
use crate::graphics::format::{
    is_supported_extension, Export, ImageType, PngFilter, GD2_CHUNK_SIZE, WBMP_THRESHOLD,
};
use crate::graphics::raster::Raster;
use crate::io::files;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Path is not writable: {}", .0.display())]
    UnwritableTarget(PathBuf),

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Could not read image: {0}")]
    Io(#[from] files::FileError),
}

pub type CanvasResult<T> = Result<T, CanvasError>;

pub struct Canvas<B: RasterBackend = Raster> {
    backend: B,
    colors: HashMap<ColorKey, ColorHandle>,
}

impl Canvas<Raster> {
    /// Create a `width` x `height` canvas filled with the transparent color.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        Self::with_size(width, height)
    }

    /// Load an image file into the default raster.
    pub fn from_file(path: impl AsRef<Path>) -> CanvasResult<Self> {
        Self::load(path)
    }
}

impl Default for Canvas<Raster> {
    fn default() -> Self {
        Self::with_backend(Raster::new_truecolor(1, 1))
    }
}

fn decode_error(path: &Path, err: CodecError) -> CanvasError {
    CanvasError::Decode(format!("{}: {}", path.display(), err))
}

impl<B: RasterBackend> Canvas<B> {
    /// Create a canvas on a fresh `B` surface, filled with the transparent
    /// color.
    pub fn with_size(width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidInput(format!(
                "Canvas dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self::with_backend(B::new_truecolor(width, height)))
    }

    /// Load an image file.
    ///
    /// The path must be a regular file with one of the extensions in
    /// [`SUPPORTED_EXTENSIONS`](crate::graphics::format::SUPPORTED_EXTENSIONS);
    /// the content itself is identified by sniffing, so a `.png` holding a
    /// JPEG still loads.
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        if !files::is_regular_file(path) {
            return Err(CanvasError::InvalidInput(format!(
                "Argument is not a file: {}",
                path.display()
            )));
        }
        match files::extension_lowercase(path) {
            Some(ext) if is_supported_extension(&ext) => {}
            _ => {
                return Err(CanvasError::InvalidInput(format!(
                    "Wrong file type provided: {}",
                    path.display()
                )))
            }
        }

        let data = files::read_file(path)?;
        let image = codec::decode(&data).map_err(|e| decode_error(path, e))?;
        log::debug!(
            "loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_backend(B::from_image(image)))
    }

    /// Wrap `backend` and paint it with the transparent color.
    pub fn with_backend(backend: B) -> Self {
        let mut canvas = Self::from_backend(backend);
        let transparent = canvas.color_transparent();
        canvas.fill(transparent, 0, 0);
        canvas
    }

    /// Wrap `backend` as is, keeping its pixels.
    pub fn from_backend(backend: B) -> Self {
        Self {
            backend,
            colors: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.backend.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.backend.dimensions().1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.backend.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.backend.pixel(x, y)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cached_colors(&self) -> usize {
        self.colors.len()
    }

    /// Allocate (or fetch the cached handle for) a color.
    ///
    /// Without `a` the color is allocated opaque.
    pub fn create_color(&mut self, r: u8, g: u8, b: u8, a: Option<u8>) -> ColorHandle {
        let key = ColorKey::new(r, g, b, a);
        if let Some(handle) = self.colors.get(&key) {
            return *handle;
        }
        let handle = match a {
            None => self.backend.allocate_color(r, g, b),
            Some(a) => self.backend.allocate_color_alpha(r, g, b, a),
        };
        log::debug!("allocated color {:08x}", key.value());
        self.colors.insert(key, handle);
        handle
    }

    fn create(&mut self, c: Color) -> ColorHandle {
        self.create_color(c.r, c.g, c.b, None)
    }

    /// Flood fill from `(start_x, start_y)`. A start point off the canvas
    /// changes nothing.
    pub fn fill(&mut self, color: ColorHandle, start_x: i64, start_y: i64) {
        let written = self.backend.flood_fill(start_x, start_y, color);
        log::trace!("fill at ({}, {}) wrote {} pixels", start_x, start_y, written);
    }

    pub fn fill_origin(&mut self, color: ColorHandle) {
        self.fill(color, 0, 0);
    }

    pub fn color_white(&mut self) -> ColorHandle {
        self.create(WHITE)
    }

    pub fn color_black(&mut self) -> ColorHandle {
        self.create(BLACK)
    }

    pub fn color_red(&mut self) -> ColorHandle {
        self.create(RED)
    }

    pub fn color_green(&mut self) -> ColorHandle {
        self.create(GREEN)
    }

    pub fn color_blue(&mut self) -> ColorHandle {
        self.create(BLUE)
    }

    pub fn color_yellow(&mut self) -> ColorHandle {
        self.create(YELLOW)
    }

    pub fn color_magenta(&mut self) -> ColorHandle {
        self.create(MAGENTA)
    }

    pub fn color_cyan(&mut self) -> ColorHandle {
        self.create(CYAN)
    }

    pub fn color_transparent(&mut self) -> ColorHandle {
        let t = color::TRANSPARENT;
        self.create_color(t.r, t.g, t.b, Some(t.a))
    }

    /// Encode the canvas as `filetype`.
    ///
    /// Without `filename` the encoded bytes are returned as
    /// [`Export::Bytes`]; with one they are written there and
    /// [`Export::Written`] is returned. `quality` is the JPEG quality
    /// (0-100) or the PNG zlib level (0-9); `filter` applies to PNG only.
    ///
    /// Interlaced JPEG and transparent PNG change the raster's export
    /// state before encoding, and that state persists for later exports.
    pub fn to_image(
        &mut self,
        filetype: ImageType,
        filename: Option<&Path>,
        quality: Option<u8>,
        filter: Option<PngFilter>,
    ) -> CanvasResult<Export> {
        ensure_writable(filename)?;
        log::debug!("exporting {}x{} canvas as {}", self.width(), self.height(), filetype);

        let encoded = match filetype {
            ImageType::Gif => self.encode_gif(),
            ImageType::InterlacedJpeg => {
                self.backend.set_interlace(true);
                self.encode_jpeg(quality)
            }
            ImageType::Jpeg => self.encode_jpeg(quality),
            ImageType::TransparentPng => {
                self.prepare_transparent_png();
                self.encode_png(quality, filter)
            }
            ImageType::Png => self.encode_png(quality, filter),
            ImageType::Wbmp => codec::encode_wbmp(self.backend.image(), WBMP_THRESHOLD),
            ImageType::Gd2 => {
                let transparent = self.transparent_color();
                codec::encode_gd2(self.backend.image(), GD2_CHUNK_SIZE, transparent)
            }
        };

        let bytes = match encoded {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("{} encoding failed: {}", filetype, e);
                return Ok(Export::Failed);
            }
        };

        Ok(match filename {
            None => Export::Bytes(bytes),
            Some(path) => match files::write_file(path, &bytes) {
                Ok(()) => Export::Written,
                Err(e) => {
                    log::warn!("writing {} failed: {}", path.display(), e);
                    Export::Failed
                }
            },
        })
    }

    /// [`to_image`](Self::to_image) keyed by the numeric type code. Unknown
    /// codes produce [`Export::Failed`] without touching `filename`.
    pub fn to_image_code(
        &mut self,
        code: i32,
        filename: Option<&Path>,
        quality: Option<u8>,
        filter: Option<PngFilter>,
    ) -> CanvasResult<Export> {
        match ImageType::from_code(code) {
            Some(filetype) => self.to_image(filetype, filename, quality, filter),
            None => {
                ensure_writable(filename)?;
                log::warn!("unknown image type code {}", code);
                Ok(Export::Failed)
            }
        }
    }

    fn encode_gif(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode_gif(self.backend.image(), self.transparent_color())
    }

    fn encode_jpeg(&self, quality: Option<u8>) -> Result<Vec<u8>, CodecError> {
        codec::encode_jpeg(self.backend.image(), quality, self.backend.interlace())
    }

    fn prepare_transparent_png(&mut self) {
        self.backend.set_save_alpha(true);
        let transparent = self.color_transparent();
        self.backend.set_transparent(Some(transparent));
        self.backend.set_alpha_blending(true);
    }

    fn encode_png(
        &self,
        quality: Option<u8>,
        filter: Option<PngFilter>,
    ) -> Result<Vec<u8>, CodecError> {
        codec::encode_png(
            self.backend.image(),
            self.backend.save_alpha(),
            quality,
            filter,
        )
    }

    fn transparent_color(&self) -> Option<Color> {
        self.backend
            .transparent()
            .map(|handle| self.backend.resolve(handle))
    }

    fn get(&mut self, filetype: ImageType) -> Option<Vec<u8>> {
        self.to_image(filetype, None, None, None)
            .ok()
            .and_then(Export::into_bytes)
    }

    fn save(&mut self, filetype: ImageType, filename: &Path) -> CanvasResult<bool> {
        Ok(self
            .to_image(filetype, Some(filename), None, None)?
            .is_success())
    }

    pub fn get_jpeg(&mut self) -> Option<Vec<u8>> {
        self.get(ImageType::Jpeg)
    }

    pub fn save_jpeg(&mut self, filename: impl AsRef<Path>) -> CanvasResult<bool> {
        self.save(ImageType::Jpeg, filename.as_ref())
    }

    pub fn get_png(&mut self) -> Option<Vec<u8>> {
        self.get(ImageType::Png)
    }

    pub fn save_png(&mut self, filename: impl AsRef<Path>) -> CanvasResult<bool> {
        self.save(ImageType::Png, filename.as_ref())
    }

    /// PNG with a full alpha channel.
    pub fn get_png24(&mut self) -> Option<Vec<u8>> {
        self.get(ImageType::TransparentPng)
    }

    pub fn save_png24(&mut self, filename: impl AsRef<Path>) -> CanvasResult<bool> {
        self.save(ImageType::TransparentPng, filename.as_ref())
    }

    pub fn get_gif(&mut self) -> Option<Vec<u8>> {
        self.get(ImageType::Gif)
    }

    pub fn save_gif(&mut self, filename: impl AsRef<Path>) -> CanvasResult<bool> {
        self.save(ImageType::Gif, filename.as_ref())
    }

    pub fn get_wbmp(&mut self) -> Option<Vec<u8>> {
        self.get(ImageType::Wbmp)
    }

    pub fn save_wbmp(&mut self, filename: impl AsRef<Path>) -> CanvasResult<bool> {
        self.save(ImageType::Wbmp, filename.as_ref())
    }

    pub fn get_gd2(&mut self) -> Option<Vec<u8>> {
        self.get(ImageType::Gd2)
    }

    pub fn save_gd2(&mut self, filename: impl AsRef<Path>) -> CanvasResult<bool> {
        self.save(ImageType::Gd2, filename.as_ref())
    }

    /// Release the canvas now instead of at end of scope.
    pub fn dispose(self) {
        log::trace!("disposing canvas with {} cached colors", self.colors.len());
    }
}

fn ensure_writable(filename: Option<&Path>) -> CanvasResult<()> {
    match filename {
        Some(path) if !files::is_writable(path) => {
            Err(CanvasError::UnwritableTarget(path.to_path_buf()))
        }
        _ => Ok(()),
    }
}

impl<B: RasterBackend + std::fmt::Debug> std::fmt::Debug for Canvas<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("backend", &self.backend)
            .field("cached_colors", &self.colors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::color::TRANSPARENT;
    use image::RgbaImage;
    use std::cell::Cell;
    use tempfile::tempdir;

    /// Delegates to a real raster and counts allocations.
    #[derive(Debug)]
    struct CountingBackend {
        inner: Raster,
        opaque: Cell<usize>,
        alpha: Cell<usize>,
    }

    impl CountingBackend {
        fn allocations(&self) -> usize {
            self.opaque.get() + self.alpha.get()
        }
    }

    impl RasterBackend for CountingBackend {
        fn new_truecolor(width: u32, height: u32) -> Self {
            Self {
                inner: Raster::new(width, height),
                opaque: Cell::new(0),
                alpha: Cell::new(0),
            }
        }
        fn from_image(image: RgbaImage) -> Self {
            Self {
                inner: Raster::from_rgba_image(image),
                opaque: Cell::new(0),
                alpha: Cell::new(0),
            }
        }
        fn allocate_color(&mut self, r: u8, g: u8, b: u8) -> ColorHandle {
            self.opaque.set(self.opaque.get() + 1);
            self.inner.allocate_color(r, g, b)
        }
        fn allocate_color_alpha(&mut self, r: u8, g: u8, b: u8, a: u8) -> ColorHandle {
            self.alpha.set(self.alpha.get() + 1);
            self.inner.allocate_color_alpha(r, g, b, a)
        }
        fn resolve(&self, handle: ColorHandle) -> Color {
            self.inner.resolve(handle)
        }
        fn flood_fill(&mut self, x: i64, y: i64, color: ColorHandle) -> usize {
            self.inner.flood_fill(x, y, color)
        }
        fn dimensions(&self) -> (u32, u32) {
            self.inner.dimensions()
        }
        fn pixel(&self, x: u32, y: u32) -> Option<Color> {
            self.inner.pixel(x, y)
        }
        fn image(&self) -> &RgbaImage {
            self.inner.image()
        }
        fn set_interlace(&mut self, enabled: bool) {
            self.inner.set_interlace(enabled)
        }
        fn interlace(&self) -> bool {
            self.inner.interlace()
        }
        fn set_save_alpha(&mut self, enabled: bool) {
            self.inner.set_save_alpha(enabled)
        }
        fn save_alpha(&self) -> bool {
            self.inner.save_alpha()
        }
        fn set_alpha_blending(&mut self, enabled: bool) {
            self.inner.set_alpha_blending(enabled)
        }
        fn alpha_blending(&self) -> bool {
            self.inner.alpha_blending()
        }
        fn set_transparent(&mut self, color: Option<ColorHandle>) {
            self.inner.set_transparent(color)
        }
        fn transparent(&self) -> Option<ColorHandle> {
            self.inner.transparent()
        }
    }

    fn counting(width: u32, height: u32) -> Canvas<CountingBackend> {
        Canvas::with_size(width, height).unwrap()
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(3, 2).unwrap();
        assert_eq!(canvas.dimensions(), (3, 2));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(canvas.pixel(x, y), Some(TRANSPARENT));
            }
        }
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(Canvas::new(0, 5), Err(CanvasError::InvalidInput(_))));
        assert!(matches!(Canvas::new(5, 0), Err(CanvasError::InvalidInput(_))));
    }

    #[test]
    fn test_default_is_one_by_one() {
        let canvas: Canvas = Canvas::default();
        assert_eq!(canvas.dimensions(), (1, 1));
        assert_eq!(canvas.pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_construction_allocates_transparent_once() {
        let mut canvas = counting(2, 2);
        assert_eq!(canvas.backend().alpha.get(), 1);
        canvas.color_transparent();
        assert_eq!(canvas.backend().alpha.get(), 1);
        assert_eq!(canvas.cached_colors(), 1);
    }

    #[test]
    fn test_create_color_is_cached() {
        let mut canvas = counting(1, 1);
        let before = canvas.backend().allocations();
        let a = canvas.create_color(10, 20, 30, None);
        let b = canvas.create_color(10, 20, 30, None);
        assert_eq!(a, b);
        assert_eq!(canvas.backend().allocations(), before + 1);
    }

    #[test]
    fn test_create_color_alpha_uses_alpha_allocation() {
        let mut canvas = counting(1, 1);
        let opaque_before = canvas.backend().opaque.get();
        let alpha_before = canvas.backend().alpha.get();
        canvas.create_color(1, 2, 3, Some(4));
        assert_eq!(canvas.backend().alpha.get(), alpha_before + 1);
        assert_eq!(canvas.backend().opaque.get(), opaque_before);
        canvas.create_color(1, 2, 3, None);
        assert_eq!(canvas.backend().opaque.get(), opaque_before + 1);
    }

    #[test]
    fn test_named_colors_share_cache() {
        let mut canvas = counting(1, 1);
        let red = canvas.color_red();
        assert_eq!(canvas.create_color(0xFF, 0, 0, None), red);
        let white = canvas.color_white();
        assert_ne!(white, red);
        let before = canvas.backend().allocations();
        canvas.color_red();
        canvas.color_white();
        assert_eq!(canvas.backend().allocations(), before);
        for handle in [
            canvas.color_black(),
            canvas.color_green(),
            canvas.color_blue(),
            canvas.color_yellow(),
            canvas.color_magenta(),
            canvas.color_cyan(),
        ] {
            assert_ne!(handle, red);
        }
        assert_eq!(canvas.cached_colors(), 9);
    }

    #[test]
    fn test_fill_replaces_region() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let blue = canvas.color_blue();
        canvas.fill_origin(blue);
        assert!((0..4).all(|y| (0..4).all(|x| canvas.pixel(x, y) == Some(BLUE))));
    }

    #[test]
    fn test_fill_out_of_range_is_ignored() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        let red = canvas.color_red();
        canvas.fill(red, 5, 5);
        canvas.fill(red, -1, 0);
        assert_eq!(canvas.pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_to_image_png_bytes() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        let red = canvas.color_red();
        canvas.fill_origin(red);
        let bytes = canvas
            .to_image(ImageType::Png, None, None, None)
            .unwrap()
            .into_bytes()
            .unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_interlaced_jpeg_sets_interlace() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        assert!(!canvas.backend().interlace());
        let out = canvas
            .to_image(ImageType::InterlacedJpeg, None, Some(80), None)
            .unwrap();
        assert!(out.is_success());
        assert!(canvas.backend().interlace());
    }

    #[test]
    fn test_transparent_png_sets_state() {
        let mut canvas = counting(2, 2);
        let out = canvas
            .to_image(ImageType::TransparentPng, None, None, None)
            .unwrap();
        assert!(out.is_success());
        let backend = canvas.backend();
        assert!(backend.save_alpha());
        assert!(backend.alpha_blending());
        let handle = backend.transparent().unwrap();
        assert_eq!(backend.resolve(handle), TRANSPARENT);
        // transparent color came from the cache
        assert_eq!(backend.alpha.get(), 1);
    }

    #[test]
    fn test_plain_png_leaves_state_alone() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.to_image(ImageType::Png, None, None, None).unwrap();
        assert!(!canvas.backend().save_alpha());
        assert!(canvas.backend().transparent().is_none());
    }

    #[test]
    fn test_unknown_code_fails_without_writing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("never.png");
        let mut canvas = Canvas::new(1, 1).unwrap();
        let out = canvas.to_image_code(999, Some(&target), None, None).unwrap();
        assert_eq!(out, Export::Failed);
        assert!(!target.exists());
    }

    #[test]
    fn test_known_code_dispatches() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        let out = canvas.to_image_code(2, None, None, None).unwrap();
        assert!(matches!(out, Export::Bytes(_)));
    }

    #[test]
    fn test_unwritable_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("out.png");
        let mut canvas = Canvas::new(1, 1).unwrap();
        let err = canvas
            .to_image(ImageType::Png, Some(&target), None, None)
            .unwrap_err();
        assert!(matches!(err, CanvasError::UnwritableTarget(p) if p == target));
        let err = canvas.to_image_code(999, Some(&target), None, None).unwrap_err();
        assert!(matches!(err, CanvasError::UnwritableTarget(_)));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.gif");
        let mut canvas = Canvas::new(3, 3).unwrap();
        assert!(canvas.save_gif(&target).unwrap());
        let written = std::fs::read(&target).unwrap();
        assert_eq!(&written[..3], b"GIF");
    }

    #[test]
    fn test_wrappers_produce_bytes() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        assert_eq!(&canvas.get_jpeg().unwrap()[..2], &[0xFF, 0xD8]);
        assert_eq!(&canvas.get_png().unwrap()[1..4], b"PNG");
        assert_eq!(&canvas.get_png24().unwrap()[1..4], b"PNG");
        assert_eq!(&canvas.get_gif().unwrap()[..3], b"GIF");
        assert_eq!(&canvas.get_wbmp().unwrap()[..4], &[0, 0, 2, 2]);
        assert_eq!(&canvas.get_gd2().unwrap()[..4], b"gd2\0");
    }

    #[test]
    fn test_gd2_after_transparent_png_records_transparent_color() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        canvas.get_png24().unwrap();
        let gd2 = canvas.get_gd2().unwrap();
        // transparent word follows the 18-byte header and true-color flag
        assert_ne!(&gd2[19..23], &(-1i32).to_be_bytes());
    }

    #[test]
    fn test_from_file_rejects_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Canvas::from_file(dir.path()),
            Err(CanvasError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_file_rejects_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.bmp");
        std::fs::write(&path, b"BM").unwrap();
        assert!(matches!(
            Canvas::from_file(&path),
            Err(CanvasError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_file_undecodable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.PNG");
        std::fs::write(&path, b"not really a png").unwrap();
        assert!(matches!(
            Canvas::from_file(&path),
            Err(CanvasError::Decode(_))
        ));
    }

    #[test]
    fn test_from_file_reports_loaded_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        let mut source = Canvas::new(7, 3).unwrap();
        assert!(source.save_png24(&path).unwrap());

        let loaded = Canvas::from_file(&path).unwrap();
        assert_eq!(loaded.dimensions(), (7, 3));
        assert_eq!(loaded.pixel(6, 2), Some(TRANSPARENT));
        assert_eq!(loaded.cached_colors(), 0);
    }

    #[test]
    fn test_with_size_rejects_zero_for_any_backend() {
        assert!(matches!(
            Canvas::<CountingBackend>::with_size(0, 1),
            Err(CanvasError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_into_custom_backend() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("source.gd2");
        let mut source = Canvas::new(4, 2).unwrap();
        let green = source.color_green();
        source.fill_origin(green);
        assert!(source.save_gd2(&path).unwrap());

        let loaded = Canvas::<CountingBackend>::load(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 2));
        assert_eq!(loaded.pixel(3, 1), Some(GREEN));
        assert_eq!(loaded.backend().allocations(), 0);
    }

    #[test]
    fn test_dispose() {
        let canvas = Canvas::new(1, 1).unwrap();
        canvas.dispose();
    }
}
