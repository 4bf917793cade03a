//! Canvas, raster backend and image codecs.

pub mod backend;
pub mod canvas;
pub mod codec;
pub mod color;
pub mod format;
pub mod gd2;
pub mod raster;
pub mod wbmp;

pub use backend::RasterBackend;
pub use canvas::{Canvas, CanvasError, CanvasResult};
pub use codec::CodecError;
pub use color::{Color, ColorHandle, ColorKey, TRANSPARENT};
pub use format::{Export, ImageType, PngFilter, SUPPORTED_EXTENSIONS};
pub use raster::Raster;
