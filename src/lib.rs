// imagix: true-color canvas with a color cache and GIF/JPEG/PNG/WBMP/GD2 export

pub mod cli;
pub mod config;
pub mod graphics;
pub mod io;
pub mod logging;

pub use cli::Cli;
pub use config::Options;
pub use graphics::{Canvas, CanvasError, Color, ColorHandle, Export, ImageType, PngFilter};
pub use logging::LogLevel;
