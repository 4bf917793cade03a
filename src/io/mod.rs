//! File system helpers for loading and saving images.

pub mod files;

pub use files::{extension_lowercase, is_regular_file, is_writable, read_file, write_file, FileError};
