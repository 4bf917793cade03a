// File checks and whole-file I/O used by canvas load and save.

use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileError {
    NotFound,
    PermissionDenied,
    IsADirectory,
    IoError,
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::NotFound => write!(f, "File not found"),
            FileError::PermissionDenied => write!(f, "Permission denied"),
            FileError::IsADirectory => write!(f, "Is a directory"),
            FileError::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound,
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied,
            _ => FileError::IoError,
        }
    }
}

/// True for regular files only; directories and missing paths are false.
pub fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Lowercased extension, if the path has a UTF-8 one.
pub fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Whether `path` can be written: an existing file must not be read-only, a
/// new file needs an existing, writable parent directory.
///
/// Only permission bits are consulted; nothing is created.
pub fn is_writable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file() && !meta.permissions().readonly(),
        Err(_) => {
            let parent = match path.parent() {
                Some(p) if p.as_os_str().is_empty() => Path::new("."),
                Some(p) => p,
                None => return false,
            };
            fs::metadata(parent)
                .map(|m| m.is_dir() && !m.permissions().readonly())
                .unwrap_or(false)
        }
    }
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, FileError> {
    if !path.exists() {
        return Err(FileError::NotFound);
    }
    if path.is_dir() {
        return Err(FileError::IsADirectory);
    }
    Ok(fs::read(path)?)
}

pub fn write_file(path: &Path, data: &[u8]) -> Result<(), FileError> {
    if path.is_dir() {
        return Err(FileError::IsADirectory);
    }
    fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_regular_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.png");
        assert!(!is_regular_file(&file));
        fs::write(&file, b"x").unwrap();
        assert!(is_regular_file(&file));
        assert!(!is_regular_file(dir.path()));
    }

    #[test]
    fn test_extension_lowercase() {
        assert_eq!(extension_lowercase(Path::new("a/b.PNG")), Some("png".into()));
        assert_eq!(extension_lowercase(Path::new("a/b.tar.Gz")), Some("gz".into()));
        assert_eq!(extension_lowercase(Path::new("noext")), None);
    }

    #[test]
    fn test_is_writable_new_file_in_existing_dir() {
        let dir = tempdir().unwrap();
        assert!(is_writable(&dir.path().join("out.png")));
    }

    #[test]
    fn test_is_writable_missing_parent() {
        let dir = tempdir().unwrap();
        assert!(!is_writable(&dir.path().join("missing").join("out.png")));
    }

    #[test]
    fn test_is_writable_directory_target() {
        let dir = tempdir().unwrap();
        assert!(!is_writable(dir.path()));
    }

    #[test]
    fn test_is_writable_readonly_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ro.png");
        fs::write(&file, b"x").unwrap();
        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file, perms).unwrap();
        assert!(!is_writable(&file));

        let mut perms = fs::metadata(&file).unwrap().permissions();
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        fs::set_permissions(&file, perms).unwrap();
        assert!(is_writable(&file));
    }

    #[test]
    fn test_read_write_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.bin");
        write_file(&file, &[1, 2, 3]).unwrap();
        assert_eq!(read_file(&file).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_read_file_errors() {
        let dir = tempdir().unwrap();
        assert_eq!(read_file(&dir.path().join("nope")), Err(FileError::NotFound));
        assert_eq!(read_file(dir.path()), Err(FileError::IsADirectory));
        assert_eq!(write_file(dir.path(), b""), Err(FileError::IsADirectory));
    }

    #[test]
    fn test_file_error_from_io_error() {
        let err: FileError = io::Error::new(io::ErrorKind::NotFound, "t").into();
        assert_eq!(err, FileError::NotFound);
        let err: FileError = io::Error::new(io::ErrorKind::PermissionDenied, "t").into();
        assert_eq!(err, FileError::PermissionDenied);
        let err: FileError = io::Error::new(io::ErrorKind::Other, "t").into();
        assert_eq!(err, FileError::IoError);
    }
}
