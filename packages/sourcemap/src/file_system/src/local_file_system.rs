use crate::file_system::src::types::{AbsoluteFsPath, PathManipulation, ReadonlyFileSystem};
use crate::file_system::src::util::{clean_path, is_absolute_path, normalize_separators};
use std::fs;
use std::io;
use std::path::Path;

/// Read-only view of the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        LocalFileSystem
    }
}

impl PathManipulation for LocalFileSystem {
    fn is_rooted(&self, path: &str) -> bool {
        is_absolute_path(path)
    }

    fn normalize(&self, path: &str) -> String {
        clean_path(path)
    }

    fn dirname(&self, file: &str) -> String {
        let parent = Path::new(file).parent().unwrap_or(Path::new("."));
        normalize_separators(parent.to_string_lossy().as_ref())
    }
}

impl ReadonlyFileSystem for LocalFileSystem {
    fn is_case_sensitive(&self) -> bool {
        !cfg!(any(windows, target_os = "macos"))
    }

    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        fs::metadata(path.as_str()).is_ok()
    }

    fn is_file(&self, path: &AbsoluteFsPath) -> bool {
        fs::metadata(path.as_str())
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        fs::read_to_string(path.as_str())
    }

    fn realpath(&self, path: &AbsoluteFsPath) -> io::Result<AbsoluteFsPath> {
        let real = fs::canonicalize(path.as_str())?;
        let mut normalized = normalize_separators(real.to_string_lossy().as_ref());
        // Verbatim prefix added by canonicalize on Windows.
        if let Some(stripped) = normalized.strip_prefix("//?/") {
            normalized = stripped.to_string();
        }
        Ok(AbsoluteFsPath::new(normalized))
    }
}
