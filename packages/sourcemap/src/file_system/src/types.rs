use std::fmt;
use std::io;
use std::path::Path;

use super::util::normalize_separators;

/// Absolute path on the local file system, `/`-separated on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsoluteFsPath(String);

impl AbsoluteFsPath {
    pub fn new(path: impl Into<String>) -> Self {
        AbsoluteFsPath(path.into())
    }

    /// From an OS path, converting `\` separators.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        AbsoluteFsPath(normalize_separators(&path.as_ref().to_string_lossy()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AbsoluteFsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<AbsoluteFsPath> for String {
    fn from(path: AbsoluteFsPath) -> String {
        path.0
    }
}

impl fmt::Display for AbsoluteFsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pure path operations, independent of what exists on disk.
pub trait PathManipulation {
    fn is_rooted(&self, path: &str) -> bool;
    fn normalize(&self, path: &str) -> String;
    fn dirname(&self, file: &str) -> String;
}

/// Probes the resolver makes against a file system.
///
/// Probe failures are reported as `false` / `Err` and never panic; callers
/// treat an inaccessible file as a missing one.
pub trait ReadonlyFileSystem: PathManipulation {
    fn is_case_sensitive(&self) -> bool;
    fn exists(&self, path: &AbsoluteFsPath) -> bool;
    fn is_file(&self, path: &AbsoluteFsPath) -> bool;
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String>;
    /// Resolve symbolic links, yielding the OS-canonical form of `path`.
    fn realpath(&self, path: &AbsoluteFsPath) -> io::Result<AbsoluteFsPath>;
}
