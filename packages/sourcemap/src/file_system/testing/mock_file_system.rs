use std::collections::HashMap;
use std::io;

use crate::file_system::src::types::{AbsoluteFsPath, PathManipulation, ReadonlyFileSystem};
use crate::file_system::src::util::{clean_path, is_absolute_path};

/// Upper bound on chained links before a path is reported as looping.
const MAX_LINK_DEPTH: usize = 40;

#[derive(Clone, Debug)]
pub enum Entity {
    File(String),
    SymLink(AbsoluteFsPath),
}

/// In-memory file system for deterministic tests.
///
/// Directories are implicit: any prefix of a registered path exists.
#[derive(Clone, Debug)]
pub struct MockFileSystem {
    case_sensitive: bool,
    entities: HashMap<String, Entity>,
}

impl MockFileSystem {
    pub fn new_posix() -> Self {
        MockFileSystem {
            case_sensitive: true,
            entities: HashMap::new(),
        }
    }

    pub fn new_case_insensitive() -> Self {
        MockFileSystem {
            case_sensitive: false,
            entities: HashMap::new(),
        }
    }

    pub fn init_with_files(mut self, files: Vec<(&str, &str)>) -> Self {
        for (path, content) in files {
            let key = self.key(path);
            self.entities.insert(key, Entity::File(content.to_string()));
        }
        self
    }

    pub fn with_symlink(mut self, link: &str, target: &str) -> Self {
        let key = self.key(link);
        self.entities
            .insert(key, Entity::SymLink(AbsoluteFsPath::new(clean_path(target))));
        self
    }

    fn key(&self, path: &str) -> String {
        let cleaned = clean_path(path);
        if self.case_sensitive {
            cleaned
        } else {
            cleaned.to_lowercase()
        }
    }

    /// Follow links on every prefix of `path`.
    fn resolve_links(&self, path: &str) -> io::Result<String> {
        let mut current = clean_path(path);
        for _ in 0..MAX_LINK_DEPTH {
            let mut resolved = String::new();
            let mut redirect = None;
            let segments: Vec<&str> = current.split('/').filter(|s| !s.is_empty()).collect();

            for (i, segment) in segments.iter().enumerate() {
                resolved.push('/');
                resolved.push_str(segment);
                if let Some(Entity::SymLink(target)) = self.entities.get(&self.key(&resolved)) {
                    let rest = segments[i + 1..].join("/");
                    redirect = Some(clean_path(&format!("{}/{}", target, rest)));
                    break;
                }
            }

            match redirect {
                Some(next) => current = next,
                None if resolved.is_empty() => return Ok("/".to_string()),
                None => return Ok(resolved),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("too many levels of symbolic links: {}", path),
        ))
    }

    fn is_directory(&self, key: &str) -> bool {
        let prefix = format!("{}/", key.trim_end_matches('/'));
        self.entities.keys().any(|k| k.starts_with(&prefix))
    }
}

impl PathManipulation for MockFileSystem {
    fn is_rooted(&self, path: &str) -> bool {
        is_absolute_path(path)
    }

    fn normalize(&self, path: &str) -> String {
        clean_path(path)
    }

    fn dirname(&self, file: &str) -> String {
        let cleaned = clean_path(file);
        match cleaned.rfind('/') {
            Some(0) => "/".to_string(),
            Some(index) => cleaned[..index].to_string(),
            None => ".".to_string(),
        }
    }
}

impl ReadonlyFileSystem for MockFileSystem {
    fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        match self.resolve_links(path.as_str()) {
            Ok(real) => {
                let key = self.key(&real);
                self.entities.contains_key(&key) || self.is_directory(&key)
            }
            Err(_) => false,
        }
    }

    fn is_file(&self, path: &AbsoluteFsPath) -> bool {
        self.read_file(path).is_ok()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        let real = self.resolve_links(path.as_str())?;
        match self.entities.get(&self.key(&real)) {
            Some(Entity::File(content)) => Ok(content.clone()),
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path),
            )),
        }
    }

    fn realpath(&self, path: &AbsoluteFsPath) -> io::Result<AbsoluteFsPath> {
        if !self.exists(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file or directory: {}", path),
            ));
        }
        self.resolve_links(path.as_str()).map(AbsoluteFsPath::new)
    }
}
