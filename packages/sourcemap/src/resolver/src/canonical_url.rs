// Canonical URL
//
// Comparable form of a source location: either a path on the local file
// system or an URL with a scheme.

use std::fmt;

use url::Url;

use crate::file_system::{clean_path, AbsoluteFsPath};

const FILE_SCHEME_PREFIX: &str = "file://";
const OPAQUE_SCHEMES: [&str; 3] = ["data:", "blob:", "javascript:"];

/// True when `raw` must be parsed as-is instead of resolved against a base.
pub fn has_explicit_scheme(raw: &str) -> bool {
    raw.contains("://") || OPAQUE_SCHEMES.iter().any(|scheme| raw.starts_with(scheme))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalUrl {
    /// Path on the local file system, `.`/`..` collapsed, `/` separated.
    LocalFile(String),
    /// Anything with a scheme: `webpack:///`, `http://`, `data:`...
    Remote(Url),
}

impl CanonicalUrl {
    pub fn local_file(path: &str) -> Self {
        CanonicalUrl::LocalFile(clean_path(path))
    }

    pub fn from_file(path: &AbsoluteFsPath) -> Self {
        Self::local_file(path.as_str())
    }

    /// Parse without resolving against any base. Strings without a scheme
    /// are taken as local paths.
    pub fn parse(raw: &str) -> Self {
        if has_explicit_scheme(raw) {
            if let Ok(url) = Url::parse(raw) {
                return CanonicalUrl::Remote(url);
            }
        }
        Self::local_file(raw)
    }

    /// Local path of a `file://` URL.
    pub fn from_file_url(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(FILE_SCHEME_PREFIX)?;
        // file:///C:/dir -> C:/dir
        let rest = match rest.as_bytes() {
            [b'/', drive, b':', ..] if drive.is_ascii_alphabetic() => &rest[1..],
            _ => rest,
        };
        Some(Self::local_file(rest))
    }

    pub fn is_local_file(&self) -> bool {
        matches!(self, CanonicalUrl::LocalFile(_))
    }

    pub fn scheme(&self) -> Option<&str> {
        match self {
            CanonicalUrl::LocalFile(_) => None,
            CanonicalUrl::Remote(url) => Some(url.scheme()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            CanonicalUrl::LocalFile(path) => path,
            CanonicalUrl::Remote(url) => url.path(),
        }
    }

    /// Same scheme and authority, different path, no query or fragment.
    pub fn with_path(&self, path: &str) -> Self {
        match self {
            CanonicalUrl::LocalFile(_) => Self::local_file(path),
            CanonicalUrl::Remote(url) => {
                let mut url = url.clone();
                url.set_path(path);
                url.set_query(None);
                url.set_fragment(None);
                CanonicalUrl::Remote(url)
            }
        }
    }

    /// Drop query and fragment.
    pub fn trim_parameters(&self) -> Self {
        match self {
            CanonicalUrl::LocalFile(_) => self.clone(),
            CanonicalUrl::Remote(url) => {
                if url.query().is_none() && url.fragment().is_none() {
                    return self.clone();
                }
                let mut url = url.clone();
                url.set_query(None);
                url.set_fragment(None);
                CanonicalUrl::Remote(url)
            }
        }
    }

    pub fn equals_ignore_parameters(&self, other: &CanonicalUrl, case_sensitive: bool) -> bool {
        let left = self.trim_parameters();
        let right = other.trim_parameters();
        if case_sensitive {
            left == right
        } else {
            left.is_local_file() == right.is_local_file()
                && left.as_str().to_lowercase() == right.as_str().to_lowercase()
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CanonicalUrl::LocalFile(path) => path,
            CanonicalUrl::Remote(url) => url.as_str(),
        }
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
