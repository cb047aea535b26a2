use once_cell::sync::Lazy;
use regex::Regex;

static WINDOWS_DRIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]:(/|$)").unwrap());

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// True for `/unix/paths` and `C:/windows/paths`.
pub fn is_absolute_path(path: &str) -> bool {
    let normalized = normalize_separators(path);
    normalized.starts_with('/') || WINDOWS_DRIVE.is_match(&normalized)
}

/// Collapse `.` and `..` segments and duplicate separators.
///
/// `..` above the root of an absolute path is dropped; leading `..` segments
/// of a relative path are kept.
pub fn clean_path(path: &str) -> String {
    let normalized = normalize_separators(path);

    let is_windows_absolute = WINDOWS_DRIVE.is_match(&normalized);
    let is_unix_absolute = normalized.starts_with('/');

    let (drive_prefix, path_part) = if is_windows_absolute {
        normalized.split_at(2)
    } else {
        ("", normalized.as_str())
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in path_part.split('/') {
        match segment {
            "" | "." => continue,
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if is_windows_absolute || is_unix_absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");

    if is_windows_absolute {
        format!("{}/{}", drive_prefix, joined)
    } else if is_unix_absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}
