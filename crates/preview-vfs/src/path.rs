//! String-level path utilities.
//!
//! VFS paths are Unix-style strings on every platform: absolute, forward-slash
//! separated, no drive letters. These helpers never touch `std::path`, so
//! behavior is identical on Linux, macOS, and Windows.

/// Normalizes an absolute path: collapses repeated separators, resolves `.`
/// and `..` segments, and strips any trailing separator (root excepted).
///
/// Returns `None` when the path is not absolute or when a `..` segment would
/// escape the root.
///
/// # Examples
///
/// ```
/// use preview_vfs::path::normalize;
///
/// assert_eq!(normalize("/a//b/./c"), Some("/a/b/c".to_string()));
/// assert_eq!(normalize("/a/b/../c"), Some("/a/c".to_string()));
/// assert_eq!(normalize("/a/../.."), None);
/// assert_eq!(normalize("relative"), None);
/// ```
#[must_use]
pub fn normalize(path: &str) -> Option<String> {
    if !path.starts_with('/') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        Some("/".to_string())
    } else {
        Some(format!("/{}", segments.join("/")))
    }
}

/// Joins a relative segment onto an absolute base directory and normalizes
/// the result.
///
/// # Examples
///
/// ```
/// use preview_vfs::path::join;
///
/// assert_eq!(join("/components", "Counter.jsx"), Some("/components/Counter.jsx".to_string()));
/// assert_eq!(join("/", "App.jsx"), Some("/App.jsx".to_string()));
/// assert_eq!(join("/components", "../App"), Some("/App".to_string()));
/// ```
#[must_use]
pub fn join(base: &str, segment: &str) -> Option<String> {
    normalize(&format!("{base}/{segment}"))
}

/// Resolves a relative specifier (`./x`, `../x`) against the file that
/// imports it, yielding an absolute path.
///
/// Returns `None` when the specifier walks out of the root.
///
/// # Examples
///
/// ```
/// use preview_vfs::path::resolve_relative;
///
/// assert_eq!(
///     resolve_relative("/App.jsx", "./components/Counter"),
///     Some("/components/Counter".to_string()),
/// );
/// assert_eq!(
///     resolve_relative("/components/Counter.jsx", "../utils"),
///     Some("/utils".to_string()),
/// );
/// assert_eq!(resolve_relative("/App.jsx", "../escape"), None);
/// ```
#[must_use]
pub fn resolve_relative(importer: &str, specifier: &str) -> Option<String> {
    let base = parent(importer).unwrap_or("/");
    join(base, specifier)
}

/// Returns the parent directory of an absolute path, or `None` for the root.
#[must_use]
pub fn parent(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/"),
        Some(pos) => Some(&path[..pos]),
        None => None,
    }
}

/// Returns the final component of a path.
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rfind('/').map_or(path, |pos| &path[pos + 1..])
}

/// Returns the final component with its extension removed.
#[must_use]
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(pos) => &name[..pos],
    }
}

/// Returns the extension of the final component, without the dot.
///
/// Dotfiles (`/.env`) have no extension.
///
/// # Examples
///
/// ```
/// use preview_vfs::path::extension;
///
/// assert_eq!(extension("/components/Counter.jsx"), Some("jsx"));
/// assert_eq!(extension("/App"), None);
/// assert_eq!(extension("/.env"), None);
/// ```
#[must_use]
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(pos) => Some(&name[pos + 1..]),
    }
}

/// Returns the path with the final component's extension removed.
#[must_use]
pub fn strip_extension(path: &str) -> &str {
    extension(path).map_or(path, |ext| &path[..path.len() - ext.len() - 1])
}
