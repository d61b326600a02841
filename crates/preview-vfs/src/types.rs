//! Core types for the virtual filesystem.
//!
//! Defines strong types for VFS paths, files, and errors. Paths are validated
//! and normalized at construction so the rest of the crate can treat them as
//! canonical keys.
//!
//! # Examples
//!
//! ```
//! use preview_vfs::{VfsFile, VfsPath};
//!
//! let path = VfsPath::new("/components/Counter.jsx").unwrap();
//! let file = VfsFile::for_path(path.as_str(), "export default function Counter() {}");
//!
//! assert_eq!(path.as_str(), "/components/Counter.jsx");
//! assert_eq!(file.language(), preview_vfs::LanguageHint::Jsx);
//! ```

use crate::path;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during VFS operations.
///
/// All variants carry the offending path (or a message) and implement
/// `is_xxx()` methods for classification without matching on variants.
///
/// # Examples
///
/// ```
/// use preview_vfs::VfsError;
///
/// let error = VfsError::NotFound { path: "/missing.jsx".to_string() };
/// assert!(error.is_not_found());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    /// No file or directory exists at the path.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found
        path: String,
    },

    /// The path exists but denotes a file where a directory was required.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory
        path: String,
    },

    /// The path is malformed, or the operation would violate a tree
    /// invariant (directory collision, file used as a directory).
    #[error("invalid path: {path}")]
    InvalidPath {
        /// The invalid path
        path: String,
    },

    /// The path is not absolute (must start with '/').
    #[error("path must be absolute: {path}")]
    PathNotAbsolute {
        /// The relative path
        path: String,
    },

    /// The destination of a rename already exists.
    #[error("destination already exists: {path}")]
    Conflict {
        /// The occupied destination path
        path: String,
    },

    /// The operation is not permitted regardless of tree state, such as
    /// deleting the root directory.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of the rejected operation
        message: String,
    },
}

impl VfsError {
    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a not-a-directory error.
    #[must_use]
    pub const fn is_not_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` if this is an invalid-path error.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::VfsError;
    ///
    /// let error = VfsError::PathNotAbsolute { path: "relative".to_string() };
    /// assert!(error.is_invalid_path());
    /// ```
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. } | Self::PathNotAbsolute { .. })
    }

    /// Returns `true` if this is a destination-conflict error.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns `true` if this is an invalid-operation error.
    #[must_use]
    pub const fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }
}

/// A validated, canonical virtual filesystem path.
///
/// `VfsPath` enforces Unix-style conventions on every platform:
///
/// - absolute (leading '/');
/// - forward-slash separators;
/// - no `.` or `..` components;
/// - no repeated or trailing separators (root excepted).
///
/// Two `VfsPath` values compare equal exactly when they name the same node,
/// which makes the type safe to use as an ordered map key.
///
/// # Examples
///
/// ```
/// use preview_vfs::VfsPath;
///
/// let path = VfsPath::new("/components//Counter.jsx").unwrap();
/// assert_eq!(path.as_str(), "/components/Counter.jsx");
///
/// assert!(VfsPath::new("relative/path").is_err());
/// assert!(VfsPath::new("/a/../b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VfsPath(String);

impl VfsPath {
    /// Creates a new `VfsPath`, validating and canonicalizing the input.
    ///
    /// Repeated and trailing separators are collapsed. `.` and `..`
    /// components are rejected rather than resolved: callers that need
    /// relative resolution go through [`crate::path::resolve_relative`]
    /// first, so a `..` reaching this constructor is a malformed key.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::PathNotAbsolute` if the path does not start with
    /// '/', and `VfsError::InvalidPath` if it is empty or contains `.`/`..`
    /// components.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::VfsPath;
    ///
    /// let path = VfsPath::new("/App.jsx")?;
    /// assert_eq!(path.as_str(), "/App.jsx");
    /// # Ok::<(), preview_vfs::VfsError>(())
    /// ```
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let raw = path.as_ref();

        if raw.is_empty() {
            return Err(VfsError::InvalidPath {
                path: String::new(),
            });
        }
        if !raw.starts_with('/') {
            return Err(VfsError::PathNotAbsolute {
                path: raw.to_string(),
            });
        }
        if raw.split('/').any(|seg| seg == "." || seg == "..") {
            return Err(VfsError::InvalidPath {
                path: raw.to_string(),
            });
        }

        // Only separator collapsing remains after the checks above.
        let normalized = path::normalize(raw).ok_or_else(|| VfsError::InvalidPath {
            path: raw.to_string(),
        })?;

        Ok(Self(normalized))
    }

    /// Returns the root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the parent directory, or `None` for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::VfsPath;
    ///
    /// let path = VfsPath::new("/components/Counter.jsx")?;
    /// assert_eq!(path.parent().unwrap().as_str(), "/components");
    /// assert!(VfsPath::root().parent().is_none());
    /// # Ok::<(), preview_vfs::VfsError>(())
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        path::parent(&self.0).map(|p| Self(p.to_string()))
    }

    /// Returns the final component of the path.
    #[must_use]
    pub fn file_name(&self) -> &str {
        path::file_name(&self.0)
    }

    /// Returns `true` if `self` lies strictly inside the directory `dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::VfsPath;
    ///
    /// let file = VfsPath::new("/components/Counter.jsx")?;
    /// let dir = VfsPath::new("/components")?;
    /// assert!(file.is_inside(&dir));
    /// assert!(file.is_inside(&VfsPath::root()));
    /// assert!(!dir.is_inside(&dir));
    /// # Ok::<(), preview_vfs::VfsError>(())
    /// ```
    #[must_use]
    pub fn is_inside(&self, dir: &Self) -> bool {
        if dir.is_root() {
            return !self.is_root();
        }
        self.0.len() > dir.0.len()
            && self.0.starts_with(&dir.0)
            && self.0.as_bytes()[dir.0.len()] == b'/'
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VfsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Language hint for a file, inferred from its extension.
///
/// The hint travels with the file so the transformer and any host surface can
/// pick handling without re-deriving it from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageHint {
    /// JavaScript with JSX markup (`.jsx`)
    Jsx,
    /// Plain JavaScript (`.js`, `.mjs`)
    Javascript,
    /// Stylesheet (`.css`)
    Css,
    /// JSON data (`.json`)
    Json,
    /// HTML document (`.html`)
    Html,
    /// Anything else
    Other,
}

impl LanguageHint {
    /// Infers the hint from a path's extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::LanguageHint;
    ///
    /// assert_eq!(LanguageHint::from_path("/App.jsx"), LanguageHint::Jsx);
    /// assert_eq!(LanguageHint::from_path("/theme.css"), LanguageHint::Css);
    /// assert_eq!(LanguageHint::from_path("/README"), LanguageHint::Other);
    /// ```
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        match path::extension(path) {
            Some("jsx") => Self::Jsx,
            Some("js" | "mjs") => Self::Javascript,
            Some("css") => Self::Css,
            Some("json") => Self::Json,
            Some("html") => Self::Html,
            _ => Self::Other,
        }
    }
}

/// A file in the virtual filesystem: content plus a language hint.
///
/// # Examples
///
/// ```
/// use preview_vfs::VfsFile;
///
/// let file = VfsFile::new("body { margin: 0 }");
/// assert_eq!(file.content(), "body { margin: 0 }");
/// assert_eq!(file.size(), 18);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsFile {
    content: String,
    language: LanguageHint,
}

impl VfsFile {
    /// Creates a file with no language hint.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language: LanguageHint::Other,
        }
    }

    /// Creates a file, inferring the language hint from the path.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::{LanguageHint, VfsFile};
    ///
    /// let file = VfsFile::for_path("/App.jsx", "export default () => null;");
    /// assert_eq!(file.language(), LanguageHint::Jsx);
    /// ```
    #[must_use]
    pub fn for_path(path: &str, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language: LanguageHint::from_path(path),
        }
    }

    /// Returns the file content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the file content, keeping the language hint.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Returns the language hint.
    #[must_use]
    pub const fn language(&self) -> LanguageHint {
        self.language
    }

    /// Returns the content size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.content.len()
    }
}

/// Result type alias for VFS operations.
pub type Result<T> = std::result::Result<T, VfsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_new_valid() {
        let path = VfsPath::new("/components/Counter.jsx").unwrap();
        assert_eq!(path.as_str(), "/components/Counter.jsx");
    }

    #[test]
    fn test_path_new_collapses_separators() {
        let path = VfsPath::new("/a//b///c/").unwrap();
        assert_eq!(path.as_str(), "/a/b/c");
    }

    #[test]
    fn test_path_new_relative_fails() {
        let result = VfsPath::new("relative/path");
        assert!(result.unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_path_new_dot_components_fail() {
        assert!(VfsPath::new("/a/./b").unwrap_err().is_invalid_path());
        assert!(VfsPath::new("/a/../b").unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_path_new_empty_fails() {
        assert!(VfsPath::new("").is_err());
    }

    #[test]
    fn test_path_root() {
        let root = VfsPath::root();
        assert!(root.is_root());
        assert!(root.parent().is_none());
        assert_eq!(VfsPath::new("/").unwrap(), root);
    }

    #[test]
    fn test_path_parent_chain() {
        let path = VfsPath::new("/a/b/c").unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.as_str(), "/a/b");
        assert_eq!(parent.parent().unwrap().as_str(), "/a");
        assert_eq!(parent.parent().unwrap().parent().unwrap().as_str(), "/");
    }

    #[test]
    fn test_path_is_inside() {
        let file = VfsPath::new("/components/ui/Button.jsx").unwrap();
        let dir = VfsPath::new("/components").unwrap();
        let sibling = VfsPath::new("/components-extra").unwrap();

        assert!(file.is_inside(&dir));
        assert!(!sibling.is_inside(&dir));
        assert!(!dir.is_inside(&file));
    }

    #[test]
    fn test_path_ordering() {
        let a = VfsPath::new("/a.jsx").unwrap();
        let b = VfsPath::new("/b.jsx").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_path_display() {
        let path = VfsPath::new("/App.jsx").unwrap();
        assert_eq!(format!("{path}"), "/App.jsx");
    }

    #[test]
    fn test_language_hint_inference() {
        assert_eq!(LanguageHint::from_path("/a.jsx"), LanguageHint::Jsx);
        assert_eq!(LanguageHint::from_path("/a.js"), LanguageHint::Javascript);
        assert_eq!(LanguageHint::from_path("/a.mjs"), LanguageHint::Javascript);
        assert_eq!(LanguageHint::from_path("/a.css"), LanguageHint::Css);
        assert_eq!(LanguageHint::from_path("/a.json"), LanguageHint::Json);
        assert_eq!(LanguageHint::from_path("/a.html"), LanguageHint::Html);
        assert_eq!(LanguageHint::from_path("/a"), LanguageHint::Other);
    }

    #[test]
    fn test_file_for_path() {
        let file = VfsFile::for_path("/theme.css", ":root {}");
        assert_eq!(file.language(), LanguageHint::Css);
        assert_eq!(file.content(), ":root {}");
    }

    #[test]
    fn test_file_set_content_keeps_language() {
        let mut file = VfsFile::for_path("/App.jsx", "old");
        file.set_content("new");
        assert_eq!(file.content(), "new");
        assert_eq!(file.language(), LanguageHint::Jsx);
    }

    #[test]
    fn test_error_classifiers() {
        let not_found = VfsError::NotFound {
            path: "/x".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());

        let conflict = VfsError::Conflict {
            path: "/x".to_string(),
        };
        assert!(conflict.is_conflict());

        let invalid_op = VfsError::InvalidOperation {
            message: "cannot delete the root directory".to_string(),
        };
        assert!(invalid_op.is_invalid_operation());
        assert!(!invalid_op.is_invalid_path());
    }

    #[test]
    fn test_error_display() {
        let err = VfsError::NotFound {
            path: "/missing.jsx".to_string(),
        };
        assert_eq!(format!("{err}"), "not found: /missing.jsx");
    }
}
