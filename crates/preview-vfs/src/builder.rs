//! Builder pattern for constructing virtual filesystems.
//!
//! Provides a fluent API for seeding a VFS with files before a session
//! starts, collecting path errors instead of failing mid-chain.
//!
//! # Examples
//!
//! ```
//! use preview_vfs::VfsBuilder;
//!
//! let vfs = VfsBuilder::new()
//!     .add_file("/App.jsx", "export default function App() {}")
//!     .add_file("/theme.css", ":root { color: black }")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(vfs.file_count(), 2);
//! ```

use crate::types::{Result, VfsError};
use crate::vfs::Vfs;

/// Builder for constructing a virtual filesystem.
///
/// Errors from individual `add_file` calls are collected and the first one is
/// returned from [`VfsBuilder::build`], so a chain never panics halfway.
///
/// # Examples
///
/// ```
/// use preview_vfs::VfsBuilder;
///
/// let result = VfsBuilder::new()
///     .add_file("/valid.jsx", "")
///     .add_file("not-absolute.jsx", "")
///     .build();
///
/// assert!(result.is_err());
/// ```
#[derive(Debug, Default)]
pub struct VfsBuilder {
    vfs: Vfs,
    errors: Vec<VfsError>,
}

impl VfsBuilder {
    /// Creates a new empty VFS builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vfs: Vfs::new(),
            errors: Vec::new(),
        }
    }

    /// Adds a file to the VFS being built.
    ///
    /// An invalid path is recorded and surfaced when `build()` is called.
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<str>, content: impl Into<String>) -> Self {
        if let Err(e) = self.vfs.create_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds multiple files to the VFS being built.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::VfsBuilder;
    ///
    /// let files = vec![
    ///     ("/App.jsx", "export default () => null;"),
    ///     ("/components/Counter.jsx", "export default () => 0;"),
    /// ];
    ///
    /// let vfs = VfsBuilder::new().add_files(files).build().unwrap();
    /// assert_eq!(vfs.file_count(), 2);
    /// ```
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<str>,
        C: Into<String>,
    {
        for (path, content) in files {
            if let Err(e) = self.vfs.create_file(path, content) {
                self.errors.push(e);
            }
        }
        self
    }

    /// Consumes the builder and returns the constructed VFS.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered during file addition, if any.
    pub fn build(self) -> Result<Vfs> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(self.vfs)
    }

    /// Returns the number of files currently in the builder.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.vfs.file_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_empty() {
        let vfs = VfsBuilder::new().build().unwrap();
        assert_eq!(vfs.file_count(), 0);
    }

    #[test]
    fn test_builder_chaining() {
        let vfs = VfsBuilder::new()
            .add_file("/a.jsx", "a")
            .add_file("/b.jsx", "b")
            .add_file("/c.jsx", "c")
            .build()
            .unwrap();
        assert_eq!(vfs.file_count(), 3);
    }

    #[test]
    fn test_builder_collects_errors() {
        let result = VfsBuilder::new()
            .add_file("/valid.jsx", "")
            .add_file("invalid", "")
            .add_file("/also-valid.jsx", "")
            .build();
        assert!(result.unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_builder_file_count() {
        let mut builder = VfsBuilder::new();
        assert_eq!(builder.file_count(), 0);
        builder = builder.add_file("/a.jsx", "");
        assert_eq!(builder.file_count(), 1);
    }
}
