//! Virtual filesystem implementation.
//!
//! An in-memory, session-scoped file tree. Files live in a flat ordered map
//! keyed by canonical absolute path; directories are implied by the path
//! structure and never stored, so renaming a subtree is a prefix rewrite over
//! the map rather than pointer surgery.
//!
//! A `Vfs` is an owned value threaded through the surrounding session — there
//! is no ambient instance, which is what keeps concurrent sessions isolated.
//!
//! # Examples
//!
//! ```
//! use preview_vfs::Vfs;
//!
//! let mut vfs = Vfs::new();
//! vfs.create_file("/components/Counter.jsx", "export default () => null;").unwrap();
//!
//! assert_eq!(vfs.read_file("/components/Counter.jsx").unwrap(), "export default () => null;");
//! assert!(vfs.is_dir("/components"));
//! ```

use crate::types::{Result, VfsError, VfsFile, VfsPath};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Whether a directory entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A file with content
    File,
    /// A directory implied by deeper paths
    Directory,
}

/// One immediate child of a directory, as returned by [`Vfs::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Basename of the entry
    pub name: String,
    /// Full path of the entry
    pub path: VfsPath,
    /// File or directory
    pub kind: NodeKind,
}

/// An in-memory virtual filesystem for component preview sessions.
///
/// All mutation goes through the methods here; the tree is never handed out
/// by structural reference, so the path invariants cannot be violated from
/// outside.
///
/// # Examples
///
/// ```
/// use preview_vfs::Vfs;
///
/// let mut vfs = Vfs::new();
/// vfs.create_file("/App.jsx", "export default function App() {}").unwrap();
///
/// assert!(vfs.exists("/App.jsx"));
/// assert_eq!(vfs.file_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vfs {
    files: BTreeMap<VfsPath, VfsFile>,
}

impl Vfs {
    /// Creates a new empty virtual filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Builds a filesystem from a flat path → content mapping.
    ///
    /// This is the inverse of [`Vfs::serialize`] and the only durable
    /// representation of project state. Validation is all-or-nothing: any
    /// malformed path or file/directory collision rejects the whole mapping.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::InvalidPath` on the first malformed or colliding
    /// path.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::Vfs;
    /// use std::collections::BTreeMap;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("/App.jsx".to_string(), "export default () => null;".to_string());
    ///
    /// let vfs = Vfs::from_map(map).unwrap();
    /// assert!(vfs.exists("/App.jsx"));
    /// ```
    pub fn from_map<P, C>(map: impl IntoIterator<Item = (P, C)>) -> Result<Self>
    where
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut vfs = Self::new();
        for (path, content) in map {
            vfs.create_file(path, content)?;
        }
        Ok(vfs)
    }

    /// Replaces the entire tree with a deserialized mapping.
    ///
    /// The replacement is atomic: on failure the prior tree is left intact.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::InvalidPath` on the first malformed or colliding
    /// path in the mapping.
    pub fn load<P, C>(&mut self, map: impl IntoIterator<Item = (P, C)>) -> Result<()>
    where
        P: AsRef<str>,
        C: Into<String>,
    {
        *self = Self::from_map(map)?;
        Ok(())
    }

    /// Creates a file, overwriting any existing file at the path.
    ///
    /// Missing ancestor directories spring into existence implicitly.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::PathNotAbsolute` or `VfsError::InvalidPath` if the
    /// path is malformed, if a directory already occupies the path, or if an
    /// ancestor of the path is a file.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::Vfs;
    ///
    /// let mut vfs = Vfs::new();
    /// vfs.create_file("/components/ui/Button.jsx", "export {}").unwrap();
    ///
    /// assert!(vfs.is_dir("/components"));
    /// assert!(vfs.is_dir("/components/ui"));
    /// # Ok::<(), preview_vfs::VfsError>(())
    /// ```
    pub fn create_file(&mut self, path: impl AsRef<str>, content: impl Into<String>) -> Result<()> {
        let path = VfsPath::new(path)?;
        if self.has_descendants(&path) {
            return Err(VfsError::InvalidPath {
                path: path.as_str().to_string(),
            });
        }
        if let Some(ancestor) = self.file_ancestor(&path) {
            return Err(VfsError::InvalidPath {
                path: ancestor.as_str().to_string(),
            });
        }
        let file = VfsFile::for_path(path.as_str(), content);
        self.files.insert(path, file);
        Ok(())
    }

    /// Reads the content of a file.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotFound` if the path is absent or denotes a
    /// directory.
    pub fn read_file(&self, path: impl AsRef<str>) -> Result<&str> {
        let path = VfsPath::new(path)?;
        self.files
            .get(&path)
            .map(VfsFile::content)
            .ok_or_else(|| VfsError::NotFound {
                path: path.as_str().to_string(),
            })
    }

    /// Returns the file node at a path, if one exists.
    #[must_use]
    pub fn get_file(&self, path: &VfsPath) -> Option<&VfsFile> {
        self.files.get(path)
    }

    /// Replaces the content of an existing file.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotFound` if no file exists at the path.
    pub fn update_file(&mut self, path: impl AsRef<str>, content: impl Into<String>) -> Result<()> {
        let path = VfsPath::new(path)?;
        match self.files.get_mut(&path) {
            Some(file) => {
                file.set_content(content);
                Ok(())
            }
            None => Err(VfsError::NotFound {
                path: path.as_str().to_string(),
            }),
        }
    }

    /// Deletes a file, or a directory and all of its descendants.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::InvalidOperation` for the root directory and
    /// `VfsError::NotFound` if nothing exists at the path.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::Vfs;
    ///
    /// let mut vfs = Vfs::new();
    /// vfs.create_file("/components/A.jsx", "").unwrap();
    /// vfs.create_file("/components/B.jsx", "").unwrap();
    ///
    /// vfs.delete("/components").unwrap();
    /// assert_eq!(vfs.file_count(), 0);
    /// ```
    pub fn delete(&mut self, path: impl AsRef<str>) -> Result<()> {
        let path = VfsPath::new(path)?;
        if path.is_root() {
            return Err(VfsError::InvalidOperation {
                message: "cannot delete the root directory".to_string(),
            });
        }
        if self.files.remove(&path).is_some() {
            return Ok(());
        }
        let doomed: Vec<VfsPath> = self
            .files
            .keys()
            .filter(|key| key.is_inside(&path))
            .cloned()
            .collect();
        if doomed.is_empty() {
            return Err(VfsError::NotFound {
                path: path.as_str().to_string(),
            });
        }
        for key in doomed {
            self.files.remove(&key);
        }
        Ok(())
    }

    /// Renames (or moves) a file or directory.
    ///
    /// Renaming a directory rewrites the path of every descendant in one
    /// step; no partially renamed subtree is ever observable. A rename whose
    /// destination parent differs is a move — there is no separate move
    /// operation.
    ///
    /// # Errors
    ///
    /// - `VfsError::NotFound` if the source does not exist.
    /// - `VfsError::Conflict` if the destination exists and `overwrite` is
    ///   false.
    /// - `VfsError::InvalidOperation` when renaming the root or moving a
    ///   directory into its own subtree.
    /// - `VfsError::InvalidPath` if an ancestor of the destination is a file.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::Vfs;
    ///
    /// let mut vfs = Vfs::new();
    /// vfs.create_file("/components/A.jsx", "a").unwrap();
    ///
    /// vfs.rename("/components/A.jsx", "/components/B.jsx", false).unwrap();
    /// assert!(vfs.exists("/components/B.jsx"));
    /// assert!(!vfs.exists("/components/A.jsx"));
    /// ```
    pub fn rename(
        &mut self,
        old: impl AsRef<str>,
        new: impl AsRef<str>,
        overwrite: bool,
    ) -> Result<()> {
        let old = VfsPath::new(old)?;
        let new = VfsPath::new(new)?;

        if old.is_root() || new.is_root() {
            return Err(VfsError::InvalidOperation {
                message: "cannot rename the root directory".to_string(),
            });
        }
        if old == new {
            return Ok(());
        }

        let source_is_file = self.files.contains_key(&old);
        let source_is_dir = !source_is_file && self.has_descendants(&old);
        if !source_is_file && !source_is_dir {
            return Err(VfsError::NotFound {
                path: old.as_str().to_string(),
            });
        }
        if source_is_dir && new.is_inside(&old) {
            return Err(VfsError::InvalidOperation {
                message: format!(
                    "cannot move {} into its own subtree at {}",
                    old.as_str(),
                    new.as_str()
                ),
            });
        }
        // The destination would be deleted out from under the source.
        if old.is_inside(&new) {
            return Err(VfsError::InvalidOperation {
                message: format!(
                    "cannot replace {} with its own descendant {}",
                    new.as_str(),
                    old.as_str()
                ),
            });
        }

        let dest_occupied = self.files.contains_key(&new) || self.has_descendants(&new);
        if dest_occupied && !overwrite {
            return Err(VfsError::Conflict {
                path: new.as_str().to_string(),
            });
        }
        if let Some(ancestor) = self.file_ancestor(&new) {
            return Err(VfsError::InvalidPath {
                path: ancestor.as_str().to_string(),
            });
        }

        // Compute the full relocation before touching the map.
        let moved: Vec<(VfsPath, VfsPath)> = if source_is_file {
            vec![(old.clone(), new.clone())]
        } else {
            let prefix_len = old.as_str().len();
            self.files
                .keys()
                .filter(|key| key.is_inside(&old))
                .map(|key| {
                    let suffix = &key.as_str()[prefix_len..];
                    let target = VfsPath::new(format!("{}{suffix}", new.as_str()))?;
                    Ok((key.clone(), target))
                })
                .collect::<Result<_>>()?
        };

        if dest_occupied {
            self.delete(new.as_str())?;
        }
        for (from, to) in moved {
            if let Some(file) = self.files.remove(&from) {
                self.files.insert(to, file);
            }
        }
        Ok(())
    }

    /// Checks whether a file exists at the path.
    ///
    /// Returns `false` for directories and for invalid paths.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<str>) -> bool {
        VfsPath::new(path)
            .is_ok_and(|p| self.files.contains_key(&p))
    }

    /// Checks whether the path denotes a directory.
    ///
    /// A directory exists iff it is the root or a proper prefix of some
    /// file path.
    #[must_use]
    pub fn is_dir(&self, path: impl AsRef<str>) -> bool {
        VfsPath::new(path).is_ok_and(|p| p.is_root() || self.has_descendants(&p))
    }

    /// Lists the immediate children of a directory, sorted alphabetically by
    /// name. Files and directories interleave in that one ordering.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotADirectory` if the path denotes a file and
    /// `VfsError::NotFound` if nothing exists there. Listing the root of an
    /// empty tree succeeds with an empty vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_vfs::{NodeKind, Vfs};
    ///
    /// let mut vfs = Vfs::new();
    /// vfs.create_file("/App.jsx", "").unwrap();
    /// vfs.create_file("/components/Counter.jsx", "").unwrap();
    ///
    /// let entries = vfs.list("/").unwrap();
    /// assert_eq!(entries.len(), 2);
    /// assert_eq!(entries[0].name, "App.jsx");
    /// assert_eq!(entries[1].kind, NodeKind::Directory);
    /// ```
    pub fn list(&self, path: impl AsRef<str>) -> Result<Vec<DirEntry>> {
        let path = VfsPath::new(path)?;
        if self.files.contains_key(&path) {
            return Err(VfsError::NotADirectory {
                path: path.as_str().to_string(),
            });
        }
        if !path.is_root() && !self.has_descendants(&path) {
            return Err(VfsError::NotFound {
                path: path.as_str().to_string(),
            });
        }

        let prefix = if path.is_root() {
            "/".to_string()
        } else {
            format!("{}/", path.as_str())
        };

        let mut children: BTreeMap<String, NodeKind> = BTreeMap::new();
        for key in self.files.keys() {
            if let Some(rest) = key.as_str().strip_prefix(&prefix) {
                match rest.split_once('/') {
                    Some((dir, _)) => {
                        children.insert(dir.to_string(), NodeKind::Directory);
                    }
                    None => {
                        children.insert(rest.to_string(), NodeKind::File);
                    }
                }
            }
        }

        children
            .into_iter()
            .map(|(name, kind)| {
                let child = VfsPath::new(format!("{prefix}{name}"))?;
                Ok(DirEntry {
                    name,
                    path: child,
                    kind,
                })
            })
            .collect()
    }

    /// Serializes the tree to a flat path → content mapping.
    ///
    /// Directories are implicit from the nested paths. The output is
    /// deterministic for identical tree state, so
    /// serialize → [`Vfs::from_map`] → serialize round-trips byte-identically.
    #[must_use]
    pub fn serialize(&self) -> BTreeMap<String, String> {
        self.files
            .iter()
            .map(|(path, file)| (path.as_str().to_string(), file.content().to_string()))
            .collect()
    }

    /// Returns the number of files in the tree.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns all file paths in sorted order.
    #[must_use]
    pub fn all_paths(&self) -> Vec<&VfsPath> {
        self.files.keys().collect()
    }

    /// Removes every file from the tree.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// True when at least one file lies strictly inside `dir`.
    fn has_descendants(&self, dir: &VfsPath) -> bool {
        self.files.keys().any(|key| key.is_inside(dir))
    }

    /// Finds the closest proper ancestor of `path` that is a file, if any.
    fn file_ancestor(&self, path: &VfsPath) -> Option<VfsPath> {
        let mut current = path.parent();
        while let Some(ancestor) = current {
            if self.files.contains_key(&ancestor) {
                return Some(ancestor);
            }
            current = ancestor.parent();
        }
        None
    }
}

impl Serialize for Vfs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len()))?;
        for (path, file) in &self.files {
            map.serialize_entry(path.as_str(), file.content())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Vfs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = BTreeMap::<String, String>::deserialize(deserializer)?;
        Self::from_map(map).map_err(serde::de::Error::custom)
    }
}
