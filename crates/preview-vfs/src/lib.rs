//! In-memory virtual file system for component preview sessions.
//!
//! Models a hierarchical file tree entirely in memory: files live in a flat
//! ordered arena keyed by canonical absolute path, directories are implied by
//! the path structure, and the whole tree (de)serializes as a flat
//! path → content mapping.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod path;
pub mod types;
pub mod vfs;

pub use builder::VfsBuilder;
pub use types::{LanguageHint, Result, VfsError, VfsFile, VfsPath};
pub use vfs::{DirEntry, NodeKind, Vfs};
