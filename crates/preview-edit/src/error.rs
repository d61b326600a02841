//! Error types for the editing command layer.

use preview_vfs::VfsError;
use thiserror::Error;

/// Errors produced by editing commands.
///
/// Filesystem-level failures pass through as [`EditError::Vfs`]; the
/// remaining variants are specific to the editing operations. Every failure
/// leaves the filesystem unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Underlying filesystem failure (missing file, invalid path, ...).
    #[error(transparent)]
    Vfs(#[from] VfsError),

    /// The replacement target does not occur in the file.
    #[error("no match found for replacement text in {path}")]
    NoMatch {
        /// File that was searched
        path: String,
    },

    /// The replacement target occurs more than once, so the substitution
    /// would be ambiguous.
    #[error("replacement text occurs {count} times in {path}; it must occur exactly once")]
    AmbiguousMatch {
        /// File that was searched
        path: String,
        /// Number of occurrences found
        count: usize,
    },

    /// A line reference lies outside the file.
    #[error("line {line} is out of range for {path} ({max} lines)")]
    OutOfRange {
        /// File that was addressed
        path: String,
        /// The out-of-range line number
        line: usize,
        /// Number of lines in the file
        max: usize,
    },
}

impl EditError {
    /// Returns `true` if this is a no-match error.
    #[must_use]
    pub const fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }

    /// Returns `true` if this is an ambiguous-match error.
    #[must_use]
    pub const fn is_ambiguous_match(&self) -> bool {
        matches!(self, Self::AmbiguousMatch { .. })
    }

    /// Returns `true` if this is an out-of-range error.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Returns `true` if the underlying cause is a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Vfs(e) if e.is_not_found())
    }
}

/// Result type alias for editing commands.
pub type Result<T> = std::result::Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifiers() {
        let err = EditError::AmbiguousMatch {
            path: "/App.jsx".to_string(),
            count: 3,
        };
        assert!(err.is_ambiguous_match());
        assert!(!err.is_no_match());
        assert!(!err.is_not_found());

        let err = EditError::Vfs(VfsError::NotFound {
            path: "/x".to_string(),
        });
        assert!(err.is_not_found());
    }

    #[test]
    fn test_display() {
        let err = EditError::OutOfRange {
            path: "/App.jsx".to_string(),
            line: 12,
            max: 4,
        };
        assert_eq!(
            format!("{err}"),
            "line 12 is out of range for /App.jsx (4 lines)"
        );
    }
}
