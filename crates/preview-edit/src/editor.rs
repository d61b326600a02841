//! The editing command set the generation agent drives.
//!
//! Three operations — `view`, `str_replace`, `insert` — each addressing a
//! single file by absolute path. The agent only ever sees these commands
//! (plus direct create/rename/delete on the [`Vfs`] itself); it never holds
//! a structural reference into the tree.
//!
//! Every command mutates only on success: a failed call leaves the
//! filesystem exactly as it was.
//!
//! # Examples
//!
//! ```
//! use preview_edit::Editor;
//! use preview_vfs::Vfs;
//!
//! let mut vfs = Vfs::new();
//! vfs.create_file("/App.jsx", "const x = 1;\n").unwrap();
//!
//! let mut editor = Editor::new(&mut vfs);
//! editor.str_replace("/App.jsx", "x = 1", "x = 2").unwrap();
//! assert_eq!(vfs.read_file("/App.jsx").unwrap(), "const x = 2;\n");
//! ```

use crate::error::{EditError, Result};
use preview_vfs::{NodeKind, Vfs};

/// Session editor over a mutably borrowed [`Vfs`].
#[derive(Debug)]
pub struct Editor<'v> {
    vfs: &'v mut Vfs,
}

impl<'v> Editor<'v> {
    /// Creates an editor for one editing session.
    pub fn new(vfs: &'v mut Vfs) -> Self {
        Self { vfs }
    }

    /// Returns file content with 1-based line numbers, or — when the path
    /// denotes a directory — its immediate listing.
    ///
    /// `range` is an optional inclusive `(start, end)` pair of 1-based line
    /// numbers; the end is clamped to the last line. Ranges are ignored for
    /// directory listings.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` (via [`EditError::Vfs`]) when nothing exists at
    /// the path, and [`EditError::OutOfRange`] when the range start lies
    /// past the end of the file or the range is inverted.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_edit::Editor;
    /// use preview_vfs::Vfs;
    ///
    /// let mut vfs = Vfs::new();
    /// vfs.create_file("/App.jsx", "line one\nline two\n").unwrap();
    ///
    /// let editor = Editor::new(&mut vfs);
    /// let numbered = editor.view("/App.jsx", None).unwrap();
    /// assert_eq!(numbered, "    1\tline one\n    2\tline two");
    /// ```
    pub fn view(&self, path: &str, range: Option<(usize, usize)>) -> Result<String> {
        if self.vfs.is_dir(path) {
            let listing: Vec<String> = self
                .vfs
                .list(path)?
                .into_iter()
                .map(|entry| match entry.kind {
                    NodeKind::Directory => format!("{}/", entry.name),
                    NodeKind::File => entry.name,
                })
                .collect();
            return Ok(listing.join("\n"));
        }

        let content = self.vfs.read_file(path)?;
        let lines: Vec<&str> = content.lines().collect();

        let (start, end) = match range {
            None => (1, lines.len()),
            Some((start, end)) => {
                if start == 0 || start > lines.len() || end < start {
                    return Err(EditError::OutOfRange {
                        path: path.to_string(),
                        line: start,
                        max: lines.len(),
                    });
                }
                (start, end.min(lines.len()))
            }
        };

        let numbered: Vec<String> = lines[start - 1..end]
            .iter()
            .enumerate()
            .map(|(offset, line)| format!("{:>5}\t{line}", start + offset))
            .collect();
        Ok(numbered.join("\n"))
    }

    /// Replaces exactly one occurrence of `old` with `new` in the file.
    ///
    /// The occurrence must be unique: zero matches fail with
    /// [`EditError::NoMatch`], more than one with
    /// [`EditError::AmbiguousMatch`] — callers disambiguate by widening the
    /// match text. An empty `old` never matches.
    ///
    /// # Errors
    ///
    /// `NotFound` when the file is absent, `NoMatch`/`AmbiguousMatch` as
    /// above. The file is untouched on any failure.
    pub fn str_replace(&mut self, path: &str, old: &str, new: &str) -> Result<()> {
        let content = self.vfs.read_file(path)?;
        let count = if old.is_empty() {
            0
        } else {
            content.matches(old).count()
        };
        match count {
            0 => Err(EditError::NoMatch {
                path: path.to_string(),
            }),
            1 => {
                let updated = content.replacen(old, new, 1);
                self.vfs.update_file(path, updated)?;
                Ok(())
            }
            count => Err(EditError::AmbiguousMatch {
                path: path.to_string(),
                count,
            }),
        }
    }

    /// Splices `text` into the file as new line(s) after line `after_line`.
    ///
    /// `after_line` is 1-based; 0 inserts before the first line. Multi-line
    /// `text` is split and inserted as consecutive lines. A trailing newline
    /// in the original file is preserved.
    ///
    /// # Errors
    ///
    /// `NotFound` when the file is absent, [`EditError::OutOfRange`] when
    /// `after_line` exceeds the file's line count.
    ///
    /// # Examples
    ///
    /// ```
    /// use preview_edit::Editor;
    /// use preview_vfs::Vfs;
    ///
    /// let mut vfs = Vfs::new();
    /// vfs.create_file("/App.jsx", "first\nlast\n").unwrap();
    ///
    /// let mut editor = Editor::new(&mut vfs);
    /// editor.insert("/App.jsx", 1, "middle").unwrap();
    /// assert_eq!(vfs.read_file("/App.jsx").unwrap(), "first\nmiddle\nlast\n");
    /// ```
    pub fn insert(&mut self, path: &str, after_line: usize, text: &str) -> Result<()> {
        let content = self.vfs.read_file(path)?;
        let mut lines: Vec<&str> = content.lines().collect();

        if after_line > lines.len() {
            return Err(EditError::OutOfRange {
                path: path.to_string(),
                line: after_line,
                max: lines.len(),
            });
        }

        let keep_trailing_newline = content.ends_with('\n');
        lines.splice(after_line..after_line, text.lines());

        let mut updated = lines.join("\n");
        if keep_trailing_newline {
            updated.push('\n');
        }
        self.vfs.update_file(path, updated)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vfs_with(path: &str, content: &str) -> Vfs {
        let mut vfs = Vfs::new();
        vfs.create_file(path, content).unwrap();
        vfs
    }

    #[test]
    fn test_view_numbers_lines_from_one() {
        let mut vfs = vfs_with("/a.jsx", "alpha\nbeta\ngamma\n");
        let editor = Editor::new(&mut vfs);

        let out = editor.view("/a.jsx", None).unwrap();
        assert_eq!(out, "    1\talpha\n    2\tbeta\n    3\tgamma");
    }

    #[test]
    fn test_view_range_inclusive_and_clamped() {
        let mut vfs = vfs_with("/a.jsx", "one\ntwo\nthree\nfour\n");
        let editor = Editor::new(&mut vfs);

        let out = editor.view("/a.jsx", Some((2, 3))).unwrap();
        assert_eq!(out, "    2\ttwo\n    3\tthree");

        let clamped = editor.view("/a.jsx", Some((3, 99))).unwrap();
        assert_eq!(clamped, "    3\tthree\n    4\tfour");
    }

    #[test]
    fn test_view_range_out_of_bounds() {
        let mut vfs = vfs_with("/a.jsx", "one\ntwo\n");
        let editor = Editor::new(&mut vfs);

        assert!(editor.view("/a.jsx", Some((5, 6))).unwrap_err().is_out_of_range());
        assert!(editor.view("/a.jsx", Some((0, 1))).unwrap_err().is_out_of_range());
        assert!(editor.view("/a.jsx", Some((2, 1))).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_view_directory_lists_children() {
        let mut vfs = Vfs::new();
        vfs.create_file("/components/Counter.jsx", "").unwrap();
        vfs.create_file("/components/ui/Button.jsx", "").unwrap();
        let editor = Editor::new(&mut vfs);

        let out = editor.view("/components", None).unwrap();
        assert_eq!(out, "Counter.jsx\nui/");
    }

    #[test]
    fn test_view_missing_path() {
        let mut vfs = Vfs::new();
        let editor = Editor::new(&mut vfs);
        assert!(editor.view("/nope.jsx", None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_str_replace_unique_occurrence() {
        let mut vfs = vfs_with("/a.jsx", "let count = 0;\nlet total = 0;\n");
        let mut editor = Editor::new(&mut vfs);

        editor.str_replace("/a.jsx", "count = 0", "count = 10").unwrap();
        assert_eq!(
            vfs.read_file("/a.jsx").unwrap(),
            "let count = 10;\nlet total = 0;\n"
        );
    }

    #[test]
    fn test_str_replace_ambiguous_leaves_content_unchanged() {
        let original = "value;\nvalue;\n";
        let mut vfs = vfs_with("/a.jsx", original);
        let mut editor = Editor::new(&mut vfs);

        let err = editor.str_replace("/a.jsx", "value;", "other;").unwrap_err();
        assert!(matches!(
            err,
            EditError::AmbiguousMatch { count: 2, .. }
        ));
        assert_eq!(vfs.read_file("/a.jsx").unwrap(), original);
    }

    #[test]
    fn test_str_replace_no_match() {
        let mut vfs = vfs_with("/a.jsx", "content\n");
        let mut editor = Editor::new(&mut vfs);

        assert!(editor
            .str_replace("/a.jsx", "absent", "x")
            .unwrap_err()
            .is_no_match());
        assert_eq!(vfs.read_file("/a.jsx").unwrap(), "content\n");
    }

    #[test]
    fn test_str_replace_empty_needle_is_no_match() {
        let mut vfs = vfs_with("/a.jsx", "content\n");
        let mut editor = Editor::new(&mut vfs);
        assert!(editor.str_replace("/a.jsx", "", "x").unwrap_err().is_no_match());
    }

    #[test]
    fn test_str_replace_missing_file() {
        let mut vfs = Vfs::new();
        let mut editor = Editor::new(&mut vfs);
        assert!(editor
            .str_replace("/nope.jsx", "a", "b")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_insert_at_zero_prepends() {
        let mut vfs = vfs_with("/a.jsx", "body\n");
        let mut editor = Editor::new(&mut vfs);

        editor.insert("/a.jsx", 0, "header").unwrap();
        assert_eq!(vfs.read_file("/a.jsx").unwrap(), "header\nbody\n");
    }

    #[test]
    fn test_insert_after_last_line_appends() {
        let mut vfs = vfs_with("/a.jsx", "body\n");
        let mut editor = Editor::new(&mut vfs);

        editor.insert("/a.jsx", 1, "footer").unwrap();
        assert_eq!(vfs.read_file("/a.jsx").unwrap(), "body\nfooter\n");
    }

    #[test]
    fn test_insert_multiline_text() {
        let mut vfs = vfs_with("/a.jsx", "first\nlast\n");
        let mut editor = Editor::new(&mut vfs);

        editor.insert("/a.jsx", 1, "a\nb").unwrap();
        assert_eq!(vfs.read_file("/a.jsx").unwrap(), "first\na\nb\nlast\n");
    }

    #[test]
    fn test_insert_past_end_is_out_of_range() {
        let mut vfs = vfs_with("/a.jsx", "one\ntwo\n");
        let mut editor = Editor::new(&mut vfs);

        let err = editor.insert("/a.jsx", 3, "x").unwrap_err();
        assert!(matches!(err, EditError::OutOfRange { line: 3, max: 2, .. }));
        assert_eq!(vfs.read_file("/a.jsx").unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_insert_into_empty_file() {
        let mut vfs = vfs_with("/a.jsx", "");
        let mut editor = Editor::new(&mut vfs);

        editor.insert("/a.jsx", 0, "only line").unwrap();
        assert_eq!(vfs.read_file("/a.jsx").unwrap(), "only line");
    }

    #[test]
    fn test_insert_preserves_missing_trailing_newline() {
        let mut vfs = vfs_with("/a.jsx", "first\nlast");
        let mut editor = Editor::new(&mut vfs);

        editor.insert("/a.jsx", 2, "after").unwrap();
        assert_eq!(vfs.read_file("/a.jsx").unwrap(), "first\nlast\nafter");
    }
}
