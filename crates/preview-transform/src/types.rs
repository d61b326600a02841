//! Output types for the module transformer.
//!
//! A transform pass produces one [`TransformOutput`]; the only terminal
//! failure is a missing entry point. Everything here serializes with serde so
//! a hosting surface can ship the result to the preview iframe as JSON.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Terminal transformer errors.
///
/// Per-module problems (syntax errors, unresolved imports) are *not* errors
/// at this level — they degrade into diagnostics and stub modules so a
/// partially broken project stays previewable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The entry specifier did not resolve to any file in the snapshot.
    /// Without an entry point no partial preview is possible.
    #[error("entry module not found: {specifier}")]
    EntryNotFound {
        /// The configured entry specifier
        specifier: String,
    },
}

impl TransformError {
    /// Returns `true` if this is an entry-not-found error.
    #[must_use]
    pub const fn is_entry_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound { .. })
    }
}

/// Result type alias for transform passes.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Import map from module specifier to loadable address.
///
/// Serializes to the standard `{"imports": {...}}` shape the browser's
/// module loader accepts.
///
/// # Examples
///
/// ```
/// use preview_transform::ImportMap;
///
/// let mut map = ImportMap::new();
/// map.insert("react", "https://esm.sh/react");
/// assert_eq!(map.get("react"), Some("https://esm.sh/react"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportMap {
    imports: BTreeMap<String, String>,
}

impl ImportMap {
    /// Creates an empty import map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a specifier to an address, replacing any previous mapping.
    pub fn insert(&mut self, specifier: impl Into<String>, address: impl Into<String>) {
        self.imports.insert(specifier.into(), address.into());
    }

    /// Looks up the address for a specifier.
    #[must_use]
    pub fn get(&self, specifier: &str) -> Option<&str> {
        self.imports.get(specifier).map(String::as_str)
    }

    /// Returns the number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// Returns `true` when the map holds no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Iterates mappings in specifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.imports
            .iter()
            .map(|(specifier, address)| (specifier.as_str(), address.as_str()))
    }
}

/// A per-module syntax problem, surfaced without blocking the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Path of the module the problem was found in
    pub path: String,
    /// Human-readable description
    pub message: String,
    /// 1-based line of the problem, when known
    pub line: Option<usize>,
    /// 1-based column of the problem, when known
    pub column: Option<usize>,
}

/// A local import that matched nothing in the snapshot.
///
/// The corresponding module address points at a placeholder that throws at
/// evaluation time, so the failure surfaces exactly where the import is
/// executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedImport {
    /// The specifier as written in the source
    pub specifier: String,
    /// Path of the importing module
    pub importer: String,
    /// 1-based line of the import statement
    pub line: usize,
}

/// One browser-loadable module body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSource {
    /// VFS path the module was transformed from; `None` for synthetic
    /// placeholder and error-stub modules
    pub source_path: Option<String>,
    /// Executable module code with rewritten import specifiers
    pub code: String,
}

/// The complete result of one transform pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    /// Address of the entry module
    pub entry_address: String,
    /// Specifier → address map for the preview host
    pub import_map: ImportMap,
    /// Module bodies keyed by their synthetic address
    pub modules: BTreeMap<String, ModuleSource>,
    /// Aggregated inline style text from imported stylesheets
    pub styles: String,
    /// Per-module syntax errors; never terminal
    pub diagnostics: Vec<Diagnostic>,
    /// Local imports that resolved to nothing
    pub unresolved: Vec<UnresolvedImport>,
}

impl TransformOutput {
    /// Returns all module addresses in sorted order.
    #[must_use]
    pub fn module_addresses(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }
}
