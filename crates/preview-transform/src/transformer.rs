//! The module transform pass.
//!
//! Walks the static import graph from the entry file, rewrites every import
//! specifier to the synthetic address of its resolved target, and emits the
//! import map plus the module bodies a preview host loads. The pass is a
//! pure function of the snapshot and configuration: it never mutates the VFS
//! and two passes over identical input produce identical output.

use crate::config::TransformConfig;
use crate::resolver::{self, Resolution};
use crate::scanner::{self, ScanError};
use crate::types::{
    Diagnostic, ImportMap, ModuleSource, Result, TransformError, TransformOutput,
    UnresolvedImport,
};
use preview_vfs::{path, Vfs, VfsPath};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::ops::Range;
use tracing::{debug, info};

/// Runs one transform pass over a snapshot.
///
/// # Errors
///
/// Returns [`TransformError::EntryNotFound`] when the configured entry
/// specifier matches nothing — the only failure that aborts a pass.
/// Per-module syntax errors and unresolved imports degrade into stub
/// modules and are reported in the output instead.
///
/// # Examples
///
/// ```
/// use preview_transform::{transform, TransformConfig};
/// use preview_vfs::VfsBuilder;
///
/// let vfs = VfsBuilder::new()
///     .add_file("/App.jsx", "import Counter from './Counter';\nexport default Counter;\n")
///     .add_file("/Counter.jsx", "export default function Counter() { return 0; }\n")
///     .build()
///     .unwrap();
///
/// let output = transform(&vfs, &TransformConfig::default()).unwrap();
/// assert_eq!(output.modules.len(), 2);
/// assert!(output.diagnostics.is_empty());
/// ```
pub fn transform(vfs: &Vfs, config: &TransformConfig) -> Result<TransformOutput> {
    let entry =
        resolver::resolve_entry(vfs, config).ok_or_else(|| TransformError::EntryNotFound {
            specifier: config.entry().to_string(),
        })?;

    let mut pass = Pass {
        vfs,
        config,
        addresses: BTreeMap::new(),
        modules: BTreeMap::new(),
        import_map: ImportMap::new(),
        diagnostics: Vec::new(),
        unresolved: Vec::new(),
        styles: Vec::new(),
        styles_seen: HashSet::new(),
        queue: VecDeque::new(),
    };

    let entry_address = pass.admit(&entry);
    while let Some(module_path) = pass.queue.pop_front() {
        pass.process(&module_path);
    }

    info!(
        modules = pass.modules.len(),
        diagnostics = pass.diagnostics.len(),
        unresolved = pass.unresolved.len(),
        "transform pass complete"
    );

    Ok(TransformOutput {
        entry_address,
        import_map: pass.import_map,
        modules: pass.modules,
        styles: pass.styles.join("\n"),
        diagnostics: pass.diagnostics,
        unresolved: pass.unresolved,
    })
}

/// Working state of one pass.
struct Pass<'a> {
    vfs: &'a Vfs,
    config: &'a TransformConfig,
    /// Resolved path → synthetic address. Doubles as the visited set: a path
    /// present here is admitted, so cycles terminate without revisiting.
    addresses: BTreeMap<VfsPath, String>,
    modules: BTreeMap<String, ModuleSource>,
    import_map: ImportMap,
    diagnostics: Vec<Diagnostic>,
    unresolved: Vec<UnresolvedImport>,
    styles: Vec<String>,
    styles_seen: HashSet<VfsPath>,
    queue: VecDeque<VfsPath>,
}

impl Pass<'_> {
    /// Registers a module for processing and returns its address.
    ///
    /// The address is assigned *before* the module's imports are walked,
    /// which is what makes cyclic graphs terminate: by the time a cycle
    /// closes, every participant is already admitted.
    fn admit(&mut self, target: &VfsPath) -> String {
        if let Some(address) = self.addresses.get(target) {
            return address.clone();
        }

        let content = self
            .vfs
            .get_file(target)
            .map(preview_vfs::VfsFile::content)
            .unwrap_or_default();
        let address = module_address(target, content);

        self.addresses.insert(target.clone(), address.clone());
        self.import_map.insert(target.as_str(), address.clone());
        self.import_map.insert(
            format!("{}{}", self.config.alias_prefix(), &target.as_str()[1..]),
            address.clone(),
        );
        self.queue.push_back(target.clone());
        address
    }

    /// Scans, resolves, and rewrites one admitted module.
    fn process(&mut self, module_path: &VfsPath) {
        let Some(address) = self.addresses.get(module_path).cloned() else {
            return;
        };
        let Some(file) = self.vfs.get_file(module_path) else {
            return;
        };
        let source = file.content().to_string();

        let scanned = match scanner::scan(&source) {
            Ok(scanned) => scanned,
            Err(error) => {
                self.reject(module_path, address, &error);
                return;
            }
        };

        let mut edits: Vec<(Range<usize>, String)> = Vec::new();
        for import in &scanned.imports {
            match resolver::resolve_specifier(self.vfs, module_path, &import.specifier, self.config)
            {
                Resolution::Module(target) => {
                    let target_address = self.admit(&target);
                    edits.push((import.spec_span.clone(), target_address));
                }
                Resolution::Stylesheet(target) => {
                    if self.styles_seen.insert(target.clone()) {
                        if let Some(sheet) = self.vfs.get_file(&target) {
                            self.styles
                                .push(format!("/* {} */\n{}", target.as_str(), sheet.content()));
                        }
                    }
                    // Drop the whole statement; styles load via the host.
                    let end = extend_through_semicolon(&source, import.stmt_span.end);
                    edits.push((import.stmt_span.start..end, String::new()));
                }
                Resolution::External(url) => {
                    self.import_map.insert(import.specifier.clone(), url.clone());
                    edits.push((import.spec_span.clone(), url));
                }
                Resolution::Unresolved => {
                    let placeholder = placeholder_address(&import.specifier, module_path);
                    self.modules
                        .entry(placeholder.clone())
                        .or_insert_with(|| ModuleSource {
                            source_path: None,
                            code: placeholder_code(&import.specifier, module_path),
                        });
                    self.unresolved.push(UnresolvedImport {
                        specifier: import.specifier.clone(),
                        importer: module_path.as_str().to_string(),
                        line: import.line,
                    });
                    edits.push((import.spec_span.clone(), placeholder));
                }
            }
        }

        let code = apply_edits(source, edits);
        debug!(path = %module_path, %address, "transformed module");
        self.modules.insert(
            address,
            ModuleSource {
                source_path: Some(module_path.as_str().to_string()),
                code,
            },
        );
    }

    /// Records a syntax diagnostic and substitutes an error-throwing stub so
    /// importers of this module still load.
    fn reject(&mut self, module_path: &VfsPath, address: String, error: &ScanError) {
        self.diagnostics.push(Diagnostic {
            path: module_path.as_str().to_string(),
            message: error.message.clone(),
            line: Some(error.line),
            column: Some(error.column),
        });
        let message = format!(
            "{}:{}:{}: {}",
            module_path.as_str(),
            error.line,
            error.column,
            error.message
        );
        self.modules.insert(
            address,
            ModuleSource {
                source_path: Some(module_path.as_str().to_string()),
                code: format!("throw new SyntaxError(\"{}\");\n", js_escape(&message)),
            },
        );
    }
}

/// Stable synthetic address for a source module.
///
/// Hashing path and content means an unchanged snapshot reproduces the exact
/// address set, and any content change busts the host's module cache.
fn module_address(module_path: &VfsPath, content: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(module_path.as_str().as_bytes());
    hasher.update(&[0]);
    hasher.update(content.as_bytes());
    let hex = hasher.finalize().to_hex();
    format!(
        "vfs://{}/{}.js",
        &hex.as_str()[..16],
        path::file_stem(module_path.as_str())
    )
}

/// Stable synthetic address for an unresolved-import placeholder.
fn placeholder_address(specifier: &str, importer: &VfsPath) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"unresolved");
    hasher.update(&[0]);
    hasher.update(importer.as_str().as_bytes());
    hasher.update(&[0]);
    hasher.update(specifier.as_bytes());
    let hex = hasher.finalize().to_hex();
    format!("vfs://{}/unresolved.js", &hex.as_str()[..16])
}

/// Module body that defers an unresolved import to evaluation time.
fn placeholder_code(specifier: &str, importer: &VfsPath) -> String {
    format!(
        "throw new Error(\"Module not found: '{}' (imported from {})\");\n",
        js_escape(specifier),
        importer.as_str()
    )
}

fn js_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Applies byte-range edits back to front so earlier spans stay valid.
fn apply_edits(source: String, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut code = source;
    for (range, replacement) in edits {
        code.replace_range(range, &replacement);
    }
    code
}

/// Extends a statement span over trailing whitespace and one semicolon.
fn extend_through_semicolon(source: &str, end: usize) -> usize {
    let bytes = source.as_bytes();
    let mut i = end;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b';' {
        i + 1
    } else {
        end
    }
}
