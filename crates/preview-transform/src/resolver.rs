//! Import specifier resolution against a VFS snapshot.
//!
//! Resolution is an explicit, ordered, finite candidate chain — never a
//! dynamic probe — so the behavior is deterministic and testable on its own:
//! alias rewrite, then absolute lookup, then relative-to-importer, each
//! trying the literal path, the supported extensions, and finally the
//! directory-index convention. Anything that is not a local path delegates
//! to the configured package CDN.

use crate::config::TransformConfig;
use preview_vfs::{path, Vfs, VfsPath};

/// Source extensions in resolution priority order: the markup dialect wins
/// over plain script when a specifier has no extension.
pub const SOURCE_EXTENSIONS: [&str; 2] = ["jsx", "js"];

/// What a specifier resolved to.
///
/// Intentionally short-lived: it is the boundary between resolution (what a
/// specifier names) and emission (what code gets produced for it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A local source module in the snapshot
    Module(VfsPath),
    /// A local stylesheet; collected, never emitted as a module
    Stylesheet(VfsPath),
    /// A bare package specifier delegated to the CDN
    External(String),
    /// A local specifier that matched nothing
    Unresolved,
}

/// Resolves one import specifier against the snapshot.
///
/// # Examples
///
/// ```
/// use preview_transform::{resolver, TransformConfig};
/// use preview_vfs::{Vfs, VfsPath};
///
/// let mut vfs = Vfs::new();
/// vfs.create_file("/components/Counter.jsx", "").unwrap();
/// let importer = VfsPath::new("/App.jsx").unwrap();
/// let config = TransformConfig::default();
///
/// let resolved = resolver::resolve_specifier(&vfs, &importer, "./components/Counter", &config);
/// assert!(matches!(resolved, resolver::Resolution::Module(p) if p.as_str() == "/components/Counter.jsx"));
/// ```
#[must_use]
pub fn resolve_specifier(
    vfs: &Vfs,
    importer: &VfsPath,
    specifier: &str,
    config: &TransformConfig,
) -> Resolution {
    if let Some(rest) = specifier.strip_prefix(config.alias_prefix()) {
        return match path::join("/", rest) {
            Some(base) => lookup_local(vfs, &base),
            None => Resolution::Unresolved,
        };
    }
    if specifier.starts_with('/') {
        return match path::normalize(specifier) {
            Some(base) => lookup_local(vfs, &base),
            None => Resolution::Unresolved,
        };
    }
    if specifier.starts_with("./") || specifier.starts_with("../") {
        return match path::resolve_relative(importer.as_str(), specifier) {
            Some(base) => lookup_local(vfs, &base),
            None => Resolution::Unresolved,
        };
    }
    Resolution::External(format!("{}{specifier}", config.package_base_url()))
}

/// Resolves the configured entry specifier to its module path.
///
/// The entry tries the exact path and then each supported extension; it may
/// be written in aliased form. Returns `None` when nothing matches, which is
/// the one terminal failure of a transform pass.
#[must_use]
pub fn resolve_entry(vfs: &Vfs, config: &TransformConfig) -> Option<VfsPath> {
    let base = if let Some(rest) = config.entry().strip_prefix(config.alias_prefix()) {
        path::join("/", rest)?
    } else {
        path::normalize(config.entry())?
    };
    match lookup_local(vfs, &base) {
        Resolution::Module(path) => Some(path),
        _ => None,
    }
}

/// Ordered candidate chain for a local base path.
fn lookup_local(vfs: &Vfs, base: &str) -> Resolution {
    let mut candidates: Vec<String> = Vec::with_capacity(1 + SOURCE_EXTENSIONS.len() * 2);
    candidates.push(base.to_string());
    for ext in SOURCE_EXTENSIONS {
        candidates.push(format!("{base}.{ext}"));
    }
    for ext in SOURCE_EXTENSIONS {
        candidates.push(format!("{base}/index.{ext}"));
    }

    for candidate in candidates {
        let Ok(vfs_path) = VfsPath::new(&candidate) else {
            continue;
        };
        if vfs.exists(vfs_path.as_str()) {
            return if path::extension(vfs_path.as_str()) == Some("css") {
                Resolution::Stylesheet(vfs_path)
            } else {
                Resolution::Module(vfs_path)
            };
        }
    }
    Resolution::Unresolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn importer() -> VfsPath {
        VfsPath::new("/App.jsx").unwrap()
    }

    fn project() -> Vfs {
        let mut vfs = Vfs::new();
        vfs.create_file("/App.jsx", "").unwrap();
        vfs.create_file("/components/Counter.jsx", "").unwrap();
        vfs.create_file("/components/Badge.js", "").unwrap();
        vfs.create_file("/components/forms/index.jsx", "").unwrap();
        vfs.create_file("/theme.css", "").unwrap();
        vfs
    }

    #[test]
    fn test_relative_with_extension_inference() {
        let resolved = resolve_specifier(
            &project(),
            &importer(),
            "./components/Counter",
            &TransformConfig::default(),
        );
        assert!(matches!(
            resolved,
            Resolution::Module(p) if p.as_str() == "/components/Counter.jsx"
        ));
    }

    #[test]
    fn test_extension_priority_prefers_jsx() {
        let mut vfs = project();
        // Both Badge.jsx and Badge.js exist: the markup dialect wins.
        vfs.create_file("/components/Badge.jsx", "").unwrap();
        let resolved = resolve_specifier(
            &vfs,
            &importer(),
            "./components/Badge",
            &TransformConfig::default(),
        );
        assert!(matches!(
            resolved,
            Resolution::Module(p) if p.as_str() == "/components/Badge.jsx"
        ));
    }

    #[test]
    fn test_exact_path_wins_over_extension_guess() {
        let resolved = resolve_specifier(
            &project(),
            &importer(),
            "/components/Badge.js",
            &TransformConfig::default(),
        );
        assert!(matches!(
            resolved,
            Resolution::Module(p) if p.as_str() == "/components/Badge.js"
        ));
    }

    #[test]
    fn test_directory_resolves_to_index() {
        let resolved = resolve_specifier(
            &project(),
            &importer(),
            "./components/forms",
            &TransformConfig::default(),
        );
        assert!(matches!(
            resolved,
            Resolution::Module(p) if p.as_str() == "/components/forms/index.jsx"
        ));
    }

    #[test]
    fn test_alias_prefix_maps_to_root() {
        let resolved = resolve_specifier(
            &project(),
            &VfsPath::new("/components/Counter.jsx").unwrap(),
            "@/components/Counter",
            &TransformConfig::default(),
        );
        assert!(matches!(
            resolved,
            Resolution::Module(p) if p.as_str() == "/components/Counter.jsx"
        ));
    }

    #[test]
    fn test_stylesheet_resolution() {
        let resolved = resolve_specifier(
            &project(),
            &importer(),
            "./theme.css",
            &TransformConfig::default(),
        );
        assert!(matches!(
            resolved,
            Resolution::Stylesheet(p) if p.as_str() == "/theme.css"
        ));
    }

    #[test]
    fn test_bare_specifier_is_external() {
        let resolved = resolve_specifier(
            &project(),
            &importer(),
            "react-dom/client",
            &TransformConfig::default(),
        );
        assert_eq!(
            resolved,
            Resolution::External("https://esm.sh/react-dom/client".to_string())
        );
    }

    #[test]
    fn test_missing_local_is_unresolved() {
        let resolved = resolve_specifier(
            &project(),
            &importer(),
            "./Missing",
            &TransformConfig::default(),
        );
        assert_eq!(resolved, Resolution::Unresolved);
    }

    #[test]
    fn test_escape_above_root_is_unresolved() {
        let resolved = resolve_specifier(
            &project(),
            &importer(),
            "../../outside",
            &TransformConfig::default(),
        );
        assert_eq!(resolved, Resolution::Unresolved);
    }

    #[test]
    fn test_resolve_entry_default() {
        let entry = resolve_entry(&project(), &TransformConfig::default()).unwrap();
        assert_eq!(entry.as_str(), "/App.jsx");
    }

    #[test]
    fn test_resolve_entry_aliased() {
        let config = TransformConfig::default().with_entry("@/components/Counter");
        let entry = resolve_entry(&project(), &config).unwrap();
        assert_eq!(entry.as_str(), "/components/Counter.jsx");
    }

    #[test]
    fn test_resolve_entry_missing() {
        let config = TransformConfig::default().with_entry("/Nowhere");
        assert!(resolve_entry(&project(), &config).is_none());
    }
}
