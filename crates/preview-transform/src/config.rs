//! Transformer configuration.

/// Configuration for one transform pass.
///
/// The defaults match the conventional project layout: entry component at
/// `/App`, the `@/` alias rewriting to the VFS root, and bare package
/// specifiers delegated to the esm.sh CDN.
///
/// # Examples
///
/// ```
/// use preview_transform::TransformConfig;
///
/// let config = TransformConfig::default()
///     .with_entry("/src/Main")
///     .with_alias_prefix("~/");
///
/// assert_eq!(config.entry(), "/src/Main");
/// assert_eq!(config.package_base_url(), "https://esm.sh/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    alias_prefix: String,
    entry: String,
    package_base_url: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            alias_prefix: "@/".to_string(),
            entry: "/App".to_string(),
            package_base_url: "https://esm.sh/".to_string(),
        }
    }
}

impl TransformConfig {
    /// Returns the alias prefix rewritten to the VFS root.
    #[must_use]
    pub fn alias_prefix(&self) -> &str {
        &self.alias_prefix
    }

    /// Returns the entry specifier.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Returns the base URL bare package specifiers are delegated to.
    #[must_use]
    pub fn package_base_url(&self) -> &str {
        &self.package_base_url
    }

    /// Replaces the alias prefix.
    #[must_use]
    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = prefix.into();
        self
    }

    /// Replaces the entry specifier.
    #[must_use]
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    /// Replaces the package base URL.
    #[must_use]
    pub fn with_package_base_url(mut self, url: impl Into<String>) -> Self {
        self.package_base_url = url.into();
        self
    }
}
