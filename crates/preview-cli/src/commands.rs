//! Subcommand implementations.
//!
//! Each command loads a serialized project snapshot (the flat path → content
//! JSON mapping that is the durable form of a session), runs the requested
//! operation against an in-memory VFS, and returns the rendered output.

use anyhow::{bail, Context, Result};
use preview_edit::Editor;
use preview_transform::{transform, TransformConfig, TransformOutput};
use preview_vfs::{NodeKind, Vfs};
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Pretty,
    /// Machine-readable JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format: {other} (expected 'pretty' or 'json')"
            )),
        }
    }
}

fn load_project(path: &Path) -> Result<Vfs> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading project snapshot {}", path.display()))?;
    let vfs: Vfs = serde_json::from_str(&raw)
        .with_context(|| format!("parsing project snapshot {}", path.display()))?;
    debug!(files = vfs.file_count(), "loaded project snapshot");
    Ok(vfs)
}

/// Runs a transform pass over the snapshot and renders the result.
pub fn transform_project(
    project: &Path,
    entry: Option<String>,
    alias: Option<String>,
    package_base: Option<String>,
    format: OutputFormat,
) -> Result<String> {
    let vfs = load_project(project)?;

    let mut config = TransformConfig::default();
    if let Some(entry) = entry {
        config = config.with_entry(entry);
    }
    if let Some(alias) = alias {
        config = config.with_alias_prefix(alias);
    }
    if let Some(base) = package_base {
        config = config.with_package_base_url(base);
    }

    let output = transform(&vfs, &config).context("transform pass failed")?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
        OutputFormat::Pretty => Ok(render_pretty(&output)),
    }
}

fn render_pretty(output: &TransformOutput) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "entry    {}", output.entry_address);
    let _ = writeln!(text, "modules  {}", output.modules.len());

    let _ = writeln!(text, "\nimport map:");
    for (specifier, address) in output.import_map.iter() {
        let _ = writeln!(text, "  {specifier} -> {address}");
    }

    if !output.styles.is_empty() {
        let _ = writeln!(text, "\nstyles   {} bytes", output.styles.len());
    }
    if !output.diagnostics.is_empty() {
        let _ = writeln!(text, "\ndiagnostics:");
        for diagnostic in &output.diagnostics {
            let _ = writeln!(
                text,
                "  {}:{}:{}: {}",
                diagnostic.path,
                diagnostic.line.unwrap_or(0),
                diagnostic.column.unwrap_or(0),
                diagnostic.message
            );
        }
    }
    if !output.unresolved.is_empty() {
        let _ = writeln!(text, "\nunresolved imports:");
        for import in &output.unresolved {
            let _ = writeln!(
                text,
                "  '{}' imported from {}:{}",
                import.specifier, import.importer, import.line
            );
        }
    }
    text.trim_end().to_string()
}

/// Lists a directory of the snapshot, directories marked with a trailing `/`.
pub fn ls(project: &Path, path: Option<&str>) -> Result<String> {
    let vfs = load_project(project)?;
    let entries = vfs.list(path.unwrap_or("/"))?;
    let lines: Vec<String> = entries
        .into_iter()
        .map(|entry| match entry.kind {
            NodeKind::Directory => format!("{}/", entry.name),
            NodeKind::File => entry.name,
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Shows a file with line numbers, or a directory listing.
pub fn cat(project: &Path, path: &str, range: Option<&str>) -> Result<String> {
    let mut vfs = load_project(project)?;
    let range = range.map(parse_range).transpose()?;
    let editor = Editor::new(&mut vfs);
    Ok(editor.view(path, range)?)
}

fn parse_range(spec: &str) -> Result<(usize, usize)> {
    let Some((start, end)) = spec.split_once(':') else {
        bail!("range must be START:END, got '{spec}'");
    };
    let start = start.trim().parse().context("parsing range start")?;
    let end = end.trim().parse().context("parsing range end")?;
    Ok((start, end))
}
