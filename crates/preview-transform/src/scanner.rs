//! Lightweight import scanner.
//!
//! Parses component source just enough to enumerate static import/export
//! specifiers — never to understand semantics. The pass is deliberately
//! tolerant of the JSX dialect: a comment/string mask built by a small state
//! machine keeps the regexes out of literals, and anything the patterns do
//! not recognize is simply ignored. Unterminated comments, strings, and
//! template literals are the only syntax errors this layer reports.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// One static import found in a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    /// The specifier text as written, without quotes
    pub specifier: String,
    /// Byte span of the specifier text inside the source
    pub spec_span: Range<usize>,
    /// Byte span of the whole import/export statement match
    pub stmt_span: Range<usize>,
    /// 1-based line of the statement
    pub line: usize,
    /// 1-based column of the statement
    pub column: usize,
}

/// Scan result: every static import in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedModule {
    /// Imports in order of appearance
    pub imports: Vec<ImportRef>,
}

/// A syntax problem that prevented scanning a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    /// Human-readable description
    pub message: String,
    /// 1-based line where the offending construct opened
    pub line: usize,
    /// 1-based column where the offending construct opened
    pub column: usize,
}

/// `import`/`export … from` statements. The clause between the keyword and
/// `from` is restricted to binding syntax so an unrelated `export const`
/// ahead of an import cannot swallow it.
static FROM_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:import|export)\b[\w\s{},*$]*?\bfrom\s*["']([^"'\n]+)["']"#)
        .expect("valid regex")
});

/// Side-effect imports: `import './theme.css'`.
static SIDE_EFFECT_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bimport\s*["']([^"'\n]+)["']"#).expect("valid regex"));

/// Scans a module source for static imports.
///
/// # Errors
///
/// Returns a [`ScanError`] with the opening position when the source contains
/// an unterminated block comment, string literal, or template literal.
///
/// # Examples
///
/// ```
/// use preview_transform::scanner::scan;
///
/// let module = scan("import Counter from './Counter';\n").unwrap();
/// assert_eq!(module.imports.len(), 1);
/// assert_eq!(module.imports[0].specifier, "./Counter");
/// ```
pub fn scan(source: &str) -> Result<ScannedModule, ScanError> {
    let mask = build_mask(source)?;
    let mut imports: Vec<ImportRef> = Vec::new();

    for caps in FROM_IMPORT_RE.captures_iter(source) {
        push_import(source, &mask, &caps, &mut imports);
    }
    for caps in SIDE_EFFECT_IMPORT_RE.captures_iter(source) {
        push_import(source, &mask, &caps, &mut imports);
    }

    imports.sort_by_key(|import| import.stmt_span.start);
    Ok(ScannedModule { imports })
}

fn push_import(
    source: &str,
    mask: &[bool],
    caps: &regex::Captures<'_>,
    imports: &mut Vec<ImportRef>,
) {
    let Some(whole) = caps.get(0) else { return };
    let Some(spec) = caps.get(1) else { return };

    // Matches opening inside comments or literals are not statements.
    if mask[whole.start()] {
        return;
    }
    // The two patterns never overlap on well-formed input; guard anyway.
    if imports.iter().any(|i| i.stmt_span.start == whole.start()) {
        return;
    }

    let (line, column) = position(source, whole.start());
    imports.push(ImportRef {
        specifier: spec.as_str().to_string(),
        spec_span: spec.range(),
        stmt_span: whole.range(),
        line,
        column,
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    LineComment,
    BlockComment,
    Single,
    Double,
    Template,
}

/// Marks every byte inside a comment, string, or template literal.
fn build_mask(source: &str) -> Result<Vec<bool>, ScanError> {
    let bytes = source.as_bytes();
    let mut mask = vec![false; bytes.len()];
    let mut state = Lex::Code;
    let mut opened_at = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let byte = bytes[i];
        match state {
            Lex::Code => {
                if byte == b'/' && bytes.get(i + 1) == Some(&b'/') {
                    state = Lex::LineComment;
                    opened_at = i;
                    mask[i] = true;
                    mask[i + 1] = true;
                    i += 2;
                    continue;
                }
                if byte == b'/' && bytes.get(i + 1) == Some(&b'*') {
                    state = Lex::BlockComment;
                    opened_at = i;
                    mask[i] = true;
                    mask[i + 1] = true;
                    i += 2;
                    continue;
                }
                match byte {
                    b'\'' => {
                        state = Lex::Single;
                        opened_at = i;
                        mask[i] = true;
                    }
                    b'"' => {
                        state = Lex::Double;
                        opened_at = i;
                        mask[i] = true;
                    }
                    b'`' => {
                        state = Lex::Template;
                        opened_at = i;
                        mask[i] = true;
                    }
                    _ => {}
                }
            }
            Lex::LineComment => {
                mask[i] = true;
                if byte == b'\n' {
                    state = Lex::Code;
                }
            }
            Lex::BlockComment => {
                mask[i] = true;
                if byte == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    mask[i + 1] = true;
                    state = Lex::Code;
                    i += 2;
                    continue;
                }
            }
            Lex::Single | Lex::Double => {
                mask[i] = true;
                if byte == b'\\' && i + 1 < bytes.len() {
                    mask[i + 1] = true;
                    i += 2;
                    continue;
                }
                let closer = if state == Lex::Single { b'\'' } else { b'"' };
                if byte == closer {
                    state = Lex::Code;
                } else if byte == b'\n' {
                    return Err(unterminated(source, opened_at, "string literal"));
                }
            }
            Lex::Template => {
                mask[i] = true;
                if byte == b'\\' && i + 1 < bytes.len() {
                    mask[i + 1] = true;
                    i += 2;
                    continue;
                }
                if byte == b'`' {
                    state = Lex::Code;
                }
            }
        }
        i += 1;
    }

    match state {
        Lex::Code | Lex::LineComment => Ok(mask),
        Lex::BlockComment => Err(unterminated(source, opened_at, "block comment")),
        Lex::Single | Lex::Double => Err(unterminated(source, opened_at, "string literal")),
        Lex::Template => Err(unterminated(source, opened_at, "template literal")),
    }
}

fn unterminated(source: &str, opened_at: usize, what: &str) -> ScanError {
    let (line, column) = position(source, opened_at);
    ScanError {
        message: format!("unterminated {what}"),
        line,
        column,
    }
}

/// 1-based line and column of a byte offset.
fn position(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = offset - before.rfind('\n').map_or(0, |p| p + 1) + 1;
    (line, column)
}
