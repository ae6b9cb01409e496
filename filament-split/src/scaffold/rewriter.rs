//! In-place rewrite of the generated resource file
//!
//! Method bodies are replaced through the spans recorded during extraction,
//! then the schema imports are added to the top-level `use` block.

use super::extractor::ExtractedBlock;
use std::fmt::Write;
use std::ops::Range;

/// A top-level `use` statement and where it sits in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStatement {
    /// Byte range covering the statement and its trailing newline
    pub range: Range<usize>,
    /// Statement text without surrounding whitespace
    pub text: String,
}

/// Collect the `use` statements that start at column zero
///
/// Group imports spanning several lines are collected up to their `;`.
/// Indented `use` lines (trait imports, closure captures) are ignored.
#[must_use]
pub fn top_level_uses(source: &str) -> Vec<UseStatement> {
    let mut statements = Vec::new();
    let mut offset = 0;
    let mut pending: Option<usize> = None;

    for line in source.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        if pending.is_none() && line.starts_with("use ") {
            pending = Some(start);
        }
        if let Some(begin) = pending {
            if line.trim_end().ends_with(';') {
                statements.push(UseStatement {
                    range: begin..offset,
                    text: source[begin..offset].trim().to_string(),
                });
                pending = None;
            }
        }
    }

    statements
}

/// Short class names a `use` statement brings into scope
///
/// `use A\B;` gives `B`, `use A\B as C;` gives `C` and a group import gives
/// one name per member. Function and constant imports give none.
#[must_use]
pub fn imported_names(statement: &str) -> Vec<String> {
    let Some(body) = statement.trim().strip_prefix("use ") else {
        return Vec::new();
    };
    let body = body.trim().trim_end_matches(';').trim_end();
    if body.starts_with("function ") || body.starts_with("const ") {
        return Vec::new();
    }

    let members = match (body.find('{'), body.rfind('}')) {
        (Some(open), Some(close)) if open < close => &body[open + 1..close],
        _ => body,
    };
    members.split(',').filter_map(short_name).collect()
}

fn short_name(member: &str) -> Option<String> {
    let member = member.trim();
    let name = member.split_once(" as ").map_or_else(
        || member.rsplit('\\').next().unwrap_or(member),
        |(_, alias)| alias.trim(),
    );
    (!name.is_empty()).then(|| name.to_string())
}

/// Replace every located body with its delegating body
///
/// Blocks without a span (fallbacks) are left alone.
#[must_use]
pub fn replace_bodies(source: &str, blocks: &[ExtractedBlock]) -> String {
    let mut located: Vec<_> = blocks
        .iter()
        .filter_map(|block| block.span.as_ref().map(|span| (block.method, span)))
        .collect();
    // Later spans first so earlier offsets stay valid
    located.sort_by_key(|(_, span)| std::cmp::Reverse(span.open_brace));

    let mut content = source.to_string();
    for (method, span) in located {
        content.replace_range(span.body_range(), &method.delegating_body(&span.indent));
    }
    content
}

/// Insert `imports` after the last top-level `use` statement
///
/// Statements already present are skipped. Without any `use` statement the
/// imports go after the `namespace` line, or after `<?php` when there is no
/// namespace either.
#[must_use]
pub fn insert_imports(source: &str, imports: &[String]) -> String {
    let existing = top_level_uses(source);
    let missing: Vec<&String> = imports
        .iter()
        .filter(|import| !existing.iter().any(|u| u.text == import.trim()))
        .collect();

    if missing.is_empty() {
        return source.to_string();
    }

    let block = missing.iter().fold(String::new(), |mut block, import| {
        let _ = writeln!(block, "{}", import.trim());
        block
    });

    let (position, insertion) = if let Some(last) = existing.last() {
        (last.range.end, block)
    } else if let Some(end) = line_end_after(source, "namespace ") {
        (end, format!("\n{block}"))
    } else if let Some(end) = line_end_after(source, "<?php") {
        (end, format!("\n{block}"))
    } else {
        (0, format!("{block}\n"))
    };

    let mut content = String::with_capacity(source.len() + insertion.len() + 1);
    content.push_str(&source[..position]);
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&insertion);
    content.push_str(&source[position..]);
    content
}

/// Offset just past the first line starting with `prefix`
fn line_end_after(source: &str, prefix: &str) -> Option<usize> {
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        offset += line.len();
        if line.starts_with(prefix) {
            return Some(offset);
        }
    }
    None
}

/// Rewrite resource source to delegate to the schema classes
#[must_use]
pub fn rewrite(source: &str, blocks: &[ExtractedBlock], imports: &[String]) -> String {
    insert_imports(&replace_bodies(source, blocks), imports)
}
