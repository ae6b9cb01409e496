//! Brace-depth scanner for PHP method bodies
//!
//! Locates `function <name>(...) { ... }` declarations by tokenizing the
//! source and matching braces by depth. Comments, string literals and
//! heredocs are skipped, so braces inside them never affect the match and
//! the result does not depend on indentation.

use crate::error::ScanError;
use std::ops::Range;

/// Location of one method declaration and its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpan {
    /// 1-based line of the `function` keyword
    pub line: usize,
    /// Byte offset of the opening `{`
    pub open_brace: usize,
    /// Byte offset of the matching `}`
    pub close_brace: usize,
    /// Leading whitespace of the declaration line
    pub indent: String,
}

impl MethodSpan {
    /// Byte range of the body between the braces (exclusive of both)
    #[must_use]
    pub const fn body_range(&self) -> Range<usize> {
        self.open_brace + 1..self.close_brace
    }

    /// Body text between the braces
    #[must_use]
    pub fn body<'a>(&self, source: &'a str) -> &'a str {
        &source[self.body_range()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Ident,
    Punct(u8),
    Literal,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

/// Find the single declaration of method `name` in `source`
///
/// Returns `Ok(None)` when the method is not declared at all.
///
/// # Errors
///
/// Returns [`ScanError::Ambiguous`] if the method is declared more than once,
/// [`ScanError::MissingBody`] if the declaration ends in `;`, and
/// [`ScanError::Unterminated`] if the body braces never balance.
pub fn find_method(source: &str, name: &str) -> Result<Option<MethodSpan>, ScanError> {
    let tokens = tokenize(source);
    let declarations = find_declarations(source, &tokens, name);

    match declarations.as_slice() {
        [] => {
            tracing::debug!(method = name, "no declaration found");
            Ok(None)
        }
        [index] => {
            let span = resolve_body(source, &tokens, *index, name)?;
            tracing::debug!(
                method = name,
                line = span.line,
                body_bytes = span.body_range().len(),
                "located method body"
            );
            Ok(Some(span))
        }
        many => Err(ScanError::Ambiguous {
            method: name.to_string(),
            count: many.len(),
            lines: many
                .iter()
                .map(|&i| line_of(source, tokens[i].start))
                .collect(),
        }),
    }
}

/// Indices of `function` tokens that declare `name`
fn find_declarations(source: &str, tokens: &[Token], name: &str) -> Vec<usize> {
    let text = |t: &Token| &source[t.start..t.end];

    (0..tokens.len())
        .filter(|&i| {
            let token = &tokens[i];
            if token.kind != TokenKind::Ident || !text(token).eq_ignore_ascii_case("function") {
                return false;
            }
            // `$function`, `->function`, `::function` are not declarations
            if i > 0
                && matches!(
                    tokens[i - 1].kind,
                    TokenKind::Punct(b'$' | b'>' | b':')
                )
            {
                return false;
            }

            let mut next = i + 1;
            if tokens.get(next).is_some_and(|t| t.kind == TokenKind::Punct(b'&')) {
                next += 1;
            }

            let is_named = tokens.get(next).is_some_and(|t| {
                t.kind == TokenKind::Ident && text(t).eq_ignore_ascii_case(name)
            });
            is_named
                && tokens
                    .get(next + 1)
                    .is_some_and(|t| t.kind == TokenKind::Punct(b'('))
        })
        .collect()
}

/// Match the parameter list and body of the declaration at `index`
fn resolve_body(
    source: &str,
    tokens: &[Token],
    index: usize,
    name: &str,
) -> Result<MethodSpan, ScanError> {
    let line = line_of(source, tokens[index].start);
    let unterminated = || ScanError::Unterminated {
        method: name.to_string(),
        line,
    };

    let open_paren = (index + 1..tokens.len())
        .find(|&i| tokens[i].kind == TokenKind::Punct(b'('))
        .ok_or_else(unterminated)?;
    let close_paren = matching(tokens, open_paren, b'(', b')').ok_or_else(unterminated)?;

    // Skip the return type up to the body or a terminating `;`
    let open_brace = (close_paren + 1..tokens.len())
        .find(|&i| matches!(tokens[i].kind, TokenKind::Punct(b'{' | b';')))
        .ok_or_else(unterminated)?;
    if tokens[open_brace].kind == TokenKind::Punct(b';') {
        return Err(ScanError::MissingBody {
            method: name.to_string(),
            line,
        });
    }

    let close_brace = matching(tokens, open_brace, b'{', b'}').ok_or_else(unterminated)?;

    Ok(MethodSpan {
        line,
        open_brace: tokens[open_brace].start,
        close_brace: tokens[close_brace].start,
        indent: indent_of(source, tokens[index].start),
    })
}

/// Index of the token closing the group opened at `open`
fn matching(tokens: &[Token], open: usize, opener: u8, closer: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::Punct(c) if c == opener => depth += 1,
            TokenKind::Punct(c) if c == closer => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// 1-based line number of a byte offset
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Leading whitespace of the line containing `offset`
fn indent_of(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

const fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// Split PHP source into identifiers, punctuation and opaque literals
///
/// Offsets always fall on ASCII bytes, so slicing the source with them is
/// valid UTF-8.
fn tokenize(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        let start = pos;

        if b.is_ascii_whitespace() {
            pos += 1;
        } else if (b == b'/' && bytes.get(pos + 1) == Some(&b'/'))
            || (b == b'#' && bytes.get(pos + 1) != Some(&b'['))
        {
            pos = skip_line(bytes, pos);
        } else if b == b'/' && bytes.get(pos + 1) == Some(&b'*') {
            pos = skip_block_comment(bytes, pos + 2);
        } else if matches!(b, b'\'' | b'"' | b'`') {
            pos = skip_quoted(bytes, pos + 1, b);
            tokens.push(Token { kind: TokenKind::Literal, start, end: pos });
        } else if bytes[pos..].starts_with(b"<<<") {
            pos = skip_heredoc(source, pos + 3);
            tokens.push(Token { kind: TokenKind::Literal, start, end: pos });
        } else if is_ident_start(b) {
            while pos < bytes.len() && is_ident_continue(bytes[pos]) {
                pos += 1;
            }
            tokens.push(Token { kind: TokenKind::Ident, start, end: pos });
        } else if b.is_ascii_digit() {
            while pos < bytes.len() && (is_ident_continue(bytes[pos]) || bytes[pos] == b'.') {
                pos += 1;
            }
            tokens.push(Token { kind: TokenKind::Literal, start, end: pos });
        } else {
            pos += 1;
            tokens.push(Token { kind: TokenKind::Punct(b), start, end: pos });
        }
    }

    tokens
}

fn skip_line(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |i| pos + i + 1)
}

fn skip_block_comment(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |i| pos + i + 2)
}

fn skip_quoted(bytes: &[u8], mut pos: usize, quote: u8) -> usize {
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b if b == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

/// Skip a heredoc or nowdoc whose `<<<` ends just before `pos`
fn skip_heredoc(source: &str, pos: usize) -> usize {
    let bytes = source.as_bytes();
    let mut cursor = pos;
    while cursor < bytes.len() && matches!(bytes[cursor], b' ' | b'\t' | b'\'' | b'"') {
        cursor += 1;
    }
    let label_start = cursor;
    while cursor < bytes.len() && is_ident_continue(bytes[cursor]) {
        cursor += 1;
    }
    let label = &source[label_start..cursor];
    if label.is_empty() {
        // `<<<` without a label
        return cursor;
    }

    let mut line_start = skip_line(bytes, cursor);
    while line_start < bytes.len() {
        let line_end = skip_line(bytes, line_start);
        let line = &source[line_start..line_end];
        let trimmed = line.trim_start_matches([' ', '\t']);
        if let Some(rest) = trimmed.strip_prefix(label) {
            if !rest.bytes().next().is_some_and(is_ident_continue) {
                return line_start + (line.len() - trimmed.len()) + label.len();
            }
        }
        line_start = line_end;
    }
    bytes.len()
}
