//! Template tokenizer using winnow.
//!
//! Splits a template into a flat stream of tokens. Recognizes:
//! - Literal text
//! - Placeholders: `{{name}}` and function calls `{{NS.method(args)}}`
//! - Block openers `{{#keyword args}}` and closers `{{/keyword}}`
//! - Branch continuations `{{else}}` and `{{elif condition}}`
//!
//! A `{{` that never reaches a matching `}}` stays literal text.

use std::mem;
use std::ops::Range;

use winnow::combinator::{alt, delimited};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{rest, take_until, take_while};

/// The syntactic role of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text copied to the output.
    Text,
    /// `{{name}}`
    Variable,
    /// `{{NS.method(args)}}`
    Function,
    /// `{{#keyword args}}`
    Open(String),
    /// `{{/keyword}}`
    Close(String),
    /// `{{else}}`
    Else,
    /// `{{elif condition}}`
    Elif,
}

/// A token with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Inner text: the literal text, variable name, call source, block
    /// arguments or elif condition. Empty for closers and `else`.
    pub content: String,
    /// Byte range of the whole token in the template.
    pub span: Range<usize>,
    /// 1-based line where the token starts.
    pub line: usize,
    /// 1-based column where the token starts.
    pub column: usize,
}

/// Split a template into tokens.
///
/// Adjacent literal text is merged into a single `Text` token.
pub fn parse(template: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut remaining = template;
    let mut position = Position::default();

    while !remaining.is_empty() {
        let start = template.len() - remaining.len();
        let (kind, content) = match piece(&mut remaining) {
            Ok(Piece::Marker(body)) => classify(body),
            Ok(Piece::Text(text)) => (TokenKind::Text, text.to_string()),
            // Unreachable in practice: the text alternative accepts any
            // non-empty input. Keep the rest verbatim rather than looping.
            Err(_) => {
                let text = mem::take(&mut remaining);
                (TokenKind::Text, text.to_string())
            }
        };
        let end = template.len() - remaining.len();
        let (line, column) = position.advance_to(template, start);

        if kind == TokenKind::Text
            && let Some(previous) = tokens.last_mut()
            && previous.kind == TokenKind::Text
        {
            previous.content.push_str(&template[start..end]);
            previous.span.end = end;
            continue;
        }
        let content = if kind == TokenKind::Text {
            template[start..end].to_string()
        } else {
            content
        };
        tokens.push(Token {
            kind,
            content,
            span: start..end,
            line,
            column,
        });
    }

    tokens
}

/// Tracks line and column while walking forward through the template.
#[derive(Default)]
struct Position {
    offset: usize,
    line: usize,
    line_start: usize,
}

impl Position {
    fn advance_to(&mut self, source: &str, offset: usize) -> (usize, usize) {
        for (index, c) in source[self.offset..offset].char_indices() {
            if c == '\n' {
                self.line += 1;
                self.line_start = self.offset + index + 1;
            }
        }
        self.offset = offset;
        let column = source[self.line_start..offset].chars().count() + 1;
        (self.line + 1, column)
    }
}

enum Piece<'i> {
    Marker(&'i str),
    Text(&'i str),
}

fn piece<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((marker.map(Piece::Marker), text.map(Piece::Text))).parse_next(input)
}

/// Parse a `{{ ... }}` marker, returning its inner text.
fn marker<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited("{{", marker_body, "}}").parse_next(input)
}

/// Parse literal text: everything up to the next `{{`, or an unmatched `{{`
/// together with the text that follows it.
fn text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        ("{{", alt((take_until(0.., "{{"), rest))).take(),
        take_until(1.., "{{"),
        rest.verify(|s: &str| !s.is_empty()),
    ))
    .parse_next(input)
}

/// Parse the inside of a marker up to (not including) its closing `}}`.
///
/// Braces nest and quoted strings are skipped, so `{{#for x in {"a": 1}}}`
/// closes after the object literal.
fn marker_body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let source: &'i str = *input;
    let len = body_len(source).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))?;
    let (body, tail) = source.split_at(len);
    *input = tail;
    Ok(body)
}

fn body_len(source: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (index, c) in source.char_indices() {
        if let Some(q) = quote {
            match c {
                '\n' => return None,
                _ if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '}' => return source[index..].starts_with("}}").then_some(index),
            _ => {}
        }
    }
    None
}

/// Decide what a marker is from its inner text.
fn classify(body: &str) -> (TokenKind, String) {
    let trimmed = body.trim();
    let literal = || (TokenKind::Text, String::new());

    if trimmed.is_empty() {
        return literal();
    }
    if let Some(rest) = trimmed.strip_prefix('#') {
        return match split_keyword(rest) {
            Some((keyword, args)) if args.is_empty() || args.starts_with(char::is_whitespace) => {
                (TokenKind::Open(keyword.to_string()), args.trim().to_string())
            }
            _ => literal(),
        };
    }
    if let Some(rest) = trimmed.strip_prefix('/') {
        return match split_keyword(rest) {
            Some((keyword, tail)) if tail.trim().is_empty() => {
                (TokenKind::Close(keyword.to_string()), String::new())
            }
            _ => literal(),
        };
    }
    if trimmed == "else" {
        return (TokenKind::Else, String::new());
    }
    if let Some(condition) = trimmed.strip_prefix("elif")
        && (condition.is_empty() || condition.starts_with(char::is_whitespace))
    {
        return (TokenKind::Elif, condition.trim().to_string());
    }
    if trimmed.contains('(') {
        (TokenKind::Function, trimmed.to_string())
    } else {
        (TokenKind::Variable, trimmed.to_string())
    }
}

/// Split a leading word (`\w+`) from the rest of the input.
fn split_keyword(input: &str) -> Option<(&str, &str)> {
    let mut remaining = input;
    let keyword = word(&mut remaining).ok()?;
    Some((keyword, remaining))
}

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_word_char).parse_next(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
