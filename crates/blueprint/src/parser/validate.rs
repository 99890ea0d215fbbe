//! Block-nesting validation.

use super::error::{SyntaxError, SyntaxErrorKind};
use super::token::{Token, TokenKind, parse};

/// Check that every block opener is closed by a closer of the same keyword.
///
/// Runs over the whole template and returns every error found, not just the
/// first. A mismatched closer still pops the open block so later blocks are
/// checked against the right parent.
///
/// # Example
///
/// ```
/// use blueprint::parser::validate_syntax;
///
/// assert!(validate_syntax("{{#if ok}}yes{{/if}}").is_ok());
///
/// let errors = validate_syntax("{{#if ok}}no close").unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].keyword(), "if");
/// ```
pub fn validate_syntax(template: &str) -> Result<(), Vec<SyntaxError>> {
    let errors = check_nesting(&parse(template));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub(crate) fn check_nesting(tokens: &[Token]) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    let mut stack: Vec<(&str, &Token)> = Vec::new();

    for token in tokens {
        match &token.kind {
            TokenKind::Open(keyword) => stack.push((keyword.as_str(), token)),
            TokenKind::Close(keyword) => match stack.pop() {
                None => errors.push(error_at(
                    token,
                    SyntaxErrorKind::UnexpectedClose {
                        keyword: keyword.clone(),
                    },
                )),
                Some((open, _)) if open != keyword.as_str() => errors.push(error_at(
                    token,
                    SyntaxErrorKind::MismatchedClose {
                        expected: open.to_string(),
                        found: keyword.clone(),
                    },
                )),
                Some(_) => {}
            },
            _ => {}
        }
    }

    for (keyword, token) in stack {
        errors.push(error_at(
            token,
            SyntaxErrorKind::Unclosed {
                keyword: keyword.to_string(),
            },
        ));
    }

    errors
}

/// The first block opener nested deeper than `limit`.
///
/// Only meaningful once [`check_nesting`] has passed.
pub(crate) fn check_depth(tokens: &[Token], limit: usize) -> Option<SyntaxError> {
    let mut depth = 0usize;
    for token in tokens {
        match &token.kind {
            TokenKind::Open(keyword) => {
                depth += 1;
                if depth > limit {
                    return Some(error_at(
                        token,
                        SyntaxErrorKind::TooDeep {
                            keyword: keyword.clone(),
                            limit,
                        },
                    ));
                }
            }
            TokenKind::Close(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

fn error_at(token: &Token, kind: SyntaxErrorKind) -> SyntaxError {
    SyntaxError {
        kind,
        line: token.line,
        column: token.column,
        offset: token.span.start,
        len: token.span.len(),
    }
}
