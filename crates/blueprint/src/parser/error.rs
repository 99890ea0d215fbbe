//! Syntax error types for templates.

use thiserror::Error;

/// What went wrong with the block structure of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A `{{/keyword}}` with no open block.
    UnexpectedClose { keyword: String },
    /// A `{{/keyword}}` closing a block opened with a different keyword.
    MismatchedClose { expected: String, found: String },
    /// A `{{#keyword}}` never closed before end of input.
    Unclosed { keyword: String },
    /// A `{{#keyword}}` nested more than `limit` blocks deep.
    TooDeep { keyword: String, limit: usize },
}

/// A block-nesting error with the location of the offending marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {}", describe(.kind))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// 1-based line of the marker.
    pub line: usize,
    /// 1-based column of the marker.
    pub column: usize,
    /// Byte offset of the marker in the template.
    pub offset: usize,
    /// Byte length of the marker.
    pub len: usize,
}

impl SyntaxError {
    /// The block keyword this error is about.
    pub fn keyword(&self) -> &str {
        match &self.kind {
            SyntaxErrorKind::UnexpectedClose { keyword }
            | SyntaxErrorKind::Unclosed { keyword }
            | SyntaxErrorKind::TooDeep { keyword, .. } => keyword,
            SyntaxErrorKind::MismatchedClose { found, .. } => found,
        }
    }
}

fn describe(kind: &SyntaxErrorKind) -> String {
    match kind {
        SyntaxErrorKind::UnexpectedClose { keyword } => {
            format!("closing {{{{/{keyword}}}}} has no matching opening block")
        }
        SyntaxErrorKind::MismatchedClose { expected, found } => {
            format!("expected {{{{/{expected}}}}} but found {{{{/{found}}}}}")
        }
        SyntaxErrorKind::Unclosed { keyword } => {
            format!("block {{{{#{keyword}}}}} is never closed")
        }
        SyntaxErrorKind::TooDeep { keyword, limit } => {
            format!("block {{{{#{keyword}}}}} is nested more than {limit} levels deep")
        }
    }
}
