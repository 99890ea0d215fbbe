//! Miette diagnostic wrapper for template syntax errors.

use blueprint::parser::SyntaxErrorKind;
use blueprint::SyntaxError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic pointing at the offending marker.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(blueprint::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a SyntaxError with source context.
    pub fn from_syntax_error(name: &str, content: &str, err: &SyntaxError) -> Self {
        // Clamp to content length to avoid miette panic on out-of-bounds
        let offset = err.offset.min(content.len());
        let len = err.len.min(content.len() - offset).max(1);

        let (message, help) = match &err.kind {
            SyntaxErrorKind::UnexpectedClose { keyword } => (
                format!("{{{{/{keyword}}}}} closes a block that was never opened"),
                format!("remove it or add a matching {{{{#{keyword}}}}} before it"),
            ),
            SyntaxErrorKind::MismatchedClose { expected, found } => (
                format!("expected {{{{/{expected}}}}} but found {{{{/{found}}}}}"),
                format!("close the inner {{{{#{expected}}}}} block first"),
            ),
            SyntaxErrorKind::Unclosed { keyword } => (
                format!("{{{{#{keyword}}}}} is never closed"),
                format!("add {{{{/{keyword}}}}} where the block ends"),
            ),
            SyntaxErrorKind::TooDeep { keyword, limit } => (
                format!("{{{{#{keyword}}}}} is nested more than {limit} blocks deep"),
                "flatten the template or raise the nesting limit".to_string(),
            ),
        };

        TemplateDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, len).into(),
            message,
            help: Some(help),
        }
    }
}
