//! Error types for template rendering.

use strsim::levenshtein;
use thiserror::Error;

use crate::functions::Arity;
use crate::parser::SyntaxError;

/// An error raised while evaluating a well-formed template.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A `for` target that is not `name in iterable` or `a, b in iterable`.
    #[error("invalid loop target '{target}'")]
    InvalidLoopTarget { target: String },

    /// A `start..end` range whose bounds are not integers.
    #[error("invalid range '{range}': bounds must be integers")]
    InvalidRange { range: String },

    /// A loop iterable name with no binding in scope.
    #[error("iterable not found: '{name}'")]
    IterableNotFound { name: String },

    /// A loop over a value that is neither a list nor a map.
    #[error("cannot iterate over '{name}' of type {type_name}")]
    NotIterable {
        name: String,
        type_name: &'static str,
    },

    /// A switch subject naming a variable with no binding in scope.
    #[error("switch subject not found: '{name}'")]
    UnboundSwitchSubject { name: String },

    /// An ordering comparison between values that have no order.
    #[error("cannot compare {left} {operator} {right}")]
    Incomparable {
        left: &'static str,
        operator: &'static str,
        right: &'static str,
    },

    /// A function name missing from the catalog.
    #[error("function not found: '{name}'{}", did_you_mean(suggestions))]
    FunctionNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// A function called with the wrong number of arguments.
    #[error("function '{function}' expects {expected} arguments, got {got}")]
    ArgumentCount {
        function: &'static str,
        expected: Arity,
        got: usize,
    },

    /// A function argument of the wrong type or out of range.
    #[error("invalid argument to '{function}': {message}")]
    InvalidArgument {
        function: &'static str,
        message: String,
    },

    /// Blocks nested deeper than the renderer allows.
    #[error("maximum nesting depth of {limit} exceeded")]
    MaxDepthExceeded { limit: usize },
}

/// Why a render call produced no output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The template has unbalanced blocks; every error found is listed.
    #[error("template has {} syntax error(s): {}", .0.len(), join_errors(.0))]
    Syntax(Vec<SyntaxError>),

    /// Evaluation failed part way through.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl From<Vec<SyntaxError>> for RenderError {
    fn from(errors: Vec<SyntaxError>) -> Self {
        RenderError::Syntax(errors)
    }
}

fn join_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions for a name, closest first.
///
/// Uses Levenshtein distance, ignoring ASCII case:
/// - distance <= 1 for names of 3 chars or fewer
/// - distance <= 2 for longer names
/// - at most 3 suggestions
pub fn compute_suggestions<'a>(
    name: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let target = name.to_ascii_lowercase();
    let mut suggestions: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let dist = levenshtein(&target, &candidate.to_ascii_lowercase());
            (dist <= max_distance && dist > 0).then_some((dist, candidate))
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}
