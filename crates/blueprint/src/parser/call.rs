//! Function-call placeholders: `NS.method(arg, ...)`.

use super::scan::split_top_level;

/// A function call as written in a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Qualified name as written, e.g. `MATH.round`.
    pub name: String,
    /// Raw source of each argument, trimmed. Evaluated at render time.
    pub args: Vec<String>,
}

/// Split a placeholder such as `MATH.round(x, 2)` into name and arguments.
///
/// Returns `None` when the source has no `name(...)` shape; such
/// placeholders are treated as plain variables.
pub fn parse_call(source: &str) -> Option<FunctionCall> {
    let open = source.find('(')?;
    let close = source.rfind(')')?;
    if close < open {
        return None;
    }
    let name = source[..open].trim();
    if name.is_empty() {
        return None;
    }
    let inner = source[open + 1..close].trim();
    let args = if inner.is_empty() {
        Vec::new()
    } else {
        split_top_level(inner, ",")
            .into_iter()
            .map(|arg| arg.trim().to_string())
            .collect()
    };
    Some(FunctionCall {
        name: name.to_string(),
        args,
    })
}
