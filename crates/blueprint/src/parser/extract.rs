//! Static inspection of templates, without rendering.

use indexmap::IndexSet;

use super::call::{FunctionCall, parse_call};
use super::token::{TokenKind, parse};

/// Distinct variable names referenced by plain placeholders, in order of
/// first appearance.
///
/// Only the first word of each placeholder counts. Names used solely as
/// block arguments (conditions, loop targets) are not reported, nor are
/// names bound by an enclosing `for` block, including dotted paths through
/// them such as `item.name`.
///
/// ```
/// use blueprint::parser::extract_variables;
///
/// let names = extract_variables("{{name}} owes {{amount}} to {{name}}");
/// assert_eq!(names, ["name", "amount"]);
///
/// let names = extract_variables("{{#for item in items}}{{item.name}}{{/for}}{{total}}");
/// assert_eq!(names, ["total"]);
/// ```
pub fn extract_variables(template: &str) -> Vec<String> {
    let tokens = parse(template);
    let mut names: IndexSet<&str> = IndexSet::new();
    // Names bound by each open block; empty for blocks other than `for`.
    let mut locals: Vec<Vec<&str>> = Vec::new();

    for token in &tokens {
        match &token.kind {
            TokenKind::Open(keyword) if keyword == "for" => {
                locals.push(loop_bindings(&token.content));
            }
            TokenKind::Open(_) => locals.push(Vec::new()),
            TokenKind::Close(_) => {
                locals.pop();
            }
            TokenKind::Variable => {
                let Some(name) = token.content.split_whitespace().next() else {
                    continue;
                };
                let root = name.split('.').next().unwrap_or(name);
                if !locals.iter().flatten().any(|local| *local == root) {
                    names.insert(name);
                }
            }
            _ => {}
        }
    }
    names.into_iter().map(str::to_string).collect()
}

/// The names a `for` target binds: `a` or `a, b` before ` in `.
fn loop_bindings(target: &str) -> Vec<&str> {
    target
        .split_once(" in ")
        .map(|(names, _)| names.split(',').map(str::trim).collect())
        .unwrap_or_default()
}

/// Every function call in source order, duplicates included.
pub fn extract_functions(template: &str) -> Vec<FunctionCall> {
    parse(template)
        .iter()
        .filter(|token| token.kind == TokenKind::Function)
        .filter_map(|token| parse_call(&token.content))
        .collect()
}
