//! A small programmable template language.
//!
//! Templates mix literal text with `{{...}}` markers:
//!
//! - placeholders: `{{name}}`, `{{user.email}}`
//! - function calls: `{{MATH.round(price, 2)}}`, `{{DATE.format("DD/MM/YYYY")}}`
//! - conditionals: `{{#if a > 1 && b}}...{{elif c}}...{{else}}...{{/if}}`
//! - loops: `{{#for item in items}}`, `{{#for key, value in map}}`, `{{#for i in 1..3}}`
//! - switches: `{{#switch kind}}{{#case "a"}}...{{/case}}{{#default}}...{{/default}}{{/switch}}`
//!
//! # Example
//!
//! ```
//! use blueprint::{context, render};
//!
//! let ctx = context! { "items" => vec!["a", "b"], "title" => "List" };
//! let output = render("{{title}}:{{#for x in items}} {{x}}{{/for}}", &ctx).unwrap();
//! assert_eq!(output, "List: a b");
//! ```

pub mod functions;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use functions::FunctionLibrary;
pub use interpreter::{EvalError, RenderError, Renderer, compute_suggestions};
pub use parser::{SyntaxError, extract_functions, extract_variables, parse_template, validate_syntax};
pub use types::{Context, Value};

/// Render a template with the default function library and no defaults.
///
/// See [`Renderer`] to inject deterministic clocks, randomness and
/// identity, or to set default values.
pub fn render(template: &str, context: &Context) -> Result<String, RenderError> {
    Renderer::new().render(template, context)
}

/// Creates a [`Context`] from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// booleans and vectors can be passed directly.
///
/// # Example
///
/// ```
/// use blueprint::{context, Value};
///
/// let ctx = context! { "count" => 3, "name" => "Alice" };
/// assert_eq!(ctx.len(), 2);
/// assert_eq!(ctx["count"].as_integer(), Some(3));
/// assert_eq!(ctx["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! context {
    {} => {
        $crate::Context::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Context::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
