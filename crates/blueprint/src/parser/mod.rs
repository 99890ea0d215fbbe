//! Template tokenizer and parser.
//!
//! Templates are tokenized once into a flat stream, checked for balanced
//! block nesting, and then built into a block tree that the interpreter
//! evaluates. The token stream and tree are public for tooling.

pub mod ast;
mod call;
pub mod error;
mod extract;
pub(crate) mod scan;
mod token;
mod tree;
mod validate;

pub use ast::{Branch, Case, Guard, Node, Template};
pub use call::{FunctionCall, parse_call};
pub use error::{SyntaxError, SyntaxErrorKind};
pub use extract::{extract_functions, extract_variables};
pub use token::{Token, TokenKind, parse};
pub use tree::{DEFAULT_MAX_DEPTH, parse_template, parse_template_with_depth};
pub use validate::validate_syntax;
