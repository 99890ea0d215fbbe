//! Template interpreter.
//!
//! Evaluates parsed templates: resolves expressions against a chain of
//! scopes, dispatches function calls and renders blocks.

mod error;
mod expression;
mod renderer;
mod scope;

pub use error::{EvalError, RenderError, compute_suggestions};
pub use expression::{Bindings, Evaluator, ForTarget, Frames, Iterable, Operand};
pub use renderer::Renderer;
pub use crate::parser::DEFAULT_MAX_DEPTH;
pub use scope::Scope;
