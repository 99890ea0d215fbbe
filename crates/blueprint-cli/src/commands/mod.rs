//! CLI command implementations.

mod check;
mod functions;
mod render;

pub use check::{run_check, CheckArgs};
pub use functions::{run_functions, FunctionsArgs};
pub use render::{run_render, RenderArgs};
