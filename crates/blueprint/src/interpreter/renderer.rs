//! Template rendering: walks the block tree, resolving placeholders and
//! choosing branches and iterations with the expression evaluator.

use bon::Builder;
use tracing::{debug, trace};

use crate::functions::FunctionLibrary;
use crate::interpreter::expression::Evaluator;
use crate::interpreter::scope::Scope;
use crate::interpreter::{EvalError, RenderError};
use crate::parser::{
    Case, DEFAULT_MAX_DEPTH, FunctionCall, Guard, Node, SyntaxError, SyntaxErrorKind, Template,
    parse_template_with_depth,
};
use crate::types::{Context, Value};

/// Renders templates against a context.
///
/// A renderer is immutable and can be shared between threads; each call to
/// [`render`](Renderer::render) is an independent pass.
///
/// # Example
///
/// ```
/// use blueprint::{Renderer, context};
///
/// let renderer = Renderer::builder()
///     .defaults(context! { "greeting" => "Hello" })
///     .build();
///
/// let output = renderer
///     .render("{{greeting}}, {{name}}!", &context! { "name" => "Ada" })
///     .unwrap();
/// assert_eq!(output, "Hello, Ada!");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Renderer {
    /// Functions available to `{{NS.method(...)}}` placeholders.
    #[builder(default)]
    functions: FunctionLibrary,

    /// Values visible to every render; call parameters take precedence.
    #[builder(default)]
    defaults: Context,

    /// Deepest block nesting allowed.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Render a template.
    ///
    /// The template's block structure is validated first; if it is
    /// unbalanced every syntax error is returned and nothing is evaluated.
    /// Any evaluation error aborts the whole render. Templates nested deeper
    /// than `max_depth` fail with `MaxDepthExceeded` before anything is built.
    pub fn render(&self, template: &str, params: &Context) -> Result<String, RenderError> {
        debug!(bytes = template.len(), params = params.len(), "rendering template");
        let tree = parse_template_with_depth(template, self.max_depth).map_err(|errors| {
            let too_deep = matches!(
                errors.as_slice(),
                [SyntaxError {
                    kind: SyntaxErrorKind::TooDeep { .. },
                    ..
                }]
            );
            if too_deep {
                RenderError::Eval(EvalError::MaxDepthExceeded {
                    limit: self.max_depth,
                })
            } else {
                RenderError::Syntax(errors)
            }
        })?;
        let output = self.render_template(&tree, params)?;
        debug!(bytes = output.len(), "rendered template");
        Ok(output)
    }

    /// Render an already parsed template.
    pub fn render_template(&self, template: &Template, params: &Context) -> Result<String, EvalError> {
        let base = Scope::with_context(&self.defaults);
        let scope = base.overlay(params);
        let mut output = String::new();
        self.render_nodes(&template.nodes, &scope, 0, &mut output)?;
        Ok(output)
    }

    fn render_nodes(
        &self,
        nodes: &[Node],
        scope: &Scope<'_>,
        depth: usize,
        output: &mut String,
    ) -> Result<(), EvalError> {
        if depth > self.max_depth {
            return Err(EvalError::MaxDepthExceeded {
                limit: self.max_depth,
            });
        }
        let evaluator = Evaluator::new(scope);

        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Variable(expr) => output.push_str(&evaluator.value(expr).to_string()),
                Node::Call(call) => {
                    let value = self.call(call, scope, &evaluator)?;
                    output.push_str(&value.to_string());
                }
                Node::If(branches) => {
                    for branch in branches {
                        let taken = match &branch.guard {
                            Guard::If(condition) | Guard::Elif(condition) => {
                                evaluator.evaluate(condition)?.is_truthy()
                            }
                            Guard::Else => true,
                        };
                        trace!(guard = ?branch.guard, taken, "if branch");
                        if taken {
                            self.render_nodes(&branch.body, scope, depth + 1, output)?;
                            break;
                        }
                    }
                }
                Node::For { target, body } => {
                    let target = evaluator.for_target(target)?;
                    trace!(?target, "for block");
                    for frame in target.frames() {
                        let child = scope.child(frame);
                        self.render_nodes(body, &child, depth + 1, output)?;
                    }
                }
                Node::Switch {
                    subject,
                    cases,
                    default,
                } => {
                    let value = evaluator.subject(subject)?;
                    let body = cases
                        .iter()
                        .find(|case| evaluator.value(&case.value).loose_eq(&value))
                        .map(|Case { body, .. }| body)
                        .or(default.as_ref());
                    trace!(%value, matched = body.is_some(), "switch block");
                    if let Some(body) = body {
                        self.render_nodes(body, scope, depth + 1, output)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn call(
        &self,
        call: &FunctionCall,
        scope: &Scope<'_>,
        evaluator: &Evaluator<'_>,
    ) -> Result<Value, EvalError> {
        let args: Vec<Value> = call.args.iter().map(|arg| evaluator.value(arg)).collect();
        self.functions
            .execute_with_user(&call.name, &args, scope.user_profile())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
