//! Variable scopes for template evaluation.

use indexmap::IndexMap;

use crate::types::{Context, Value};

/// A chain of variable frames.
///
/// The root frame is the render context; each loop iteration pushes a child
/// frame holding its bindings. Children borrow their parent, so a binding
/// can never outlive the iteration that introduced it and nothing is ever
/// restored by hand.
#[derive(Debug)]
pub struct Scope<'a> {
    frame: Frame<'a>,
    parent: Option<&'a Scope<'a>>,
}

#[derive(Debug)]
enum Frame<'a> {
    Context(&'a Context),
    Bindings(Vec<(String, Value)>),
}

impl<'a> Scope<'a> {
    /// An empty root scope.
    pub fn new() -> Self {
        Self {
            frame: Frame::Bindings(Vec::new()),
            parent: None,
        }
    }

    /// A root scope over a render context.
    pub fn with_context(context: &'a Context) -> Self {
        Self {
            frame: Frame::Context(context),
            parent: None,
        }
    }

    /// A child scope that shadows this one with the given bindings.
    pub fn child(&'a self, bindings: Vec<(String, Value)>) -> Scope<'a> {
        Scope {
            frame: Frame::Bindings(bindings),
            parent: Some(self),
        }
    }

    /// A child scope that shadows this one with a whole context.
    pub fn overlay(&'a self, context: &'a Context) -> Scope<'a> {
        Scope {
            frame: Frame::Context(context),
            parent: Some(self),
        }
    }

    /// Look up a name, innermost binding first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let local = match &self.frame {
            Frame::Context(context) => context.get(name),
            Frame::Bindings(bindings) => bindings
                .iter()
                .rev()
                .find(|(bound, _)| bound == name)
                .map(|(_, value)| value),
        };
        local.or_else(|| self.parent.and_then(|parent| parent.get(name)))
    }

    /// The `user` map, if one is bound. Its `name` and `email` entries
    /// override the function library's identity.
    pub fn user_profile(&self) -> Option<&IndexMap<String, Value>> {
        self.get("user").and_then(Value::as_map)
    }
}

impl Default for Scope<'_> {
    fn default() -> Self {
        Self::new()
    }
}
