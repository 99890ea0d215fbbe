//! Block tree produced from a validated token stream.
//!
//! These types are public so tooling can inspect templates without
//! rendering them.

use super::call::FunctionCall;

/// A parsed template: a sequence of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub nodes: Vec<Node>,
}

/// A node of the block tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, including markers that carry no meaning in place.
    Text(String),
    /// `{{name}}`: a literal or variable expression.
    Variable(String),
    /// `{{NS.method(args)}}`
    Call(FunctionCall),
    /// `{{#if}}` with its `elif`/`else` branches in source order.
    If(Vec<Branch>),
    /// `{{#for target}}body{{/for}}`
    For { target: String, body: Vec<Node> },
    /// `{{#switch subject}}` with its case clauses.
    Switch {
        subject: String,
        cases: Vec<Case>,
        default: Option<Vec<Node>>,
    },
}

/// One segment of an `if` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub guard: Guard,
    pub body: Vec<Node>,
}

/// What selects a branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    /// The opening `{{#if condition}}`.
    If(String),
    /// `{{elif condition}}`
    Elif(String),
    /// `{{else}}`
    Else,
}

/// A `{{#case value}}body{{/case}}` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// Source of the case value, resolved as a literal at render time.
    pub value: String,
    pub body: Vec<Node>,
}
