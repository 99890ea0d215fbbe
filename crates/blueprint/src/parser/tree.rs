//! Builds the block tree from a token stream in a single forward pass.
//!
//! Blocks are matched with an explicit stack over tokens of every keyword,
//! so a nested block of a different keyword can never hide a closer.

use super::ast::{Branch, Case, Guard, Node, Template};
use super::call::parse_call;
use super::error::SyntaxError;
use super::token::{Token, TokenKind, parse};
use super::validate::{check_depth, check_nesting};

/// Default limit on block nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parse a template into a block tree.
///
/// Fails with every nesting error when blocks are unbalanced; nothing is
/// built for an invalid template. Blocks may nest at most
/// [`DEFAULT_MAX_DEPTH`] deep.
pub fn parse_template(template: &str) -> Result<Template, Vec<SyntaxError>> {
    parse_template_with_depth(template, DEFAULT_MAX_DEPTH)
}

/// Parse a template, allowing blocks to nest at most `max_depth` deep.
///
/// Depth is checked on the flat token stream before the tree is built, so a
/// template nested past the limit fails with a single `TooDeep` error
/// however deep it goes.
pub fn parse_template_with_depth(
    template: &str,
    max_depth: usize,
) -> Result<Template, Vec<SyntaxError>> {
    let tokens = parse(template);
    let errors = check_nesting(&tokens);
    if !errors.is_empty() {
        return Err(errors);
    }
    if let Some(error) = check_depth(&tokens, max_depth) {
        return Err(vec![error]);
    }
    let mut builder = TreeBuilder {
        template,
        tokens: &tokens,
        position: 0,
    };
    let (items, _) = builder.block();
    Ok(Template {
        nodes: into_nodes(items),
    })
}

/// Intermediate form: branch markers and blocks stay generic until the
/// enclosing block decides what they mean.
enum Item {
    Node(Node),
    Else {
        raw: String,
    },
    Elif {
        condition: String,
        raw: String,
    },
    Block {
        keyword: String,
        args: String,
        children: Vec<Item>,
        open: String,
        close: String,
    },
}

struct TreeBuilder<'a> {
    template: &'a str,
    tokens: &'a [Token],
    position: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Collect items until the closer of the current block (consumed and
    /// returned) or end of input.
    fn block(&mut self) -> (Vec<Item>, Option<&'a Token>) {
        let mut items = Vec::new();
        while let Some(token) = self.tokens.get(self.position) {
            self.position += 1;
            let item = match &token.kind {
                TokenKind::Close(_) => return (items, Some(token)),
                TokenKind::Text => Item::Node(Node::Text(token.content.clone())),
                TokenKind::Variable => Item::Node(Node::Variable(token.content.clone())),
                TokenKind::Function => Item::Node(match parse_call(&token.content) {
                    Some(call) => Node::Call(call),
                    None => Node::Variable(token.content.clone()),
                }),
                TokenKind::Else => Item::Else {
                    raw: self.raw(token),
                },
                TokenKind::Elif => Item::Elif {
                    condition: token.content.clone(),
                    raw: self.raw(token),
                },
                TokenKind::Open(keyword) => {
                    let (children, close) = self.block();
                    Item::Block {
                        keyword: keyword.clone(),
                        args: token.content.clone(),
                        children,
                        open: self.raw(token),
                        close: close.map(|t| self.raw(t)).unwrap_or_default(),
                    }
                }
            };
            items.push(item);
        }
        (items, None)
    }

    fn raw(&self, token: &Token) -> String {
        self.template[token.span.clone()].to_string()
    }
}

fn into_nodes(items: Vec<Item>) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Item::Node(node) => nodes.push(node),
            Item::Else { raw } | Item::Elif { raw, .. } => nodes.push(Node::Text(raw)),
            Item::Block {
                keyword,
                args,
                children,
                open,
                close,
            } => match keyword.as_str() {
                "if" => nodes.push(lower_if(args, children)),
                "for" => nodes.push(Node::For {
                    target: args,
                    body: into_nodes(children),
                }),
                "switch" => nodes.push(lower_switch(args, children)),
                _ => {
                    nodes.push(Node::Text(open));
                    nodes.extend(into_nodes(children));
                    nodes.push(Node::Text(close));
                }
            },
        }
    }
    nodes
}

fn lower_if(condition: String, children: Vec<Item>) -> Node {
    let mut branches = Vec::new();
    let mut guard = Guard::If(condition);
    let mut body = Vec::new();
    for item in children {
        let next = match item {
            Item::Else { .. } => Guard::Else,
            Item::Elif { condition, .. } => Guard::Elif(condition),
            other => {
                body.push(other);
                continue;
            }
        };
        branches.push(Branch {
            guard,
            body: into_nodes(body),
        });
        guard = next;
        body = Vec::new();
    }
    branches.push(Branch {
        guard,
        body: into_nodes(body),
    });
    Node::If(branches)
}

/// Keep only the `case` and `default` clauses of a switch; anything between
/// them is ignored. The first `default` wins.
fn lower_switch(subject: String, children: Vec<Item>) -> Node {
    let mut cases = Vec::new();
    let mut default = None;
    for item in children {
        if let Item::Block {
            keyword,
            args,
            children,
            ..
        } = item
        {
            match keyword.as_str() {
                "case" => cases.push(Case {
                    value: args,
                    body: into_nodes(children),
                }),
                "default" if default.is_none() => default = Some(into_nodes(children)),
                _ => {}
            }
        }
    }
    Node::Switch {
        subject,
        cases,
        default,
    }
}
