//! Expression evaluation: literals, variable lookup, comparisons, logical
//! operators and `for` loop targets.

use std::cmp::Ordering;
use std::iter::Enumerate;
use std::ops::RangeInclusive;
use std::slice::Iter as SliceIter;

use indexmap::map::Iter as MapIter;
use tracing::debug;
use winnow::ascii::{space0, space1};
use winnow::combinator::{preceded, separated};
use winnow::prelude::*;
use winnow::token::{rest, take_while};

use crate::interpreter::EvalError;
use crate::interpreter::scope::Scope;
use crate::parser::scan::{find_top_level, split_top_level};
use crate::types::Value;

/// Comparison operators, in the order they are searched for. Two-character
/// operators come first so `>=` is never split as `>`.
const COMPARISONS: [&str; 6] = ["==", "!=", ">=", "<=", ">", "<"];

/// Evaluates expressions against a scope.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    scope: &'a Scope<'a>,
}

/// How a single operand resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A quoted string, boolean, number or JSON literal.
    Literal(Value),
    /// A name with a binding in scope.
    Bound(Value),
    /// A name with no binding; its source text.
    Unbound(String),
}

impl Operand {
    /// The operand's value. Unbound names evaluate to their own text.
    pub fn into_value(self) -> Value {
        match self {
            Operand::Literal(value) | Operand::Bound(value) => value,
            Operand::Unbound(name) => {
                debug!(name = %name, "unbound variable renders as its own name");
                Value::String(name)
            }
        }
    }
}

impl<'a> Evaluator<'a> {
    pub fn new(scope: &'a Scope<'a>) -> Self {
        Self { scope }
    }

    /// Evaluate a condition expression.
    ///
    /// Precedence from lowest to highest: `&&`, `||`, comparisons, `!`,
    /// then operands. Operators inside quoted strings or brackets are
    /// ignored.
    pub fn evaluate(&self, expr: &str) -> Result<Value, EvalError> {
        let expr = expr.trim();

        if find_top_level(expr, "&&").is_some() {
            for part in split_top_level(expr, "&&") {
                if !self.evaluate(part)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
            }
            return Ok(Value::Bool(true));
        }

        if find_top_level(expr, "||").is_some() {
            for part in split_top_level(expr, "||") {
                if self.evaluate(part)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
            }
            return Ok(Value::Bool(false));
        }

        for operator in COMPARISONS {
            if let Some(index) = find_top_level(expr, operator) {
                let left = self.value(&expr[..index]);
                let right = self.value(&expr[index + operator.len()..]);
                return compare(&left, operator, &right).map(Value::Bool);
            }
        }

        if let Some(negated) = expr.strip_prefix('!') {
            return Ok(Value::Bool(!self.evaluate(negated)?.is_truthy()));
        }

        Ok(self.value(expr))
    }

    /// Resolve a single operand to its value, falling back to the source
    /// text for unbound names.
    pub fn value(&self, source: &str) -> Value {
        self.operand(source).into_value()
    }

    /// Resolve a single operand.
    ///
    /// Tried in order: quoted string, `true`/`false` (any case), number
    /// (a `.` makes it a float), JSON array or object, the exact name in
    /// scope, a dotted path through maps in scope.
    pub fn operand(&self, source: &str) -> Operand {
        let source = source.trim();

        if let Some(text) = unquote(source) {
            return Operand::Literal(Value::from(text));
        }
        if source.eq_ignore_ascii_case("true") {
            return Operand::Literal(Value::Bool(true));
        }
        if source.eq_ignore_ascii_case("false") {
            return Operand::Literal(Value::Bool(false));
        }
        if let Some(number) = parse_number(source) {
            return Operand::Literal(number);
        }
        if let Some(value) = parse_json(source) {
            return Operand::Literal(value);
        }
        match self.lookup(source) {
            Some(value) => Operand::Bound(value.clone()),
            None => Operand::Unbound(source.to_string()),
        }
    }

    /// Evaluate a switch subject. Unlike other operands, an unbound name
    /// is an error.
    pub fn subject(&self, source: &str) -> Result<Value, EvalError> {
        match self.operand(source) {
            Operand::Literal(value) | Operand::Bound(value) => Ok(value),
            Operand::Unbound(name) => Err(EvalError::UnboundSwitchSubject { name }),
        }
    }

    /// Parse and resolve a `for` target: `name in iterable` or
    /// `first, second in iterable`.
    ///
    /// The iterable is a JSON literal, an inclusive `start..end` range
    /// (bounds are integers or names bound to integers) or a name bound to
    /// a list or map.
    pub fn for_target(&self, target: &str) -> Result<ForTarget, EvalError> {
        let invalid = || EvalError::InvalidLoopTarget {
            target: target.to_string(),
        };
        let mut remaining = target.trim();
        let (names, iterable) = loop_target(&mut remaining).map_err(|_| invalid())?;
        let bindings = match names.as_slice() {
            [name] => Bindings::Single((*name).to_string()),
            [first, second] => Bindings::Pair((*first).to_string(), (*second).to_string()),
            _ => return Err(invalid()),
        };
        let iterable = iterable.trim();
        if iterable.is_empty() {
            return Err(invalid());
        }

        let iterable = if let Some(value) = parse_json(iterable) {
            Iterable::Value(iterable_value(iterable, value)?)
        } else if let Some((start, end)) = iterable.split_once("..") {
            match (self.bound(start), self.bound(end)) {
                (Some(start), Some(end)) => Iterable::Range(start..=end),
                _ => {
                    return Err(EvalError::InvalidRange {
                        range: iterable.to_string(),
                    });
                }
            }
        } else {
            let value = self
                .lookup(iterable)
                .ok_or_else(|| EvalError::IterableNotFound {
                    name: iterable.to_string(),
                })?;
            Iterable::Value(iterable_value(iterable, value.clone())?)
        };

        Ok(ForTarget { bindings, iterable })
    }

    fn bound(&self, source: &str) -> Option<i64> {
        let source = source.trim();
        source
            .parse()
            .ok()
            .or_else(|| self.lookup(source).and_then(Value::as_integer))
    }

    /// Exact name first, then a dotted path such as `user.name`.
    fn lookup(&self, name: &str) -> Option<&'a Value> {
        if name.is_empty() {
            return None;
        }
        if let Some(value) = self.scope.get(name) {
            return Some(value);
        }
        let mut segments = name.split('.');
        let mut value = self.scope.get(segments.next()?)?;
        for segment in segments {
            value = value.as_map()?.get(segment)?;
        }
        Some(value)
    }
}

/// The names bound by each iteration of a loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bindings {
    /// `item in items`: list elements, or map keys.
    Single(String),
    /// `a, b in items`: `(index, element)` for lists, `(key, value)` for maps.
    Pair(String, String),
}

/// What a loop iterates over.
#[derive(Debug, Clone, PartialEq)]
pub enum Iterable {
    Range(RangeInclusive<i64>),
    /// Always a list or a map.
    Value(Value),
}

/// A resolved `for` target.
#[derive(Debug, Clone, PartialEq)]
pub struct ForTarget {
    pub bindings: Bindings,
    pub iterable: Iterable,
}

impl ForTarget {
    /// The bindings for each iteration, in order.
    pub fn frames(&self) -> Frames<'_> {
        let items = match &self.iterable {
            Iterable::Range(range) => Items::Range(range.clone().enumerate()),
            Iterable::Value(Value::Map(map)) => Items::Map(map.iter()),
            Iterable::Value(Value::List(list)) => Items::List(list.iter().enumerate()),
            Iterable::Value(_) => Items::Empty,
        };
        Frames {
            bindings: &self.bindings,
            items,
        }
    }
}

/// Iterator over loop frames, see [`ForTarget::frames`].
#[derive(Debug)]
pub struct Frames<'a> {
    bindings: &'a Bindings,
    items: Items<'a>,
}

#[derive(Debug)]
enum Items<'a> {
    Range(Enumerate<RangeInclusive<i64>>),
    List(Enumerate<SliceIter<'a, Value>>),
    Map(MapIter<'a, String, Value>),
    Empty,
}

impl Iterator for Frames<'_> {
    type Item = Vec<(String, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        // (index or key, element or value, whether a single binding takes the key)
        let (position, item, keyed) = match &mut self.items {
            Items::Range(range) => {
                let (index, n) = range.next()?;
                (Value::from(index), Value::Integer(n), false)
            }
            Items::List(list) => {
                let (index, item) = list.next()?;
                (Value::from(index), item.clone(), false)
            }
            Items::Map(map) => {
                let (key, value) = map.next()?;
                (Value::from(key.as_str()), value.clone(), true)
            }
            Items::Empty => return None,
        };
        Some(match self.bindings {
            Bindings::Single(name) if keyed => vec![(name.clone(), position)],
            Bindings::Single(name) => vec![(name.clone(), item)],
            Bindings::Pair(first, second) => {
                vec![(first.clone(), position), (second.clone(), item)]
            }
        })
    }
}

fn loop_target<'i>(input: &mut &'i str) -> ModalResult<(Vec<&'i str>, &'i str)> {
    (
        separated(1.., identifier, (space0, ',', space0)),
        preceded((space1, "in", space1), rest),
    )
        .parse_next(input)
}

fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_')
        .verify(|name: &str| !name.starts_with(|c: char| c.is_ascii_digit()))
        .parse_next(input)
}

fn iterable_value(name: &str, value: Value) -> Result<Value, EvalError> {
    match value {
        Value::List(_) | Value::Map(_) => Ok(value),
        other => Err(EvalError::NotIterable {
            name: name.to_string(),
            type_name: other.type_name(),
        }),
    }
}

fn compare(left: &Value, operator: &'static str, right: &Value) -> Result<bool, EvalError> {
    let ordering = || {
        left.compare(right).ok_or(EvalError::Incomparable {
            left: left.type_name(),
            operator,
            right: right.type_name(),
        })
    };
    Ok(match operator {
        "==" => left.loose_eq(right),
        "!=" => !left.loose_eq(right),
        ">=" => ordering()? != Ordering::Less,
        "<=" => ordering()? != Ordering::Greater,
        ">" => ordering()? == Ordering::Greater,
        _ => ordering()? == Ordering::Less,
    })
}

fn unquote(source: &str) -> Option<&str> {
    let quote = source.chars().next().filter(|c| matches!(*c, '"' | '\''))?;
    if source.len() >= 2 && source.ends_with(quote) {
        Some(&source[1..source.len() - 1])
    } else {
        None
    }
}

fn parse_number(source: &str) -> Option<Value> {
    if source.contains('.') {
        source
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Float)
    } else {
        source.parse::<i64>().ok().map(Value::Integer)
    }
}

fn parse_json(source: &str) -> Option<Value> {
    if source.starts_with('[') || source.starts_with('{') {
        serde_json::from_str(source).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_must_match() {
        assert_eq!(unquote("'abc'"), Some("abc"));
        assert_eq!(unquote(r#""""#), Some(""));
        assert_eq!(unquote("'abc\""), None);
        assert_eq!(unquote("'"), None);
    }

    #[test]
    fn number_kind_follows_the_dot() {
        assert_eq!(parse_number("42"), Some(Value::Integer(42)));
        assert_eq!(parse_number("-1.5"), Some(Value::Float(-1.5)));
        assert_eq!(parse_number("1..3"), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn loop_target_grammar() {
        let mut input = "k , v in items";
        let (names, iterable) = loop_target(&mut input).unwrap();
        assert_eq!(names, ["k", "v"]);
        assert_eq!(iterable, "items");

        let mut input = "items";
        assert!(loop_target(&mut input).is_err());
    }
}
