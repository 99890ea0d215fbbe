//! `DATE` namespace.

use chrono::{Datelike, NaiveDateTime};

use super::args::Call;
use super::capabilities::Clock;
use crate::interpreter::EvalError;
use crate::types::Value;

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Pattern tokens and the fields they stand for. Matching is
/// case-sensitive: `MM` is the month, `mm` the minute.
const TOKENS: [(&str, &str); 6] = [
    ("YYYY", "%Y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];

pub(super) fn now(clock: &dyn Clock) -> Value {
    Value::String(clock.now().format(TIMESTAMP).to_string())
}

pub(super) fn year(clock: &dyn Clock) -> Value {
    Value::from(clock.now().year())
}

pub(super) fn month(clock: &dyn Clock) -> Value {
    Value::from(clock.now().month())
}

pub(super) fn day(clock: &dyn Clock) -> Value {
    Value::from(clock.now().day())
}

pub(super) fn format(clock: &dyn Clock, call: Call<'_>) -> Result<Value, EvalError> {
    let pattern = call.text(0)?;
    Ok(Value::String(format_pattern(clock.now(), &pattern)))
}

/// Substitute pattern tokens; every other character is copied as is.
fn format_pattern(moment: NaiveDateTime, pattern: &str) -> String {
    let mut output = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        match TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            Some((token, field)) => {
                output.push_str(&moment.format(field).to_string());
                rest = &rest[token.len()..];
            }
            None => {
                output.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    output
}
