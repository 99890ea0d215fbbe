//! `STRING` namespace.

use unicode_segmentation::UnicodeSegmentation;

use super::args::Call;
use crate::interpreter::EvalError;
use crate::types::Value;

pub(super) fn upper(call: Call<'_>) -> Result<Value, EvalError> {
    Ok(Value::String(call.text(0)?.to_uppercase()))
}

pub(super) fn lower(call: Call<'_>) -> Result<Value, EvalError> {
    Ok(Value::String(call.text(0)?.to_lowercase()))
}

/// First grapheme upper-cased, the rest lower-cased.
pub(super) fn capitalize(call: Call<'_>) -> Result<Value, EvalError> {
    let text = call.text(0)?;
    let mut graphemes = text.graphemes(true);
    let capitalized = match graphemes.next() {
        Some(first) => first.to_uppercase() + &graphemes.as_str().to_lowercase(),
        None => String::new(),
    };
    Ok(Value::String(capitalized))
}

pub(super) fn replace(call: Call<'_>) -> Result<Value, EvalError> {
    let text = call.text(0)?;
    let find = call.text(1)?;
    let replacement = call.text(2)?;
    Ok(Value::String(text.replace(&find, &replacement)))
}

pub(super) fn trim(call: Call<'_>) -> Result<Value, EvalError> {
    Ok(Value::from(call.text(0)?.trim()))
}

/// Length in characters, not bytes.
pub(super) fn length(call: Call<'_>) -> Result<Value, EvalError> {
    Ok(Value::from(call.text(0)?.chars().count()))
}
