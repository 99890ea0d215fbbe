//! Argument access and coercion for function calls.

use crate::interpreter::EvalError;
use crate::types::Value;

/// The arguments of one function call, with coercion helpers that report
/// failures against the called function.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Call<'a> {
    pub function: &'static str,
    pub args: &'a [Value],
}

impl Call<'_> {
    /// Argument `index` as a number. Integers, floats, booleans and numeric
    /// strings are accepted.
    pub fn number(&self, index: usize) -> Result<f64, EvalError> {
        let value = self.required(index)?;
        to_number(value).ok_or_else(|| self.invalid(format!("expected a number, got '{value}'")))
    }

    /// Argument `index` as an integer. Floats truncate toward zero.
    pub fn integer(&self, index: usize) -> Result<i64, EvalError> {
        let value = self.required(index)?;
        to_integer(value)
            .ok_or_else(|| self.invalid(format!("expected an integer, got '{value}'")))
    }

    pub fn integer_or(&self, index: usize, default: i64) -> Result<i64, EvalError> {
        match self.args.get(index) {
            Some(_) => self.integer(index),
            None => Ok(default),
        }
    }

    /// Argument `index` in display form.
    pub fn text(&self, index: usize) -> Result<String, EvalError> {
        self.required(index).map(ToString::to_string)
    }

    pub fn text_or(&self, index: usize, default: &str) -> String {
        self.args
            .get(index)
            .map_or_else(|| default.to_string(), ToString::to_string)
    }

    /// Every argument as a number.
    pub fn numbers(&self) -> Result<Vec<f64>, EvalError> {
        (0..self.args.len()).map(|index| self.number(index)).collect()
    }

    pub fn invalid(&self, message: impl Into<String>) -> EvalError {
        EvalError::InvalidArgument {
            function: self.function,
            message: message.into(),
        }
    }

    fn required(&self, index: usize) -> Result<&Value, EvalError> {
        self.args
            .get(index)
            .ok_or_else(|| self.invalid(format!("missing argument {}", index + 1)))
    }
}

fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::String(s) => s.trim().parse().ok(),
        Value::List(_) | Value::Map(_) => None,
    }
}

fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(n) => Some(*n),
        Value::Float(n) if n.is_finite() => Some(n.trunc() as i64),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Float(_) | Value::List(_) | Value::Map(_) => None,
    }
}
