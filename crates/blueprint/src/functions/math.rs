//! `MATH` namespace.

use super::args::Call;
use crate::interpreter::EvalError;
use crate::types::Value;

pub(super) fn round(call: Call<'_>) -> Result<Value, EvalError> {
    let value = call.number(0)?;
    let decimals = call.integer_or(1, 0)?;
    let decimals =
        i32::try_from(decimals).map_err(|_| call.invalid("decimal places out of range"))?;
    Ok(Value::Float(round_half_even(value, decimals)))
}

pub(super) fn sum(call: Call<'_>) -> Result<Value, EvalError> {
    let values = call.numbers()?;
    if values.is_empty() {
        return Ok(Value::Integer(0));
    }
    Ok(Value::Float(values.iter().sum()))
}

pub(super) fn avg(call: Call<'_>) -> Result<Value, EvalError> {
    let values = call.numbers()?;
    if values.is_empty() {
        return Ok(Value::Integer(0));
    }
    Ok(Value::Float(values.iter().sum::<f64>() / values.len() as f64))
}

pub(super) fn percentage(call: Call<'_>) -> Result<Value, EvalError> {
    let value = call.number(0)?;
    let total = call.number(1)?;
    if total == 0.0 {
        return Ok(Value::Integer(0));
    }
    Ok(Value::Float(value / total * 100.0))
}

pub(super) fn min(call: Call<'_>) -> Result<Value, EvalError> {
    let values = call.numbers()?;
    Ok(Value::Float(values.into_iter().fold(f64::INFINITY, f64::min)))
}

pub(super) fn max(call: Call<'_>) -> Result<Value, EvalError> {
    let values = call.numbers()?;
    Ok(Value::Float(values.into_iter().fold(f64::NEG_INFINITY, f64::max)))
}

/// Digits after the point beyond which every finite `f64` is already exact.
const EXACT_PLACES: usize = 1074;

/// Round to `decimals` places, ties to even, judged on the exact binary
/// value: `2.675` is stored just below the tie and rounds to `2.67`.
///
/// Negative `decimals` round to tens, hundreds and so on.
fn round_half_even(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match usize::try_from(decimals) {
        Ok(places) if places >= EXACT_PLACES => value,
        // Fixed-precision formatting rounds the exact expansion, ties to even.
        Ok(places) => format!("{:.*}", places, value).parse().unwrap_or(value),
        Err(_) => {
            let factor = 10f64.powi(decimals.saturating_neg());
            if !factor.is_finite() {
                return 0.0_f64.copysign(value);
            }
            (value / factor).round_ties_even() * factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_round_to_even() {
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(1250.0, -2), 1200.0);
        assert_eq!(round_half_even(1350.0, -2), 1400.0);
        assert_eq!(round_half_even(0.125, 2), 0.12);
        assert_eq!(round_half_even(1.5, -400), 0.0);
    }

    #[test]
    fn rounds_the_stored_value_not_its_literal() {
        // 2.675 is stored as 2.67499999999999982236431605997495353221893310546875.
        assert_eq!(round_half_even(2.675, 2), 2.67);
        assert_eq!(round_half_even(1.005, 2), 1.0);
        assert_eq!(round_half_even(-2.675, 2), -2.67);
    }

    #[test]
    fn huge_precision_is_a_no_op() {
        assert_eq!(round_half_even(1.5, 400), 1.5);
    }
}
