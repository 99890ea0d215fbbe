//! `FORMAT` namespace.

use super::args::Call;
use crate::interpreter::EvalError;
use crate::types::Value;

pub(super) fn currency(call: Call<'_>) -> Result<Value, EvalError> {
    let amount = call.number(0)?;
    let symbol = call.text_or(1, "$");
    Ok(Value::String(format!("{symbol}{}", grouped(amount, 2))))
}

pub(super) fn number(call: Call<'_>) -> Result<Value, EvalError> {
    let value = call.number(0)?;
    let decimals = call.integer_or(1, 2)?;
    let decimals = usize::try_from(decimals)
        .map_err(|_| call.invalid(format!("decimal places must not be negative, got {decimals}")))?;
    Ok(Value::String(grouped(value, decimals)))
}

/// Ten digits format as `(555) 123-4567`; anything else yields just the
/// digits.
pub(super) fn phone(call: Call<'_>) -> Result<Value, EvalError> {
    let digits: String = call
        .text(0)?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.len() == 10 {
        return Ok(Value::String(format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..]
        )));
    }
    Ok(Value::String(digits))
}

pub(super) fn percent(call: Call<'_>) -> Result<Value, EvalError> {
    let value = call.number(0)?;
    Ok(Value::String(format!("{:.1}%", value * 100.0)))
}

/// Fixed-point with `,` between thousands.
fn grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut output = String::with_capacity(fixed.len() * 2);
    if value.is_sign_negative() {
        output.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            output.push(',');
        }
        output.push(digit);
    }
    if let Some(fraction) = fraction {
        output.push('.');
        output.push_str(fraction);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(grouped(999.0, 0), "999");
        assert_eq!(grouped(-1000.5, 1), "-1,000.5");
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert_eq!(grouped(f64::INFINITY, 2), "inf");
    }
}
