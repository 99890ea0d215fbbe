//! `RANDOM` namespace.

use uuid::Builder;

use super::args::Call;
use super::capabilities::Entropy;
use crate::interpreter::EvalError;
use crate::types::Value;

/// An integer in `[min, max]`, both ends inclusive.
pub(super) fn number(entropy: &dyn Entropy, call: Call<'_>) -> Result<Value, EvalError> {
    let min = call.integer(0)?;
    let max = call.integer(1)?;
    if min > max {
        return Err(call.invalid(format!("min {min} is greater than max {max}")));
    }
    Ok(Value::Integer(entropy.integer(min..=max)))
}

pub(super) fn uuid(entropy: &dyn Entropy) -> Value {
    let uuid = Builder::from_random_bytes(entropy.uuid_bytes()).into_uuid();
    Value::String(uuid.to_string())
}

/// Letters and digits; a negative length gives an empty string.
pub(super) fn string(entropy: &dyn Entropy, call: Call<'_>) -> Result<Value, EvalError> {
    let len = usize::try_from(call.integer(0)?).unwrap_or(0);
    Ok(Value::String(entropy.alphanumeric(len)))
}
