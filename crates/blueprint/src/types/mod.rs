mod value;

use std::collections::HashMap;

pub use value::Value;

/// Name to value mapping supplied to a render call.
pub type Context = HashMap<String, Value>;
