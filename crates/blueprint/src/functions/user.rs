//! `USER` namespace.
//!
//! A `user` map bound in the render context overrides the injected
//! identity entry by entry.

use indexmap::IndexMap;

use super::capabilities::Identity;
use crate::types::Value;

pub(super) fn name(identity: &dyn Identity, profile: Option<&IndexMap<String, Value>>) -> Value {
    from_profile(profile, "name").unwrap_or_else(|| Value::String(identity.name()))
}

pub(super) fn email(identity: &dyn Identity, profile: Option<&IndexMap<String, Value>>) -> Value {
    from_profile(profile, "email").unwrap_or_else(|| Value::String(identity.email()))
}

fn from_profile(profile: Option<&IndexMap<String, Value>>, key: &str) -> Option<Value> {
    profile?.get(key).map(|value| Value::String(value.to_string()))
}
