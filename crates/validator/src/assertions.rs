//! Predicate helpers used inside checks.
//!
//! Each helper returns `Err(CheckError::Assertion)` when its condition does
//! not hold, so a check body can chain them with `?` and stop at the first
//! failure.

use serde_json::Value;

use crate::error::CheckError;

/// Fail with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<(), CheckError> {
    if condition {
        Ok(())
    } else {
        Err(CheckError::Assertion(message.into()))
    }
}

/// Fail unless `actual` equals `expected`.
///
/// The failure message carries both values:
/// `"<message>\n  Expected: <expected>\n  Actual: <actual>"`.
pub fn ensure_eq(
    actual: Option<&Value>,
    expected: impl Into<Value>,
    message: &str,
) -> Result<(), CheckError> {
    let expected = expected.into();
    match actual {
        Some(actual) if json_eq(actual, &expected) => Ok(()),
        _ => Err(CheckError::Assertion(format!(
            "{message}\n  Expected: {}\n  Actual: {}",
            render(Some(&expected)),
            render(actual),
        ))),
    }
}

/// Unwrap `value`, failing with `message` when it is absent or JSON `null`.
pub fn ensure_exists<'a>(value: Option<&'a Value>, message: &str) -> Result<&'a Value, CheckError> {
    match value {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(CheckError::Assertion(message.to_owned())),
    }
}

/// Unwrap a lookup that has no JSON representation (e.g. a node view).
pub fn ensure_found<T>(value: Option<T>, message: &str) -> Result<T, CheckError> {
    value.ok_or_else(|| CheckError::Assertion(message.to_owned()))
}

/// Fail unless `value` is a string containing `fragment`.
pub fn ensure_contains(
    value: Option<&Value>,
    fragment: &str,
    message: &str,
) -> Result<(), CheckError> {
    let contains = value
        .and_then(Value::as_str)
        .is_some_and(|s| s.contains(fragment));
    ensure(contains, message)
}

/// Substitute `default` for an unset value.
///
/// Only absent, `null`, and empty-string values count as unset. Other
/// falsy-looking values such as `false` or `0` are kept, so they are
/// compared (and usually rejected) rather than silently replaced.
pub fn with_default<'a>(value: Option<&'a Value>, default: &'a Value) -> &'a Value {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::String(s)) if s.is_empty() => default,
        Some(v) => v,
    }
}

/// Strict equality, except that numbers compare by numeric value.
fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Human-readable rendering: strings unquoted, missing values as `undefined`.
fn render(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
