//! Field probing over loosely-shaped JSON objects
//!
//! Upstream payloads name the same concept differently across API versions,
//! so each semantic field is read through an ordered table of candidate
//! paths and the first usable value wins.

use serde_json::Value;

/// Keys leading to a value, at most one nested object deep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static [&'static str]);

impl FieldPath {
    pub const fn top(key: &'static [&'static str; 1]) -> Self {
        FieldPath(key)
    }

    pub const fn nested(keys: &'static [&'static str; 2]) -> Self {
        FieldPath(keys)
    }

    /// Walk the path, returning the value at its end
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(value, |current, key| current.as_object()?.get(*key))
    }
}

/// Render a scalar as text. Containers and null render as nothing.
pub fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Coerce a value into a positive integral identifier.
///
/// Accepts JSON numbers and numeric strings. Zero, negatives, fractions and
/// non-finite values are treated as absent.
pub fn as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(id) = n.as_u64() {
                return (id > 0).then_some(id);
            }
            n.as_f64().and_then(id_from_f64)
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<u64>() {
                Ok(id) => (id > 0).then_some(id),
                Err(_) => trimmed.parse::<f64>().ok().and_then(id_from_f64),
            }
        }
        _ => None,
    }
}

fn id_from_f64(n: f64) -> Option<u64> {
    // u64::MAX as f64 rounds up, so compare strictly below it
    if n.is_finite() && n.fract() == 0.0 && n > 0.0 && n < u64::MAX as f64 {
        Some(n as u64)
    } else {
        None
    }
}

/// First non-empty text found along `paths`, or an empty string
pub fn first_text(value: &Value, paths: &[FieldPath]) -> String {
    paths
        .iter()
        .find_map(|path| path.lookup(value).and_then(as_text))
        .unwrap_or_default()
}

/// First identifier found along `paths`
pub fn first_id(value: &Value, paths: &[FieldPath]) -> Option<u64> {
    paths
        .iter()
        .find_map(|path| path.lookup(value).and_then(as_id))
}
