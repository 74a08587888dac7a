//! Numeric and scalar coercion
//!
//! Every function here is total: invalid input degrades to the caller-supplied
//! default and nothing panics or returns an error. Documents come from
//! hand-edited files and experimental exporters, so a missing or garbled field
//! must never stop the rest of the record from being read.
//!
//! # Example
//!
//! ```
//! use onset_ingest::coercion::numeric::{clamp01, coerce_number};
//! use serde_json::json;
//!
//! let item = json!({"t": 1.25, "strength": 3.0, "texture": "n/a"});
//! assert_eq!(coerce_number(item.get("t"), 0.0), 1.25);
//! assert_eq!(clamp01(item.get("strength"), 0.7), 1.0);
//! assert_eq!(clamp01(item.get("texture"), 0.5), 0.5);
//! ```

use serde_json::{Map, Value};

/// Interpret a value as a finite real
///
/// Accepts JSON numbers and strings that parse to a finite real (surrounding
/// whitespace ignored). Returns `None` for everything else, including `NaN`
/// and infinities spelled out in strings.
pub fn finite_number(value: Option<&Value>) -> Option<f64> {
    let v = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Numeric interpretation of `value`, or `default` if it is not a finite number
pub fn coerce_number(value: Option<&Value>, default: f64) -> f64 {
    finite_number(value).unwrap_or(default)
}

/// Coerce then clamp into `[0, 1]`
///
/// A missing or non-finite value yields `default` unchanged.
pub fn clamp01(value: Option<&Value>, default: f64) -> f64 {
    finite_number(value)
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(default)
}

/// Non-negative integer interpretation (fraction truncated), or `default`
pub fn coerce_count(value: Option<&Value>, default: usize) -> usize {
    match finite_number(value) {
        Some(v) if v >= 0.0 => v.trunc() as usize,
        _ => default,
    }
}

/// `u32` interpretation for sample rates and frame parameters, or `default`
pub fn coerce_u32(value: Option<&Value>, default: u32) -> u32 {
    match finite_number(value) {
        Some(v) if v >= 0.0 && v <= u32::MAX as f64 => v.trunc() as u32,
        _ => default,
    }
}

/// String interpretation: strings verbatim, numbers and booleans rendered, else `default`
pub fn coerce_string(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

/// Non-empty string, or `None`
pub fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Truthiness: booleans verbatim, numbers are true when non-zero, else `default`
pub fn coerce_bool(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(default),
        _ => default,
    }
}

/// First alias among `keys` whose value is a finite number
///
/// Aliases are tried in order, so `first_number(item, &["t", "time"])` prefers
/// `t` but falls back to `time` when `t` is absent or unusable.
pub fn first_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| finite_number(obj.get(*k)))
}

/// First alias among `keys` holding a JSON object
pub fn first_object<'a>(
    obj: &'a Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Map<String, Value>> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_object))
}

/// Finite numbers of an array, other elements dropped
pub fn number_list(value: Option<&Value>) -> Vec<f64> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| finite_number(Some(v))).collect())
        .unwrap_or_default()
}

/// Strings of an array (numbers rendered), other elements dropped
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finite_number_sources() {
        assert_eq!(finite_number(Some(&json!(2.5))), Some(2.5));
        assert_eq!(finite_number(Some(&json!(-3))), Some(-3.0));
        assert_eq!(finite_number(Some(&json!(" 0.25 "))), Some(0.25));
        assert_eq!(finite_number(Some(&json!("NaN"))), None);
        assert_eq!(finite_number(Some(&json!("inf"))), None);
        assert_eq!(finite_number(Some(&json!("abc"))), None);
        assert_eq!(finite_number(Some(&json!(true))), None);
        assert_eq!(finite_number(Some(&json!(null))), None);
        assert_eq!(finite_number(Some(&json!([1.0]))), None);
        assert_eq!(finite_number(None), None);
    }

    #[test]
    fn test_clamp01_bounds() {
        for raw in [-5.0, -0.0, 0.0, 0.3, 1.0, 1.0001, 42.0, -1e300, 1e300] {
            let v = clamp01(Some(&json!(raw)), 0.7);
            assert!((0.0..=1.0).contains(&v), "clamp01({}) = {}", raw, v);
        }
        assert_eq!(clamp01(Some(&json!(0.42)), 0.7), 0.42);
    }

    #[test]
    fn test_clamp01_default_passthrough() {
        assert_eq!(clamp01(None, 0.7), 0.7);
        assert_eq!(clamp01(Some(&json!("NaN")), 0.7), 0.7);
        assert_eq!(clamp01(Some(&json!({})), 0.25), 0.25);
        // The default is returned as-is, not clamped
        assert_eq!(clamp01(None, 3.0), 3.0);
    }

    #[test]
    fn test_integer_coercions() {
        assert_eq!(coerce_count(Some(&json!(12.9)), 0), 12);
        assert_eq!(coerce_count(Some(&json!(-1)), 7), 7);
        assert_eq!(coerce_u32(Some(&json!(44100)), 22050), 44100);
        assert_eq!(coerce_u32(Some(&json!(1e12)), 22050), 22050);
        assert_eq!(coerce_u32(Some(&json!("x")), 256), 256);
    }

    #[test]
    fn test_string_and_bool() {
        assert_eq!(coerce_string(Some(&json!("drums.wav")), ""), "drums.wav");
        assert_eq!(coerce_string(Some(&json!(7)), ""), "7");
        assert_eq!(coerce_string(Some(&json!(null)), "unknown"), "unknown");
        assert_eq!(non_empty_string(Some(&json!(""))), None);
        assert!(coerce_bool(Some(&json!(true)), false));
        assert!(coerce_bool(Some(&json!(1)), false));
        assert!(!coerce_bool(Some(&json!(0)), true));
        assert!(coerce_bool(Some(&json!("yes")), true));
    }

    #[test]
    fn test_first_number_aliases() {
        let item = json!({"t": "garbled", "time": 3.5});
        let obj = item.as_object().unwrap();
        assert_eq!(first_number(obj, &["t", "time"]), Some(3.5));
        assert_eq!(first_number(obj, &["missing"]), None);
    }

    #[test]
    fn test_lists_drop_malformed_entries() {
        let v = json!([1.0, "2.5", null, {"t": 3}, 4]);
        assert_eq!(number_list(Some(&v)), vec![1.0, 2.5, 4.0]);

        let v = json!(["low", 3, null, ["x"]]);
        assert_eq!(string_list(Some(&v)), vec!["low".to_string(), "3".to_string()]);

        assert!(number_list(Some(&json!("not an array"))).is_empty());
    }
}
