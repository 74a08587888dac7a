//! Bounded structural sampling for signature tests
//!
//! Signature tests look at key presence and the shape of the first few array
//! elements only. They never walk a whole array, and never assume every
//! element has the same shape.

use serde_json::{Map, Value};

use crate::coercion::numeric::{finite_number, first_object};
use crate::config::IngestConfig;

/// Keys under which feature tables carry their metadata object
pub const METADATA_KEYS: [&str; 2] = ["metadata", "meta"];

/// Top-level object of a document, if it is one
pub fn root_object(doc: &Value) -> Option<&Map<String, Value>> {
    doc.as_object()
}

/// Array stored under `key` in an object document
pub fn array_field<'a>(doc: &'a Value, key: &str) -> Option<&'a [Value]> {
    doc.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

/// Metadata object of a feature table (`metadata`, then `meta`)
pub fn metadata_object(doc: &Value) -> Option<&Map<String, Value>> {
    root_object(doc).and_then(|obj| first_object(obj, &METADATA_KEYS))
}

/// Number of leading elements a signature may inspect
///
/// At least one, so a zero `probe_limit` still lets signatures see the head
/// of each array.
pub fn probe_window(config: &IngestConfig) -> usize {
    config.probe_limit.max(1)
}

/// Object elements among the first `probe_limit` items
pub fn sample<'a>(
    items: &'a [Value],
    config: &IngestConfig,
) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
    items
        .iter()
        .take(probe_window(config))
        .filter_map(Value::as_object)
}

/// True if any sampled object carries at least one of `keys`
pub fn any_has_key(items: &[Value], keys: &[&str], config: &IngestConfig) -> bool {
    sample(items, config).any(|obj| keys.iter().any(|k| obj.contains_key(*k)))
}

/// True if the sampled head of `items` reads as a list of times
///
/// An empty list qualifies. Otherwise no sampled element may be nested, and
/// at least one must be a finite number (numeric strings count).
pub fn is_number_list(items: &[Value], config: &IngestConfig) -> bool {
    if items.is_empty() {
        return true;
    }
    let head = &items[..items.len().min(probe_window(config))];
    head.iter().all(|v| !v.is_object() && !v.is_array())
        && head.iter().any(|v| finite_number(Some(v)).is_some())
}

/// Feature-table signature: a metadata object, an `events` array, and at
/// least one sampled event carrying one of `feature_keys`
pub fn feature_table(doc: &Value, feature_keys: &[&str], config: &IngestConfig) -> bool {
    if metadata_object(doc).is_none() {
        return false;
    }
    match array_field(doc, "events") {
        Some(events) => any_has_key(events, feature_keys, config),
        None => false,
    }
}
