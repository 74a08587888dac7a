//! Role resolution
//!
//! A role structure maps each precision tier to the bands that contribute to
//! it. One event can belong to several tiers at once; the primary tier picks
//! its default color and fallback layer.

use serde_json::Value;

use crate::coercion::numeric::string_list;
use crate::records::event::{PrecisionTier, Roles};

/// Extract a role structure from a raw `roles` field
///
/// Returns `None` when the field is absent or is not an object (an array or a
/// number is dropped, never fatal). Missing tier keys default to empty lists,
/// and a tier holding a single string is read as a one-element list.
///
/// # Example
///
/// ```
/// use onset_ingest::derivation::roles::resolve_roles;
/// use onset_ingest::records::event::PrecisionTier;
/// use serde_json::json;
///
/// let roles = resolve_roles(Some(&json!({"P0": "low", "P2": ["hat"]}))).unwrap();
/// assert_eq!(roles.p0, vec!["low"]);
/// assert!(roles.p1.is_empty());
/// assert_eq!(roles.primary(), PrecisionTier::P2);
///
/// assert!(resolve_roles(Some(&json!([1, 2]))).is_none());
/// ```
pub fn resolve_roles(value: Option<&Value>) -> Option<Roles> {
    let obj = value?.as_object()?;
    let tier = |key: &str| match obj.get(key) {
        Some(Value::String(band)) => vec![band.clone()],
        other => string_list(other),
    };

    Some(Roles {
        p0: tier("P0"),
        p1: tier("P1"),
        p2: tier("P2"),
    })
}

impl Roles {
    /// Primary tier by descending precedence
    ///
    /// `P2` if it has bands, else `P1` if it has bands, else `P0` (even when
    /// `P0` is empty too).
    pub fn primary(&self) -> PrecisionTier {
        if self.contains(PrecisionTier::P2) {
            PrecisionTier::P2
        } else if self.contains(PrecisionTier::P1) {
            PrecisionTier::P1
        } else {
            PrecisionTier::P0
        }
    }
}
