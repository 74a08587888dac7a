//! Canonical record assembly
//!
//! Turns a raw event array into canonical event points:
//! 1. Drop elements that are not objects (silently, counted at debug level)
//! 2. Coerce time, strength, texture, color, layer and roles per element
//! 3. Pick a labelling mode for the whole document:
//!    - role mode when any event carries roles or a precision-tier layer;
//!      tertile derivation is skipped
//!    - strength mode otherwise; every event gets a tertile label and any
//!      supplied non-precision label is replaced
//! 4. Fill colors from the primary precision tier where the source gave none

use serde_json::{Map, Value};

use crate::coercion::numeric::{clamp01, finite_number, first_number, non_empty_string};
use crate::config::IngestConfig;
use crate::derivation::roles::resolve_roles;
use crate::derivation::tiers::TierThresholds;
use crate::records::event::{EventPoint, Layer, PrecisionTier, Roles};

/// Time aliases for canonical events, in preference order
pub const CANONICAL_TIME_KEYS: [&str; 2] = ["t", "time"];

/// Object elements of a raw array; everything else is dropped
pub fn object_items<'a>(items: &'a [Value], context: &str) -> Vec<&'a Map<String, Value>> {
    let objects: Vec<&Map<String, Value>> = items.iter().filter_map(Value::as_object).collect();
    let dropped = items.len() - objects.len();
    if dropped > 0 {
        log::debug!(
            "{}: dropped {} malformed element(s) of {}",
            context,
            dropped,
            items.len()
        );
    }
    objects
}

/// Per-element fields before document-level labelling
#[derive(Debug)]
struct Draft {
    time: f64,
    strength: f64,
    texture: Option<f64>,
    color: Option<String>,
    layer: Option<Layer>,
    roles: Option<Roles>,
}

impl Draft {
    fn from_object(obj: &Map<String, Value>, config: &IngestConfig) -> Self {
        Self {
            time: first_number(obj, &CANONICAL_TIME_KEYS).unwrap_or(0.0),
            strength: clamp01(obj.get("strength"), config.default_strength),
            texture: finite_number(obj.get("texture")).map(|v| v.clamp(0.0, 1.0)),
            color: non_empty_string(obj.get("color")),
            layer: non_empty_string(obj.get("layer")).map(Layer::from),
            roles: resolve_roles(obj.get("roles")),
        }
    }

    fn is_role_bearing(&self) -> bool {
        self.roles.is_some() || self.layer.as_ref().and_then(Layer::precision).is_some()
    }

    /// Precision tier used for default coloring and the fallback layer
    fn primary_tier(&self) -> PrecisionTier {
        match (&self.roles, &self.layer) {
            (Some(roles), _) => roles.primary(),
            (None, Some(layer)) => layer.precision().unwrap_or(PrecisionTier::P0),
            (None, None) => PrecisionTier::P0,
        }
    }
}

/// Assemble canonical event points from a raw event array
///
/// # Example
///
/// ```
/// use onset_ingest::assembly::canonical::assemble_events;
/// use onset_ingest::IngestConfig;
/// use serde_json::json;
///
/// let raw = json!([{"t": 0.0, "strength": 0.2}, null, {"time": 1.0, "strength": 0.9}]);
/// let events = assemble_events(raw.as_array().unwrap(), &IngestConfig::default());
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[1].time, 1.0);
/// assert_eq!(events[1].layer.as_str(), "강함");
/// ```
pub fn assemble_events(items: &[Value], config: &IngestConfig) -> Vec<EventPoint> {
    let drafts: Vec<Draft> = object_items(items, "events")
        .into_iter()
        .map(|obj| Draft::from_object(obj, config))
        .collect();

    let role_mode = drafts.iter().any(Draft::is_role_bearing);
    log::debug!(
        "Assembling {} canonical events ({} mode)",
        drafts.len(),
        if role_mode { "role" } else { "strength" }
    );

    if role_mode {
        drafts.into_iter().map(|d| finish_role(d, config)).collect()
    } else {
        let strengths: Vec<f64> = drafts.iter().map(|d| d.strength).collect();
        let thresholds = TierThresholds::from_strengths(&strengths, config);
        drafts
            .into_iter()
            .map(|d| finish_strength(d, &thresholds, config))
            .collect()
    }
}

fn finish_role(draft: Draft, config: &IngestConfig) -> EventPoint {
    let primary = draft.primary_tier();
    EventPoint {
        time: draft.time,
        strength: draft.strength,
        texture: draft.texture,
        color: draft
            .color
            .unwrap_or_else(|| config.layer_colors.for_tier(primary).to_string()),
        layer: draft.layer.unwrap_or(Layer::Precision(primary)),
        roles: draft.roles,
    }
}

fn finish_strength(draft: Draft, thresholds: &TierThresholds, config: &IngestConfig) -> EventPoint {
    EventPoint {
        time: draft.time,
        strength: draft.strength,
        texture: draft.texture,
        color: draft.color.unwrap_or_else(|| config.default_color.clone()),
        layer: Layer::Strength(thresholds.classify(draft.strength)),
        roles: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::event::StrengthTier;
    use serde_json::json;

    fn assemble(raw: Value) -> Vec<EventPoint> {
        assemble_events(raw.as_array().unwrap(), &IngestConfig::default())
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let events = assemble(json!([{}]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time, 0.0);
        assert_eq!(events[0].strength, 0.7);
        assert_eq!(events[0].texture, None);
        assert_eq!(events[0].color, "#5a9fd4");
        assert!(events[0].roles.is_none());
    }

    #[test]
    fn test_coercion_and_clamping() {
        let events = assemble(json!([
            {"t": "1.5", "strength": 4.0, "texture": -2.0, "color": "#ff0000"},
            {"t": null, "time": 2.0, "strength": "loud", "texture": "rough", "color": ""}
        ]));
        assert_eq!(events[0].time, 1.5);
        assert_eq!(events[0].strength, 1.0);
        assert_eq!(events[0].texture, Some(0.0));
        assert_eq!(events[0].color, "#ff0000");
        assert_eq!(events[1].time, 2.0);
        assert_eq!(events[1].strength, 0.7);
        assert_eq!(events[1].texture, None);
        assert_eq!(events[1].color, "#5a9fd4");
    }

    #[test]
    fn test_malformed_elements_dropped() {
        let events = assemble(json!([1, "x", null, [0.5], {"t": 3.0}, true]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time, 3.0);
    }

    #[test]
    fn test_strength_mode_tertiles() {
        let events = assemble(json!([
            {"t": 0.0, "strength": 0.9},
            {"t": 1.0, "strength": 0.1},
            {"t": 2.0, "strength": 0.5},
            {"t": 3.0, "strength": 0.3},
            {"t": 4.0, "strength": 0.7},
            {"t": 5.0, "strength": 0.2}
        ]));
        let labels: Vec<&str> = events.iter().map(|e| e.layer.as_str()).collect();
        // lower = 0.2, upper = 0.5
        assert_eq!(labels, vec!["강함", "약함", "강함", "중간", "강함", "중간"]);
    }

    #[test]
    fn test_supplied_label_replaced_by_tertile() {
        let events = assemble(json!([
            {"t": 0.0, "strength": 0.1, "layer": "ghost"},
            {"t": 1.0, "strength": 0.9}
        ]));
        assert_eq!(events[0].layer, Layer::Strength(StrengthTier::Medium));
        assert_eq!(events[1].layer, Layer::Strength(StrengthTier::Strong));
    }

    #[test]
    fn test_onset_layer_export_gets_tertiles() {
        let events = assemble(json!([
            {"t": 0.0, "strength": 0.1, "layer": "onset"},
            {"t": 1.0, "strength": 0.5, "layer": "onset"},
            {"t": 2.0, "strength": 0.9, "layer": "onset"},
            {"t": 3.0, "strength": 0.05, "layer": "onset"},
            {"t": 4.0, "strength": 0.7, "layer": "onset"},
            {"t": 5.0, "strength": 0.3, "layer": "onset"}
        ]));
        let labels: Vec<&str> = events.iter().map(|e| e.layer.as_str()).collect();
        // lower = 0.1, upper = 0.5
        assert_eq!(labels, vec!["중간", "강함", "강함", "약함", "강함", "중간"]);
    }

    #[test]
    fn test_role_mode_primary_and_colors() {
        let events = assemble(json!([
            {"t": 0.0, "roles": {"P0": ["low"], "P1": ["mid"], "P2": []}},
            {"t": 0.5, "roles": {"P0": ["low"], "P1": [], "P2": ["high"]}},
            {"t": 1.0, "roles": {"P0": "mid"}},
            {"t": 1.5, "strength": 0.2}
        ]));
        assert_eq!(events[0].layer, Layer::Precision(PrecisionTier::P1));
        assert_eq!(events[0].color, "#f39c12");
        assert_eq!(events[1].layer, Layer::Precision(PrecisionTier::P2));
        assert_eq!(events[1].color, "#3498db");
        assert_eq!(events[2].layer, Layer::Precision(PrecisionTier::P0));
        assert_eq!(events[2].roles.as_ref().unwrap().p0, vec!["mid"]);
        // no roles in a role-mode document: lowest tier, no tertile
        assert_eq!(events[3].layer, Layer::Precision(PrecisionTier::P0));
        assert!(events[3].roles.is_none());
    }

    #[test]
    fn test_explicit_precision_layer_skips_tertiles() {
        let events = assemble(json!([
            {"t": 0.0, "strength": 0.9, "layer": "P2"},
            {"t": 1.0, "strength": 0.1}
        ]));
        assert_eq!(events[0].layer, Layer::Precision(PrecisionTier::P2));
        assert_eq!(events[0].color, "#3498db");
        assert_eq!(events[1].layer, Layer::Precision(PrecisionTier::P0));
    }

    #[test]
    fn test_supplied_layer_wins_over_primary() {
        let events = assemble(json!([
            {"t": 0.0, "layer": "P0", "color": "#123456", "roles": {"P2": ["high"]}}
        ]));
        assert_eq!(events[0].layer, Layer::Precision(PrecisionTier::P0));
        assert_eq!(events[0].color, "#123456");
    }

    #[test]
    fn test_malformed_roles_fall_back_to_tertiles() {
        let events = assemble(json!([
            {"t": 0.0, "strength": 0.1, "roles": 7},
            {"t": 1.0, "strength": 0.5},
            {"t": 2.0, "strength": 0.9, "roles": ["P0"]}
        ]));
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.roles.is_none()));
        assert!(events.iter().all(|e| matches!(e.layer, Layer::Strength(_))));
    }
}
