//! Time-marker lists (onset, beat and drum-onset times)
//!
//! These lists carry times only, so each source list gets a fixed synthetic
//! strength and tier: onsets are weak, beats medium, drum onsets strong.

use serde_json::Value;

use super::probe::{array_field, is_number_list};
use super::{SchemaClassifier, SchemaKind};
use crate::coercion::numeric::number_list;
use crate::config::IngestConfig;
use crate::records::event::{EventPoint, Layer, StrengthTier};

/// Marker list keys in emission order
pub const MARKER_KEYS: [&str; 3] = ["onset_times_sec", "beat_times_sec", "drum_onset_times_sec"];

/// Classifier for flat time-marker lists
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeMarkerClassifier;

impl TimeMarkerClassifier {
    fn strength_and_tier(key: &str, config: &IngestConfig) -> (f64, StrengthTier) {
        let m = &config.marker_strengths;
        match key {
            "beat_times_sec" => (m.beat, StrengthTier::Medium),
            "drum_onset_times_sec" => (m.drum_onset, StrengthTier::Strong),
            _ => (m.onset, StrengthTier::Weak),
        }
    }
}

impl SchemaClassifier for TimeMarkerClassifier {
    type Output = Vec<EventPoint>;
    const KIND: SchemaKind = SchemaKind::TimeMarkers;

    fn test(&self, doc: &Value, config: &IngestConfig) -> bool {
        MARKER_KEYS.iter().any(|key| {
            array_field(doc, key)
                .map(|times| is_number_list(times, config))
                .unwrap_or(false)
        })
    }

    fn extract(&self, doc: &Value, config: &IngestConfig) -> Vec<EventPoint> {
        let mut events = Vec::new();
        for key in MARKER_KEYS {
            let (strength, tier) = Self::strength_and_tier(key, config);
            let times = number_list(doc.get(key));
            log::debug!("{}: {} marker(s)", key, times.len());
            events.extend(times.into_iter().map(|time| EventPoint {
                time,
                strength,
                texture: None,
                color: config.default_color.clone(),
                layer: Layer::Strength(tier),
                roles: None,
            }));
        }
        events
    }
}
