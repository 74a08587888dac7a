//! Onset clarity tables

use serde_json::Value;

use super::probe::{array_field, feature_table, metadata_object};
use super::{SchemaClassifier, SchemaKind};
use crate::assembly::canonical::object_items;
use crate::coercion::numeric::{clamp01, coerce_number, first_number};
use crate::config::IngestConfig;
use crate::records::clarity::{ClarityEvent, ClarityRecordSet};
use crate::records::metadata::Metadata;

/// Time aliases for feature tables, in preference order
pub const FEATURE_TIME_KEYS: [&str; 2] = ["time", "t"];

/// Event keys that identify a clarity table
pub const CLARITY_KEYS: [&str; 2] = ["attack_time_ms", "clarity_score"];

/// Classifier for onset clarity tables
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarityClassifier;

impl SchemaClassifier for ClarityClassifier {
    type Output = ClarityRecordSet;
    const KIND: SchemaKind = SchemaKind::Clarity;

    fn test(&self, doc: &Value, config: &IngestConfig) -> bool {
        feature_table(doc, &CLARITY_KEYS, config)
    }

    fn extract(&self, doc: &Value, config: &IngestConfig) -> ClarityRecordSet {
        let items = array_field(doc, "events").unwrap_or(&[]);
        let events: Vec<ClarityEvent> = object_items(items, "clarity events")
            .into_iter()
            .map(|obj| ClarityEvent {
                time: first_number(obj, &FEATURE_TIME_KEYS).unwrap_or(0.0),
                strength: clamp01(obj.get("strength"), config.feature_strength_default),
                attack_time_ms: coerce_number(obj.get("attack_time_ms"), 0.0),
                clarity_score: coerce_number(obj.get("clarity_score"), 0.0),
            })
            .collect();

        let meta = Metadata::from_fields(metadata_object(doc), events.len());
        log::debug!("Clarity: {} events from '{}'", events.len(), meta.source);
        ClarityRecordSet { events, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signature() {
        let config = IngestConfig::default();
        let doc = json!({
            "metadata": {},
            "events": [{"time": 0.1}, {"time": 0.2, "attack_time_ms": 4.0}]
        });
        assert!(ClarityClassifier.test(&doc, &config));
        let no_feature = json!({"metadata": {}, "events": [{"time": 0.1}]});
        assert!(!ClarityClassifier.test(&no_feature, &config));
        let no_meta = json!({"events": [{"clarity_score": 0.4}]});
        assert!(!ClarityClassifier.test(&no_meta, &config));
    }

    #[test]
    fn test_extract() {
        let config = IngestConfig::default();
        let doc = json!({
            "meta": {"source": "snare.wav", "bpm": 96},
            "events": [
                {"time": 0.25, "t": 9.0, "strength": 1.4,
                 "attack_time_ms": 3.5, "clarity_score": 0.91},
                {"t": 0.75},
                null
            ]
        });
        let set = ClarityClassifier.extract(&doc, &config);
        assert_eq!(set.events.len(), 2);
        assert_eq!(set.events[0].time, 0.25);
        assert_eq!(set.events[0].strength, 1.0);
        assert_eq!(set.events[0].clarity_score, 0.91);
        assert_eq!(set.events[1].time, 0.75);
        assert_eq!(set.events[1].strength, 0.0);
        assert_eq!(set.events[1].attack_time_ms, 0.0);
        assert_eq!(set.meta.source, "snare.wav");
        assert_eq!(set.meta.bpm, 96.0);
        assert_eq!(set.meta.total_events, 2);
        assert_eq!(set.attack_range().project(3.5), 1.0);
    }

    #[test]
    fn test_empty_table() {
        let config = IngestConfig::default();
        let set = ClarityClassifier.extract(&json!({"metadata": {}, "events": []}), &config);
        assert!(set.events.is_empty());
        assert_eq!(set.meta.total_events, 0);
    }
}
