//! Beat-grid alignment and repetition tables

use serde_json::Value;

use super::clarity::FEATURE_TIME_KEYS;
use super::probe::{array_field, feature_table, metadata_object};
use super::{SchemaClassifier, SchemaKind};
use crate::assembly::canonical::object_items;
use crate::coercion::numeric::{
    clamp01, coerce_bool, coerce_count, coerce_number, finite_number, first_number,
};
use crate::config::IngestConfig;
use crate::records::metadata::Metadata;
use crate::records::temporal::{TemporalEvent, TemporalRecordSet};

/// Event keys that identify a temporal table
pub const TEMPORAL_KEYS: [&str; 2] = ["grid_align_score", "temporal_score"];

/// Classifier for temporal tables
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalClassifier;

impl SchemaClassifier for TemporalClassifier {
    type Output = TemporalRecordSet;
    const KIND: SchemaKind = SchemaKind::Temporal;

    fn test(&self, doc: &Value, config: &IngestConfig) -> bool {
        feature_table(doc, &TEMPORAL_KEYS, config)
    }

    fn extract(&self, doc: &Value, config: &IngestConfig) -> TemporalRecordSet {
        let items = array_field(doc, "events").unwrap_or(&[]);
        let events: Vec<TemporalEvent> = object_items(items, "temporal events")
            .into_iter()
            .map(|obj| TemporalEvent {
                index: coerce_count(obj.get("index"), 0),
                time: first_number(obj, &FEATURE_TIME_KEYS).unwrap_or(0.0),
                frame: coerce_count(obj.get("frame"), 0) as u64,
                strength: clamp01(obj.get("strength"), config.feature_strength_default),
                grid_align_score: coerce_number(obj.get("grid_align_score"), 0.0),
                repetition_score: coerce_number(obj.get("repetition_score"), 0.0),
                temporal_score: coerce_number(obj.get("temporal_score"), 0.0),
                ioi_prev: finite_number(obj.get("ioi_prev")),
                ioi_next: finite_number(obj.get("ioi_next")),
            })
            .collect();

        let fields = metadata_object(doc);
        let meta = Metadata::from_fields(fields, events.len());
        let bpm_dynamic_used = coerce_bool(fields.and_then(|m| m.get("bpm_dynamic_used")), false);
        log::debug!(
            "Temporal: {} events from '{}' (dynamic bpm: {})",
            events.len(),
            meta.source,
            bpm_dynamic_used
        );

        TemporalRecordSet {
            events,
            meta,
            bpm_dynamic_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_with_optional_intervals() {
        let config = IngestConfig::default();
        let doc = json!({
            "metadata": {"source": "loop.wav", "duration_sec": 8.0, "bpm_dynamic_used": true},
            "events": [
                {"index": 0, "time": 0.5, "frame": 43, "strength": 0.6,
                 "grid_align_score": 0.9, "repetition_score": 0.4, "temporal_score": 0.7,
                 "ioi_next": 0.5},
                {"index": 1, "time": 1.0, "frame": 86, "strength": 0.3,
                 "grid_align_score": 0.8, "temporal_score": 0.6,
                 "ioi_prev": 0.5, "ioi_next": null}
            ]
        });
        assert!(TemporalClassifier.test(&doc, &config));
        let set = TemporalClassifier.extract(&doc, &config);
        assert_eq!(set.events.len(), 2);
        assert!(set.bpm_dynamic_used);
        assert_eq!(set.meta.duration_sec, 8.0);

        let first = &set.events[0];
        assert_eq!(first.frame, 43);
        assert_eq!(first.ioi_prev, None);
        assert_eq!(first.ioi_next, Some(0.5));

        let second = &set.events[1];
        assert_eq!(second.index, 1);
        assert_eq!(second.repetition_score, 0.0);
        assert_eq!(second.ioi_prev, Some(0.5));
        assert_eq!(second.ioi_next, None);
    }

    #[test]
    fn test_missing_flag_defaults_false() {
        let config = IngestConfig::default();
        let set = TemporalClassifier.extract(&json!({"meta": {}, "events": []}), &config);
        assert!(!set.bpm_dynamic_used);
        assert_eq!(set.meta.total_events, 0);
    }

    #[test]
    fn test_optional_intervals_not_serialized_when_absent() {
        let config = IngestConfig::default();
        let doc = json!({"meta": {}, "events": [{"time": 0.1, "temporal_score": 0.2}]});
        let set = TemporalClassifier.extract(&doc, &config);
        let v = serde_json::to_value(&set.events[0]).unwrap();
        assert!(v.get("ioi_prev").is_none());
    }
}
