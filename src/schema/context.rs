//! Context dependency tables (local SNR and masking)

use serde_json::Value;

use super::clarity::FEATURE_TIME_KEYS;
use super::probe::{array_field, feature_table, metadata_object};
use super::{SchemaClassifier, SchemaKind};
use crate::assembly::canonical::object_items;
use crate::coercion::numeric::{clamp01, coerce_count, coerce_number, first_number};
use crate::config::IngestConfig;
use crate::records::context::{
    ContextEvent, ContextRecordSet, DEFAULT_BG_WIN_SEC, DEFAULT_EVENT_WIN_SEC,
};
use crate::records::metadata::Metadata;

/// Event keys that identify a context table
pub const CONTEXT_KEYS: [&str; 2] = ["snr_db", "dependency_score"];

/// Classifier for context tables
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextClassifier;

impl SchemaClassifier for ContextClassifier {
    type Output = ContextRecordSet;
    const KIND: SchemaKind = SchemaKind::Context;

    fn test(&self, doc: &Value, config: &IngestConfig) -> bool {
        feature_table(doc, &CONTEXT_KEYS, config)
    }

    fn extract(&self, doc: &Value, config: &IngestConfig) -> ContextRecordSet {
        let items = array_field(doc, "events").unwrap_or(&[]);
        let events: Vec<ContextEvent> = object_items(items, "context events")
            .into_iter()
            .map(|obj| ContextEvent {
                index: coerce_count(obj.get("index"), 0),
                time: first_number(obj, &FEATURE_TIME_KEYS).unwrap_or(0.0),
                frame: coerce_count(obj.get("frame"), 0) as u64,
                strength: clamp01(obj.get("strength"), config.feature_strength_default),
                snr_db: coerce_number(obj.get("snr_db"), 0.0),
                masking_low: coerce_number(obj.get("masking_low"), 0.0),
                masking_mid: coerce_number(obj.get("masking_mid"), 0.0),
                masking_high: coerce_number(obj.get("masking_high"), 0.0),
                dependency_score: coerce_number(obj.get("dependency_score"), 0.0),
            })
            .collect();

        let fields = metadata_object(doc);
        let window =
            |key: &str, default: f64| coerce_number(fields.and_then(|m| m.get(key)), default);
        let event_win_sec = window("event_win_sec", DEFAULT_EVENT_WIN_SEC);
        let bg_win_sec = window("bg_win_sec", DEFAULT_BG_WIN_SEC);
        let meta = Metadata::from_fields(fields, events.len());
        log::debug!("Context: {} events from '{}'", events.len(), meta.source);

        ContextRecordSet {
            events,
            meta,
            event_win_sec,
            bg_win_sec,
        }
    }
}
