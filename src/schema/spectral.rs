//! Spectral focus tables

use serde_json::Value;

use super::clarity::FEATURE_TIME_KEYS;
use super::probe::{array_field, feature_table, metadata_object};
use super::{SchemaClassifier, SchemaKind};
use crate::assembly::canonical::object_items;
use crate::coercion::numeric::{clamp01, coerce_count, coerce_number, finite_number, first_number};
use crate::config::IngestConfig;
use crate::records::metadata::Metadata;
use crate::records::spectral::{SpectralEvent, SpectralRecordSet};

/// Event keys that identify a spectral table
pub const SPECTRAL_KEYS: [&str; 2] = ["focus_score", "spectral_centroid_hz"];

/// Classifier for spectral tables
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralClassifier;

impl SchemaClassifier for SpectralClassifier {
    type Output = SpectralRecordSet;
    const KIND: SchemaKind = SchemaKind::Spectral;

    fn test(&self, doc: &Value, config: &IngestConfig) -> bool {
        feature_table(doc, &SPECTRAL_KEYS, config)
    }

    fn extract(&self, doc: &Value, config: &IngestConfig) -> SpectralRecordSet {
        let items = array_field(doc, "events").unwrap_or(&[]);
        let events: Vec<SpectralEvent> = object_items(items, "spectral events")
            .into_iter()
            .map(|obj| SpectralEvent {
                index: coerce_count(obj.get("index"), 0),
                time: first_number(obj, &FEATURE_TIME_KEYS).unwrap_or(0.0),
                frame: coerce_count(obj.get("frame"), 0) as u64,
                strength: clamp01(obj.get("strength"), config.feature_strength_default),
                // null when the producer's analysis window was silent
                spectral_centroid_hz: finite_number(obj.get("spectral_centroid_hz")),
                spectral_bandwidth_hz: finite_number(obj.get("spectral_bandwidth_hz")),
                spectral_flatness: finite_number(obj.get("spectral_flatness")),
                focus_score: coerce_number(obj.get("focus_score"), 0.0),
            })
            .collect();

        let meta = Metadata::from_fields(metadata_object(doc), events.len());
        log::debug!("Spectral: {} events from '{}'", events.len(), meta.source);
        SpectralRecordSet { events, meta }
    }
}
