//! Energy profile documents
//!
//! Energy documents keep their metadata at the top level next to `events`,
//! and their events always get a fresh tertile layer.

use serde_json::Value;

use super::probe::{array_field, root_object};
use super::{SchemaClassifier, SchemaKind};
use crate::assembly::canonical::{object_items, CANONICAL_TIME_KEYS};
use crate::coercion::numeric::{clamp01, coerce_number, first_number, non_empty_string};
use crate::config::IngestConfig;
use crate::derivation::tiers::TierThresholds;
use crate::records::energy::{EnergyEvent, EnergyRecordSet};
use crate::records::event::Layer;
use crate::records::metadata::Metadata;

/// Classifier for energy profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyClassifier;

impl SchemaClassifier for EnergyClassifier {
    type Output = EnergyRecordSet;
    const KIND: SchemaKind = SchemaKind::Energy;

    fn test(&self, doc: &Value, _config: &IngestConfig) -> bool {
        let has_floor = doc
            .get("energy_rms_min")
            .map(|v| !v.is_null())
            .unwrap_or(false);
        has_floor && array_field(doc, "events").is_some()
    }

    fn extract(&self, doc: &Value, config: &IngestConfig) -> EnergyRecordSet {
        let items = array_field(doc, "events").unwrap_or(&[]);
        let objects = object_items(items, "energy events");

        let strengths: Vec<f64> = objects
            .iter()
            .map(|obj| clamp01(obj.get("strength"), config.default_strength))
            .collect();
        let thresholds = TierThresholds::from_strengths(&strengths, config);

        let events: Vec<EnergyEvent> = objects
            .iter()
            .zip(strengths.iter().copied())
            .map(|(obj, strength)| EnergyEvent {
                time: first_number(obj, &CANONICAL_TIME_KEYS).unwrap_or(0.0),
                strength,
                texture: clamp01(obj.get("texture"), config.default_texture),
                color: non_empty_string(obj.get("color"))
                    .unwrap_or_else(|| config.default_color.clone()),
                layer: Layer::Strength(thresholds.classify(strength)),
                rms: coerce_number(obj.get("rms"), 0.0),
                e_norm: first_number(obj, &["e_norm", "strength"])
                    .unwrap_or(config.default_strength),
                band_low: coerce_number(obj.get("band_low"), 0.0),
                band_mid: coerce_number(obj.get("band_mid"), 0.0),
                band_high: coerce_number(obj.get("band_high"), 0.0),
            })
            .collect();

        let meta = Metadata::from_fields(root_object(doc), events.len());
        let energy_rms_min = coerce_number(doc.get("energy_rms_min"), 0.0);
        let energy_rms_max = coerce_number(doc.get("energy_rms_max"), 1.0);
        log::debug!(
            "Energy: {} events from '{}', rms range [{}, {}]",
            events.len(),
            meta.source,
            energy_rms_min,
            energy_rms_max
        );

        EnergyRecordSet {
            events,
            meta,
            energy_rms_min,
            energy_rms_max,
        }
    }
}
