//! Per-band drum onset energy documents

use serde_json::{Map, Value};

use super::probe::{metadata_object, root_object};
use super::{SchemaClassifier, SchemaKind};
use crate::assembly::canonical::object_items;
use crate::coercion::numeric::{coerce_number, first_number};
use crate::config::IngestConfig;
use crate::records::drum_band::{BandId, BandOnset, DrumBandRecordSet, DrumBands};
use crate::records::metadata::Metadata;

/// Classifier for drum-band energy documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DrumBandClassifier;

impl DrumBandClassifier {
    fn bands_object(doc: &Value) -> Option<&Map<String, Value>> {
        doc.get("bands").and_then(Value::as_object)
    }

    fn band_onsets(bands: Option<&Map<String, Value>>, band: BandId) -> Vec<BandOnset> {
        let items = bands
            .and_then(|b| b.get(band.key()))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        object_items(items, band.key())
            .into_iter()
            .map(|obj| BandOnset {
                t: first_number(obj, &["t", "time"]).unwrap_or(0.0),
                energy: coerce_number(obj.get("energy"), 0.0),
            })
            .collect()
    }
}

impl SchemaClassifier for DrumBandClassifier {
    type Output = DrumBandRecordSet;
    const KIND: SchemaKind = SchemaKind::DrumBand;

    fn test(&self, doc: &Value, _config: &IngestConfig) -> bool {
        match Self::bands_object(doc) {
            Some(bands) => BandId::ALL
                .iter()
                .all(|band| bands.get(band.key()).map(Value::is_array).unwrap_or(false)),
            None => false,
        }
    }

    fn extract(&self, doc: &Value, _config: &IngestConfig) -> DrumBandRecordSet {
        let bands_obj = Self::bands_object(doc);
        let bands = DrumBands {
            low: Self::band_onsets(bands_obj, BandId::Low),
            mid: Self::band_onsets(bands_obj, BandId::Mid),
            high: Self::band_onsets(bands_obj, BandId::High),
        };

        // Exporters put the envelope under `meta`; older files keep it at the top level
        let fields = metadata_object(doc).or_else(|| root_object(doc));
        let meta = Metadata::from_fields(fields, bands.len());
        log::debug!(
            "Drum bands: low={}, mid={}, high={}",
            bands.low.len(),
            bands.mid.len(),
            bands.high.len()
        );

        DrumBandRecordSet { bands, meta }
    }
}
