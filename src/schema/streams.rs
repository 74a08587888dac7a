//! Streams/sections documents
//!
//! Streams are time-ranged onset runs grouped by band, sections are contiguous
//! ranges with per-section summaries, and keypoints mark boundaries and
//! accents. An optional role-bearing `events` list goes through the canonical
//! assembler.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::probe::{array_field, root_object};
use super::{SchemaClassifier, SchemaKind};
use crate::assembly::canonical::{assemble_events, object_items};
use crate::coercion::numeric::{
    coerce_count, coerce_number, coerce_string, finite_number, first_number, non_empty_string,
    number_list, string_list,
};
use crate::config::IngestConfig;
use crate::records::metadata::Metadata;
use crate::records::streams::{
    Keypoint, KeypointKind, Section, Stream, StreamsSectionsRecordSet, SummaryValue,
};

/// Top-level arrays that identify a streams/sections document
pub const STREAMS_KEYS: [&str; 3] = ["streams", "sections", "keypoints"];

/// Classifier for streams/sections documents
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamsSectionsClassifier;

fn parse_stream(obj: &Map<String, Value>) -> Stream {
    Stream {
        id: coerce_string(obj.get("id"), ""),
        band: coerce_string(obj.get("band"), ""),
        start: coerce_number(obj.get("start"), 0.0),
        end: coerce_number(obj.get("end"), 0.0),
        events: number_list(obj.get("events")),
        strengths: number_list(obj.get("strengths")),
        median_ioi: coerce_number(obj.get("median_ioi"), 0.0),
        ioi_std: coerce_number(obj.get("ioi_std"), 0.0),
        density: coerce_number(obj.get("density"), 0.0),
        strength_median: coerce_number(obj.get("strength_median"), 0.0),
        accents: number_list(obj.get("accents")),
    }
}

fn parse_summary(value: Option<&Value>) -> BTreeMap<String, SummaryValue> {
    let Some(fields) = value.and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    fields
        .iter()
        .filter_map(|(key, v)| {
            let parsed = match v {
                Value::String(s) => SummaryValue::Text(s.clone()),
                other => SummaryValue::Number(finite_number(Some(other))?),
            };
            Some((key.clone(), parsed))
        })
        .collect()
}

fn parse_section(obj: &Map<String, Value>) -> Section {
    Section {
        id: coerce_count(obj.get("id"), 0) as u64,
        start: coerce_number(obj.get("start"), 0.0),
        end: coerce_number(obj.get("end"), 0.0),
        active_stream_ids: string_list(obj.get("active_stream_ids")),
        summary: parse_summary(obj.get("summary")),
    }
}

fn parse_keypoint(obj: &Map<String, Value>) -> Keypoint {
    Keypoint {
        time: first_number(obj, &["time", "t"]).unwrap_or(0.0),
        kind: KeypointKind::from(coerce_string(obj.get("type"), "")),
        section_id: finite_number(obj.get("section_id"))
            .filter(|v| *v >= 0.0)
            .map(|v| v as u64),
        stream_id: match obj.get("stream_id") {
            Some(Value::Number(n)) => Some(n.to_string()),
            other => non_empty_string(other),
        },
        label: non_empty_string(obj.get("label")),
    }
}

impl SchemaClassifier for StreamsSectionsClassifier {
    type Output = StreamsSectionsRecordSet;
    const KIND: SchemaKind = SchemaKind::StreamsSections;

    fn test(&self, doc: &Value, _config: &IngestConfig) -> bool {
        STREAMS_KEYS.iter().all(|key| array_field(doc, key).is_some())
    }

    fn extract(&self, doc: &Value, config: &IngestConfig) -> StreamsSectionsRecordSet {
        let list = |key: &str| array_field(doc, key).unwrap_or(&[]);

        let streams: Vec<Stream> = object_items(list("streams"), "streams")
            .into_iter()
            .map(parse_stream)
            .collect();
        let sections: Vec<Section> = object_items(list("sections"), "sections")
            .into_iter()
            .map(parse_section)
            .collect();
        let keypoints: Vec<Keypoint> = object_items(list("keypoints"), "keypoints")
            .into_iter()
            .map(parse_keypoint)
            .collect();
        let events = array_field(doc, "events").map(|items| assemble_events(items, config));

        let event_count = events.as_ref().map(Vec::len).unwrap_or(0);
        let meta = Metadata::from_fields(root_object(doc), event_count);
        log::debug!(
            "Streams/sections: {} streams, {} sections, {} keypoints, {} events",
            streams.len(),
            sections.len(),
            keypoints.len(),
            event_count
        );

        StreamsSectionsRecordSet {
            streams,
            sections,
            keypoints,
            events,
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::event::{Layer, PrecisionTier};
    use serde_json::json;

    fn document() -> Value {
        json!({
            "source": "groove.wav",
            "sr": 22050,
            "duration_sec": 16.0,
            "streams": [
                {"id": "low_0", "band": "low", "start": 0.0, "end": 8.0,
                 "events": [0.0, 0.5, 1.0], "median_ioi": 0.5, "ioi_std": 0.01,
                 "density": 2.0, "strength_median": 0.7, "accents": [0.0]},
                "broken"
            ],
            "sections": [
                {"id": 0, "start": 0.0, "end": 8.0, "active_stream_ids": ["low_0"],
                 "summary": {"density_low": 2.0, "dominant_band": "low", "note": null}}
            ],
            "keypoints": [
                {"time": 0.0, "type": "section_boundary", "section_id": 0, "label": "start"},
                {"time": 0.0, "type": "accent", "stream_id": "low_0"},
                {"time": 4.0, "type": "fill"}
            ],
            "events": [
                {"time": 0.0, "roles": {"P0": ["low"], "P1": ["low"], "P2": []}},
                {"time": 0.5, "roles": {"P0": ["low"], "P1": [], "P2": []}}
            ]
        })
    }

    #[test]
    fn test_signature() {
        let config = IngestConfig::default();
        assert!(StreamsSectionsClassifier.test(&document(), &config));
        let missing = json!({"streams": [], "sections": []});
        assert!(!StreamsSectionsClassifier.test(&missing, &config));
    }

    #[test]
    fn test_extract() {
        let config = IngestConfig::default();
        let set = StreamsSectionsClassifier.extract(&document(), &config);
        assert_eq!(set.streams.len(), 1);
        assert_eq!(set.streams[0].events, vec![0.0, 0.5, 1.0]);
        assert!(set.streams[0].strengths.is_empty());

        let summary = &set.sections[0].summary;
        assert_eq!(summary.len(), 2);
        assert_eq!(summary["density_low"], SummaryValue::Number(2.0));
        assert_eq!(summary["dominant_band"], SummaryValue::Text("low".to_string()));

        assert_eq!(set.keypoints[0].kind, KeypointKind::SectionBoundary);
        assert_eq!(set.keypoints[0].section_id, Some(0));
        assert_eq!(set.keypoints[1].stream_id.as_deref(), Some("low_0"));
        assert_eq!(set.keypoints[2].kind, KeypointKind::Other("fill".to_string()));

        let events = set.events.as_ref().unwrap();
        assert_eq!(events[0].layer, Layer::Precision(PrecisionTier::P1));
        assert_eq!(events[1].layer, Layer::Precision(PrecisionTier::P0));
        assert_eq!(set.meta.total_events, 2);
        assert_eq!(set.meta.duration_sec, 16.0);
    }

    #[test]
    fn test_without_events() {
        let config = IngestConfig::default();
        let doc = json!({"streams": [], "sections": [], "keypoints": []});
        let set = StreamsSectionsClassifier.extract(&doc, &config);
        assert!(set.events.is_none());
        assert_eq!(set.meta.total_events, 0);
    }
}
