//! Whole-document normalization
//!
//! Runs the baseline generic path and the domain routing for one document and
//! packages both outputs. The two paths are independent: a document with no
//! domain match still yields its generic events, and a document with no
//! generic events may still yield a domain record set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::records::clarity::ClarityRecordSet;
use crate::records::context::ContextRecordSet;
use crate::records::drum_band::DrumBandRecordSet;
use crate::records::energy::EnergyRecordSet;
use crate::records::event::EventPoint;
use crate::records::metadata::Metadata;
use crate::records::spectral::SpectralRecordSet;
use crate::records::streams::StreamsSectionsRecordSet;
use crate::records::temporal::TemporalRecordSet;
use crate::schema::{
    self, ClarityClassifier, ContextClassifier, DrumBandClassifier, EnergyClassifier,
    EventsClassifier, SchemaClassifier, SchemaKind, SpectralClassifier, StreamsSectionsClassifier,
    TemporalClassifier, TimeMarkerClassifier,
};

/// Domain-extended record set, one case per domain shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", content = "data", rename_all = "snake_case")]
pub enum DomainRecordSet {
    /// Energy profile
    Energy(EnergyRecordSet),
    /// Onset clarity table
    Clarity(ClarityRecordSet),
    /// Beat-grid alignment table
    Temporal(TemporalRecordSet),
    /// Spectral focus table
    Spectral(SpectralRecordSet),
    /// Context dependency table
    Context(ContextRecordSet),
    /// Per-band drum onset energies
    DrumBand(DrumBandRecordSet),
    /// Streams, sections and keypoints
    StreamsSections(StreamsSectionsRecordSet),
}

impl DomainRecordSet {
    /// Shape that produced this record set
    pub fn kind(&self) -> SchemaKind {
        match self {
            DomainRecordSet::Energy(_) => SchemaKind::Energy,
            DomainRecordSet::Clarity(_) => SchemaKind::Clarity,
            DomainRecordSet::Temporal(_) => SchemaKind::Temporal,
            DomainRecordSet::Spectral(_) => SchemaKind::Spectral,
            DomainRecordSet::Context(_) => SchemaKind::Context,
            DomainRecordSet::DrumBand(_) => SchemaKind::DrumBand,
            DomainRecordSet::StreamsSections(_) => SchemaKind::StreamsSections,
        }
    }

    /// Metadata envelope
    pub fn meta(&self) -> &Metadata {
        match self {
            DomainRecordSet::Energy(set) => &set.meta,
            DomainRecordSet::Clarity(set) => &set.meta,
            DomainRecordSet::Temporal(set) => &set.meta,
            DomainRecordSet::Spectral(set) => &set.meta,
            DomainRecordSet::Context(set) => &set.meta,
            DomainRecordSet::DrumBand(set) => &set.meta,
            DomainRecordSet::StreamsSections(set) => &set.meta,
        }
    }

    /// Number of records extracted
    pub fn record_count(&self) -> usize {
        match self {
            DomainRecordSet::Energy(set) => set.events.len(),
            DomainRecordSet::Clarity(set) => set.events.len(),
            DomainRecordSet::Temporal(set) => set.events.len(),
            DomainRecordSet::Spectral(set) => set.events.len(),
            DomainRecordSet::Context(set) => set.events.len(),
            DomainRecordSet::DrumBand(set) => set.bands.len(),
            DomainRecordSet::StreamsSections(set) => set.streams.len(),
        }
    }
}

/// Output of one document normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Shape that claimed the document, if any
    pub schema: Option<SchemaKind>,

    /// Baseline canonical events (empty when no generic shape matched)
    pub events: Vec<EventPoint>,

    /// Domain record set of the claiming domain shape
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub domain: Option<DomainRecordSet>,
}

impl NormalizedDocument {
    /// True when neither path produced anything
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.domain.is_none()
    }
}

/// Run one domain shape's extractor
///
/// Returns `None` for the generic shapes, which have no domain record set.
/// The signature is not re-checked, so a caller that already knows the shape
/// can extract it directly.
pub fn extract_as(kind: SchemaKind, doc: &Value, config: &IngestConfig) -> Option<DomainRecordSet> {
    let set = match kind {
        SchemaKind::TimeMarkers | SchemaKind::Events => return None,
        SchemaKind::Energy => DomainRecordSet::Energy(EnergyClassifier.extract(doc, config)),
        SchemaKind::Clarity => DomainRecordSet::Clarity(ClarityClassifier.extract(doc, config)),
        SchemaKind::Temporal => DomainRecordSet::Temporal(TemporalClassifier.extract(doc, config)),
        SchemaKind::Spectral => DomainRecordSet::Spectral(SpectralClassifier.extract(doc, config)),
        SchemaKind::Context => DomainRecordSet::Context(ContextClassifier.extract(doc, config)),
        SchemaKind::DrumBand => DomainRecordSet::DrumBand(DrumBandClassifier.extract(doc, config)),
        SchemaKind::StreamsSections => {
            DomainRecordSet::StreamsSections(StreamsSectionsClassifier.extract(doc, config))
        }
    };
    Some(set)
}

/// Domain path only: extract with the first matching domain shape
pub fn extract_domain(doc: &Value, config: &IngestConfig) -> Option<DomainRecordSet> {
    let kind = schema::first_domain_match(doc, config)?;
    let set = extract_as(kind, doc, config);
    if let Some(set) = &set {
        log::debug!(
            "Extracted {} record set: {} records, total_events={}",
            kind,
            set.record_count(),
            set.meta().total_events
        );
    }
    set
}

/// Generic path only: baseline canonical events
///
/// Time-marker lists take precedence over an event array; a document matching
/// neither yields an empty list.
pub fn normalize_events(doc: &Value, config: &IngestConfig) -> Vec<EventPoint> {
    if let Some(events) = TimeMarkerClassifier.parse(doc, config) {
        return events;
    }
    EventsClassifier.parse(doc, config).unwrap_or_default()
}

/// Normalize one decoded document
///
/// Never fails: malformed elements are dropped, invalid fields default, and a
/// document that matches nothing yields an empty result.
pub fn normalize_document(doc: &Value, config: &IngestConfig) -> NormalizedDocument {
    let schema = schema::classify(doc, config);
    let events = normalize_events(doc, config);
    let domain = extract_domain(doc, config);
    log::debug!(
        "Normalized document: schema={}, {} events, domain={}",
        schema.map(|k| k.name()).unwrap_or("none"),
        events.len(),
        domain.as_ref().map(|d| d.kind().name()).unwrap_or("none")
    );
    NormalizedDocument {
        schema,
        events,
        domain,
    }
}

/// Decode JSON bytes, then normalize
///
/// # Errors
///
/// Returns `IngestError::DecodingError` if `bytes` is not valid JSON. This is
/// the only failure on the document path.
pub fn normalize_slice(
    bytes: &[u8],
    config: &IngestConfig,
) -> Result<NormalizedDocument, IngestError> {
    let doc: Value = serde_json::from_slice(bytes)?;
    Ok(normalize_document(&doc, config))
}

/// Decode a JSON string, then normalize
///
/// # Errors
///
/// Returns `IngestError::DecodingError` if `text` is not valid JSON.
pub fn normalize_str(text: &str, config: &IngestConfig) -> Result<NormalizedDocument, IngestError> {
    let doc: Value = serde_json::from_str(text)?;
    Ok(normalize_document(&doc, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generic_runs_alongside_domain() {
        let config = IngestConfig::default();
        let doc = json!({
            "events": [{"t": 0.0, "strength": 0.1}, {"t": 1.0, "strength": 0.9}],
            "energy_rms_min": 0.0
        });
        let result = normalize_document(&doc, &config);
        assert_eq!(result.schema, Some(SchemaKind::Energy));
        assert_eq!(result.events.len(), 2);
        assert_eq!(result.domain.as_ref().map(DomainRecordSet::kind), Some(SchemaKind::Energy));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let config = IngestConfig::default();
        let result = normalize_document(&json!({"hello": "world"}), &config);
        assert_eq!(result.schema, None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_domain_without_generic_events() {
        let config = IngestConfig::default();
        let doc = json!({"bands": {"low": [{"t": 0.1, "energy": 1.0}], "mid": [], "high": []}});
        let result = normalize_document(&doc, &config);
        assert_eq!(result.schema, Some(SchemaKind::DrumBand));
        assert!(result.events.is_empty());
        assert_eq!(result.domain.as_ref().map(|d| d.record_count()), Some(1));
    }

    #[test]
    fn test_markers_take_precedence_over_events() {
        let config = IngestConfig::default();
        let doc = json!({"onset_times_sec": [0.1, 0.2], "events": [{"t": 5.0}]});
        let events = normalize_events(&doc, &config);
        assert_eq!(events.len(), 2);
        assert_eq!(classify_name(&doc), "time_markers");
    }

    fn classify_name(doc: &Value) -> &'static str {
        schema::classify(doc, &IngestConfig::default())
            .map(|k| k.name())
            .unwrap_or("none")
    }

    #[test]
    fn test_extract_as_ignores_signature() {
        let config = IngestConfig::default();
        let set = extract_as(SchemaKind::Clarity, &json!({}), &config).unwrap();
        assert_eq!(set.record_count(), 0);
        assert_eq!(set.meta().total_events, 0);
        assert!(extract_as(SchemaKind::Events, &json!({}), &config).is_none());
    }

    #[test]
    fn test_decoding_errors() {
        let config = IngestConfig::default();
        let err = normalize_str("{\"events\": [", &config).unwrap_err();
        assert!(matches!(err, IngestError::DecodingError(_)));
        let err = normalize_slice(b"not json", &config).unwrap_err();
        assert!(err.to_string().starts_with("Decoding error"));
        assert!(normalize_slice(b"[]", &config).unwrap().is_empty());
    }

    #[test]
    fn test_domain_serializes_tagged() {
        let config = IngestConfig::default();
        let set = extract_as(SchemaKind::Energy, &json!({"events": []}), &config).unwrap();
        let v = serde_json::to_value(&set).unwrap();
        assert_eq!(v["schema"], "energy");
        assert!(v["data"]["events"].as_array().unwrap().is_empty());
    }
}
