//! Schema classifiers
//!
//! One classifier per supported document shape. Each pairs a shallow
//! structural signature test with a total extractor:
//!
//! | Kind | Signature |
//! |---|---|
//! | `TimeMarkers` | `onset_times_sec`, `beat_times_sec` or `drum_onset_times_sec` number arrays |
//! | `Events` | `events` array (or a bare array) of objects bearing `t`/`time` |
//! | `Energy` | `events` array plus top-level `energy_rms_min` |
//! | `Clarity` | metadata object plus events with `attack_time_ms`/`clarity_score` |
//! | `Temporal` | metadata object plus events with `grid_align_score`/`temporal_score` |
//! | `Spectral` | metadata object plus events with `focus_score`/`spectral_centroid_hz` |
//! | `Context` | metadata object plus events with `snr_db`/`dependency_score` |
//! | `DrumBand` | `bands` object with `low`/`mid`/`high` arrays |
//! | `StreamsSections` | `streams`, `sections` and `keypoints` arrays |
//!
//! A document may satisfy several signatures. The domain entries of
//! [`SchemaKind::ROUTING_TABLE`] claim the document in table order; the generic
//! entries always run to produce the baseline event list.

pub mod clarity;
pub mod context;
pub mod drum_band;
pub mod energy;
pub mod events;
pub mod markers;
pub mod probe;
pub mod spectral;
pub mod streams;
pub mod temporal;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::config::IngestConfig;

pub use clarity::ClarityClassifier;
pub use context::ContextClassifier;
pub use drum_band::DrumBandClassifier;
pub use energy::EnergyClassifier;
pub use events::EventsClassifier;
pub use markers::TimeMarkerClassifier;
pub use spectral::SpectralClassifier;
pub use streams::StreamsSectionsClassifier;
pub use temporal::TemporalClassifier;

/// A signature test paired with a total extractor for one document shape
///
/// `extract` never fails: it may be called on any document, including one
/// whose signature does not match, and degrades every missing or invalid field
/// to its default.
pub trait SchemaClassifier {
    /// Record set produced by this classifier
    type Output;

    /// Routing-table entry this classifier answers for
    const KIND: SchemaKind;

    /// Shallow structural signature test
    fn test(&self, doc: &Value, config: &IngestConfig) -> bool;

    /// Extract the record set, regardless of the signature
    fn extract(&self, doc: &Value, config: &IngestConfig) -> Self::Output;

    /// Extract only if the signature matches
    fn parse(&self, doc: &Value, config: &IngestConfig) -> Option<Self::Output> {
        if self.test(doc, config) {
            log::debug!("{} signature matched", Self::KIND);
            Some(self.extract(doc, config))
        } else {
            None
        }
    }
}

/// Supported document shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Flat lists of onset, beat and drum-onset times
    TimeMarkers,
    /// Generic event array
    Events,
    /// Energy profile
    Energy,
    /// Onset clarity table
    Clarity,
    /// Beat-grid alignment table
    Temporal,
    /// Spectral focus table
    Spectral,
    /// Context dependency table
    Context,
    /// Per-band drum onset energies
    DrumBand,
    /// Streams, sections and keypoints
    StreamsSections,
}

impl SchemaKind {
    /// Every shape in priority order
    pub const ROUTING_TABLE: [SchemaKind; 9] = [
        SchemaKind::TimeMarkers,
        SchemaKind::Events,
        SchemaKind::Energy,
        SchemaKind::Clarity,
        SchemaKind::Temporal,
        SchemaKind::Spectral,
        SchemaKind::Context,
        SchemaKind::DrumBand,
        SchemaKind::StreamsSections,
    ];

    /// Name used in logs and serialized output
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::TimeMarkers => "time_markers",
            SchemaKind::Events => "events",
            SchemaKind::Energy => "energy",
            SchemaKind::Clarity => "clarity",
            SchemaKind::Temporal => "temporal",
            SchemaKind::Spectral => "spectral",
            SchemaKind::Context => "context",
            SchemaKind::DrumBand => "drum_band",
            SchemaKind::StreamsSections => "streams_sections",
        }
    }

    /// True for shapes that produce a domain record set
    pub fn is_domain(&self) -> bool {
        !matches!(self, SchemaKind::TimeMarkers | SchemaKind::Events)
    }

    /// Run this shape's signature test
    pub fn matches(&self, doc: &Value, config: &IngestConfig) -> bool {
        match self {
            SchemaKind::TimeMarkers => TimeMarkerClassifier.test(doc, config),
            SchemaKind::Events => EventsClassifier.test(doc, config),
            SchemaKind::Energy => EnergyClassifier.test(doc, config),
            SchemaKind::Clarity => ClarityClassifier.test(doc, config),
            SchemaKind::Temporal => TemporalClassifier.test(doc, config),
            SchemaKind::Spectral => SpectralClassifier.test(doc, config),
            SchemaKind::Context => ContextClassifier.test(doc, config),
            SchemaKind::DrumBand => DrumBandClassifier.test(doc, config),
            SchemaKind::StreamsSections => StreamsSectionsClassifier.test(doc, config),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First domain shape in routing order whose signature matches
pub fn first_domain_match(doc: &Value, config: &IngestConfig) -> Option<SchemaKind> {
    SchemaKind::ROUTING_TABLE
        .into_iter()
        .filter(SchemaKind::is_domain)
        .find(|kind| kind.matches(doc, config))
}

/// First generic shape in routing order whose signature matches
pub fn first_generic_match(doc: &Value, config: &IngestConfig) -> Option<SchemaKind> {
    SchemaKind::ROUTING_TABLE
        .into_iter()
        .filter(|kind| !kind.is_domain())
        .find(|kind| kind.matches(doc, config))
}

/// Shape that claims a document
///
/// The first matching domain shape wins; a document with no domain match is
/// claimed by the first matching generic shape. `None` when nothing matches.
///
/// # Example
///
/// ```
/// use onset_ingest::schema::{classify, SchemaKind};
/// use onset_ingest::IngestConfig;
/// use serde_json::json;
///
/// let config = IngestConfig::default();
/// let doc = json!({"events": [{"t": 0.5}], "energy_rms_min": 0.0});
/// assert_eq!(classify(&doc, &config), Some(SchemaKind::Energy));
///
/// let doc = json!({"events": [{"t": 0.5}]});
/// assert_eq!(classify(&doc, &config), Some(SchemaKind::Events));
///
/// assert_eq!(classify(&json!({"title": "nothing"}), &config), None);
/// ```
pub fn classify(doc: &Value, config: &IngestConfig) -> Option<SchemaKind> {
    let kind = first_domain_match(doc, config).or_else(|| first_generic_match(doc, config));
    match kind {
        Some(kind) => log::debug!("Document claimed by {} classifier", kind),
        None => log::debug!("No classifier signature matched"),
    }
    kind
}
