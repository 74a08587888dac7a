//! Stream, section and keypoint records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::event::EventPoint;
use super::metadata::Metadata;

/// Default band order for stream display
pub const BAND_ORDER: [&str; 3] = ["low", "mid", "high"];

/// A run of regularly spaced onsets within one band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// Stream identifier
    pub id: String,
    /// Band name ("low", "mid", "high" or producer-specific)
    pub band: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Onset times in seconds
    pub events: Vec<f64>,
    /// Per-onset strengths, when the producer kept them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<f64>,
    /// Median inter-onset interval in seconds
    pub median_ioi: f64,
    /// Standard deviation of inter-onset intervals
    pub ioi_std: f64,
    /// Onsets per second
    pub density: f64,
    /// Median onset strength
    pub strength_median: f64,
    /// Accent times in seconds
    pub accents: Vec<f64>,
}

/// A section summary value: numeric measures or a dominant-band label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryValue {
    /// Numeric measure
    Number(f64),
    /// Text label
    Text(String),
}

/// A contiguous time range with the streams active inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier
    pub id: u64,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Streams overlapping the section
    pub active_stream_ids: Vec<String>,
    /// Summary measures keyed by name
    pub summary: BTreeMap<String, SummaryValue>,
}

impl Section {
    /// Section length in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Keypoint category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeypointKind {
    /// Start or end of a section
    SectionBoundary,
    /// Accent within a stream
    Accent,
    /// Producer-specific category
    Other(String),
}

impl KeypointKind {
    /// Label used in documents
    pub fn as_str(&self) -> &str {
        match self {
            KeypointKind::SectionBoundary => "section_boundary",
            KeypointKind::Accent => "accent",
            KeypointKind::Other(label) => label,
        }
    }
}

impl From<String> for KeypointKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "section_boundary" => KeypointKind::SectionBoundary,
            "accent" => KeypointKind::Accent,
            _ => KeypointKind::Other(label),
        }
    }
}

impl From<KeypointKind> for String {
    fn from(kind: KeypointKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A notable time point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Time in seconds
    pub time: f64,
    /// Category
    #[serde(rename = "type")]
    pub kind: KeypointKind,
    /// Owning section, for boundaries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<u64>,
    /// Owning stream, for accents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Streams/sections record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamsSectionsRecordSet {
    /// Streams in document order
    pub streams: Vec<Stream>,
    /// Sections in document order
    pub sections: Vec<Section>,
    /// Keypoints in document order
    pub keypoints: Vec<Keypoint>,
    /// Role-bearing canonical events, when the document carries them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventPoint>>,
    /// Metadata envelope (read from the top level of the document)
    pub meta: Metadata,
}

impl StreamsSectionsRecordSet {
    /// Streams of the given bands, ordered by band then start time
    ///
    /// An empty `bands` slice selects [`BAND_ORDER`].
    pub fn ordered_streams(&self, bands: &[&str]) -> Vec<&Stream> {
        let bands: &[&str] = if bands.is_empty() { &BAND_ORDER } else { bands };
        let rank = |band: &str| bands.iter().position(|b| *b == band);

        let mut selected: Vec<(usize, &Stream)> = self
            .streams
            .iter()
            .filter_map(|s| rank(s.band.as_str()).map(|r| (r, s)))
            .collect();
        selected.sort_by(|(ra, a), (rb, b)| {
            ra.cmp(rb)
                .then(a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal))
        });
        selected.into_iter().map(|(_, s)| s).collect()
    }

    /// Streams grouped by band name
    pub fn streams_by_band(&self) -> BTreeMap<&str, Vec<&Stream>> {
        let mut groups: BTreeMap<&str, Vec<&Stream>> = BTreeMap::new();
        for stream in &self.streams {
            groups.entry(stream.band.as_str()).or_default().push(stream);
        }
        groups
    }

    /// Section containing `time`
    ///
    /// Sections are half-open `[start, end)`, except that the end of the last
    /// section is inclusive.
    pub fn section_at(&self, time: f64) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.start <= time && time < s.end)
            .or_else(|| self.sections.last().filter(|s| s.start <= time && time <= s.end))
    }
}
