//! Beat-grid alignment and repetition records

use serde::{Deserialize, Serialize};

use super::metadata::Metadata;

/// Per-event temporal measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalEvent {
    /// Producer-side event index
    pub index: usize,
    /// Event time in seconds
    pub time: f64,
    /// STFT frame of the onset
    pub frame: u64,
    /// Onset strength in `[0, 1]`
    pub strength: f64,
    /// Alignment with the beat grid
    pub grid_align_score: f64,
    /// Rhythmic repetition score
    pub repetition_score: f64,
    /// Combined temporal score
    pub temporal_score: f64,
    /// Interval to the previous onset in seconds, if one exists
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ioi_prev: Option<f64>,
    /// Interval to the next onset in seconds, if one exists
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ioi_next: Option<f64>,
}

/// Temporal record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalRecordSet {
    /// Records in document order
    pub events: Vec<TemporalEvent>,
    /// Metadata envelope
    pub meta: Metadata,
    /// Whether the producer used a time-varying tempo (default: false)
    pub bpm_dynamic_used: bool,
}
