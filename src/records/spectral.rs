//! Spectral focus records

use serde::{Deserialize, Serialize};

use super::metadata::Metadata;

/// Per-event spectral shape
///
/// The three spectral descriptors are independently nullable: producers emit
/// `null` when the analysis window was silent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralEvent {
    /// Producer-side event index
    pub index: usize,
    /// Event time in seconds
    pub time: f64,
    /// STFT frame of the onset
    pub frame: u64,
    /// Onset strength in `[0, 1]`
    pub strength: f64,
    /// Spectral centroid in Hz
    pub spectral_centroid_hz: Option<f64>,
    /// Spectral bandwidth in Hz
    pub spectral_bandwidth_hz: Option<f64>,
    /// Spectral flatness
    pub spectral_flatness: Option<f64>,
    /// Frequency focus score
    pub focus_score: f64,
}

/// Spectral record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralRecordSet {
    /// Records in document order
    pub events: Vec<SpectralEvent>,
    /// Metadata envelope
    pub meta: Metadata,
}
