//! Context dependency records (local SNR and masking)

use serde::{Deserialize, Serialize};

use super::drum_band::BandId;
use super::metadata::Metadata;
use crate::coercion::RangeNormalizer;

/// Default analysis window around each event, in seconds
pub const DEFAULT_EVENT_WIN_SEC: f64 = 0.05;

/// Default background window, in seconds
pub const DEFAULT_BG_WIN_SEC: f64 = 0.1;

/// Per-event context measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEvent {
    /// Producer-side event index
    pub index: usize,
    /// Event time in seconds
    pub time: f64,
    /// STFT frame of the onset
    pub frame: u64,
    /// Onset strength in `[0, 1]`
    pub strength: f64,
    /// Local signal-to-noise ratio in dB
    pub snr_db: f64,
    /// Masking in the low band
    pub masking_low: f64,
    /// Masking in the mid band
    pub masking_mid: f64,
    /// Masking in the high band
    pub masking_high: f64,
    /// Context dependency score
    pub dependency_score: f64,
}

impl ContextEvent {
    /// Masking value of one band
    pub fn masking(&self, band: BandId) -> f64 {
        match band {
            BandId::Low => self.masking_low,
            BandId::Mid => self.masking_mid,
            BandId::High => self.masking_high,
        }
    }
}

/// Context record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRecordSet {
    /// Records in document order
    pub events: Vec<ContextEvent>,
    /// Metadata envelope
    pub meta: Metadata,
    /// Event window in seconds
    pub event_win_sec: f64,
    /// Background window in seconds
    pub bg_win_sec: f64,
}

impl ContextRecordSet {
    /// Range projection of SNR values
    pub fn snr_range(&self) -> RangeNormalizer {
        RangeNormalizer::from_values(self.events.iter().map(|e| e.snr_db))
    }
}
