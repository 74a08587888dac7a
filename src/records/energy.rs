//! Energy profile records

use serde::{Deserialize, Serialize};

use super::drum_band::BandId;
use super::event::Layer;
use super::metadata::Metadata;
use crate::coercion::RangeNormalizer;

/// Per-event energy measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEvent {
    /// Event time in seconds
    #[serde(rename = "t")]
    pub time: f64,
    /// Normalized energy score in `[0, 1]`
    pub strength: f64,
    /// High-band share in `[0, 1]`
    pub texture: f64,
    /// Display color
    pub color: String,
    /// Tertile-derived layer
    pub layer: Layer,
    /// Raw RMS around the onset
    pub rms: f64,
    /// Total normalized energy
    pub e_norm: f64,
    /// Normalized 20-150 Hz energy
    pub band_low: f64,
    /// Normalized 150-2000 Hz energy
    pub band_mid: f64,
    /// Normalized 2-10 kHz energy
    pub band_high: f64,
}

impl EnergyEvent {
    /// Energy of one band
    pub fn band(&self, band: BandId) -> f64 {
        match band {
            BandId::Low => self.band_low,
            BandId::Mid => self.band_mid,
            BandId::High => self.band_high,
        }
    }
}

/// Energy record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecordSet {
    /// Records in document order
    pub events: Vec<EnergyEvent>,
    /// Metadata envelope (read from the top level of the document)
    pub meta: Metadata,
    /// Smallest RMS reported by the producer (default: 0.0)
    pub energy_rms_min: f64,
    /// Largest RMS reported by the producer (default: 1.0)
    pub energy_rms_max: f64,
}

impl EnergyRecordSet {
    /// Range projection of the RMS column
    pub fn rms_range(&self) -> RangeNormalizer {
        RangeNormalizer::from_values(self.events.iter().map(|e| e.rms))
    }

    /// Range projection of one band-energy column
    pub fn band_range(&self, band: BandId) -> RangeNormalizer {
        RangeNormalizer::from_values(self.events.iter().map(|e| e.band(band)))
    }
}
