//! Per-band drum onset energies

use serde::{Deserialize, Serialize};
use std::fmt;

use super::metadata::Metadata;
use crate::coercion::RangeNormalizer;

/// Drum frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandId {
    /// Kick range (20-150 Hz)
    Low,
    /// Snare/body range (150-2000 Hz)
    Mid,
    /// Cymbal/hat range (2-10 kHz)
    High,
}

impl BandId {
    /// All bands in display order
    pub const ALL: [BandId; 3] = [BandId::Low, BandId::Mid, BandId::High];

    /// Key used in documents
    pub fn key(&self) -> &'static str {
        match self {
            BandId::Low => "low",
            BandId::Mid => "mid",
            BandId::High => "high",
        }
    }

    /// Parse a document key
    pub fn from_key(key: &str) -> Option<Self> {
        BandId::ALL.into_iter().find(|b| b.key() == key)
    }
}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Energy of one onset detected in a single band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandOnset {
    /// Onset time in seconds
    pub t: f64,
    /// Normalized onset energy
    pub energy: f64,
}

/// Onset lists for the three drum bands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrumBands {
    /// Low band onsets
    pub low: Vec<BandOnset>,
    /// Mid band onsets
    pub mid: Vec<BandOnset>,
    /// High band onsets
    pub high: Vec<BandOnset>,
}

impl DrumBands {
    /// Onsets of `band`
    pub fn band(&self, band: BandId) -> &[BandOnset] {
        match band {
            BandId::Low => &self.low,
            BandId::Mid => &self.mid,
            BandId::High => &self.high,
        }
    }

    /// Total onsets across all bands
    pub fn len(&self) -> usize {
        self.low.len() + self.mid.len() + self.high.len()
    }

    /// True if no band has onsets
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drum-band energy record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumBandRecordSet {
    /// Per-band onsets
    pub bands: DrumBands,
    /// Metadata envelope
    pub meta: Metadata,
}

impl DrumBandRecordSet {
    /// Range projection of one band's energies, for bar heights
    pub fn energy_range(&self, band: BandId) -> RangeNormalizer {
        RangeNormalizer::from_values(self.bands.band(band).iter().map(|o| o.energy))
    }
}
