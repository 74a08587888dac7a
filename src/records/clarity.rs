//! Onset clarity records

use serde::{Deserialize, Serialize};

use super::metadata::Metadata;
use crate::coercion::RangeNormalizer;

/// Per-event attack clarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarityEvent {
    /// Event time in seconds
    #[serde(rename = "t")]
    pub time: f64,
    /// Onset strength in `[0, 1]`
    pub strength: f64,
    /// Attack time in milliseconds
    pub attack_time_ms: f64,
    /// Clarity score
    pub clarity_score: f64,
}

/// Clarity record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarityRecordSet {
    /// Records in document order
    pub events: Vec<ClarityEvent>,
    /// Metadata envelope
    pub meta: Metadata,
}

impl ClarityRecordSet {
    /// Range projection of attack times
    pub fn attack_range(&self) -> RangeNormalizer {
        RangeNormalizer::from_values(self.events.iter().map(|e| e.attack_time_ms))
    }

    /// Range projection of clarity scores
    pub fn clarity_range(&self) -> RangeNormalizer {
        RangeNormalizer::from_values(self.events.iter().map(|e| e.clarity_score))
    }
}
