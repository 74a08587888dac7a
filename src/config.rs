//! Configuration parameters for document ingestion

use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::records::event::PrecisionTier;

/// Display colors for the three precision tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerColors {
    /// Color for `P0` (default: "#2ecc71")
    #[serde(rename = "P0")]
    pub p0: String,
    /// Color for `P1` (default: "#f39c12")
    #[serde(rename = "P1")]
    pub p1: String,
    /// Color for `P2` (default: "#3498db")
    #[serde(rename = "P2")]
    pub p2: String,
}

impl LayerColors {
    /// Color assigned to events whose primary layer is `tier`
    pub fn for_tier(&self, tier: PrecisionTier) -> &str {
        match tier {
            PrecisionTier::P0 => &self.p0,
            PrecisionTier::P1 => &self.p1,
            PrecisionTier::P2 => &self.p2,
        }
    }
}

impl Default for LayerColors {
    fn default() -> Self {
        Self {
            p0: "#2ecc71".to_string(),
            p1: "#f39c12".to_string(),
            p2: "#3498db".to_string(),
        }
    }
}

/// Synthetic strengths given to bare time-marker lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStrengths {
    /// Strength for `onset_times_sec` entries (default: 0.7)
    pub onset: f64,
    /// Strength for `beat_times_sec` entries (default: 0.6)
    pub beat: f64,
    /// Strength for `drum_onset_times_sec` entries (default: 0.8)
    pub drum_onset: f64,
}

impl Default for MarkerStrengths {
    fn default() -> Self {
        Self {
            onset: 0.7,
            beat: 0.6,
            drum_onset: 0.8,
        }
    }
}

/// Ingestion configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    // Canonical events
    /// Sentinel point color when the source supplies none (default: "#5a9fd4")
    pub default_color: String,

    /// Strength used when a canonical or energy event has no valid strength (default: 0.7)
    pub default_strength: f64,

    /// Texture used by energy events without a valid texture (default: 0.5)
    pub default_texture: f64,

    /// Strength fallback for clarity/temporal/spectral/context tables (default: 0.0)
    pub feature_strength_default: f64,

    // Tier derivation
    /// Fraction of the sorted strengths selecting the lower threshold (default: 0.33)
    pub tier_lower_fraction: f64,

    /// Fraction of the sorted strengths selecting the upper threshold (default: 0.66)
    pub tier_upper_fraction: f64,

    /// Colors for role-bearing events
    pub layer_colors: LayerColors,

    /// Strengths for time-marker lists
    pub marker_strengths: MarkerStrengths,

    // Schema detection
    /// Maximum number of array elements a signature test inspects (default: 64)
    ///
    /// Zero is rejected by [`IngestConfig::validate`]; normalization without
    /// validation treats it as 1.
    pub probe_limit: usize,

    // Overlay helpers
    /// Seconds before an event during which the play cursor activates it (default: 0.03)
    pub activate_before_sec: f64,

    /// Seconds after an event during which it stays active (default: 0.15)
    pub activate_after_sec: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_color: "#5a9fd4".to_string(),
            default_strength: 0.7,
            default_texture: 0.5,
            feature_strength_default: 0.0,
            tier_lower_fraction: 0.33,
            tier_upper_fraction: 0.66,
            layer_colors: LayerColors::default(),
            marker_strengths: MarkerStrengths::default(),
            probe_limit: 64,
            activate_before_sec: 0.03,
            activate_after_sec: 0.15,
        }
    }
}

impl IngestConfig {
    /// Check that the configuration is usable
    ///
    /// Normalization entry points do not call this; call it once after
    /// building or loading a configuration.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidInput` if a tier fraction lies outside
    /// `[0.0, 1.0]`, the lower fraction exceeds the upper one, or `probe_limit` is zero.
    pub fn validate(&self) -> Result<(), IngestError> {
        for (name, value) in [
            ("tier_lower_fraction", self.tier_lower_fraction),
            ("tier_upper_fraction", self.tier_upper_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(IngestError::InvalidInput(format!(
                    "{} must be in [0.0, 1.0], got {}",
                    name, value
                )));
            }
        }

        if self.tier_lower_fraction > self.tier_upper_fraction {
            return Err(IngestError::InvalidInput(format!(
                "tier_lower_fraction ({}) exceeds tier_upper_fraction ({})",
                self.tier_lower_fraction, self.tier_upper_fraction
            )));
        }

        if self.probe_limit == 0 {
            return Err(IngestError::InvalidInput(
                "probe_limit must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
