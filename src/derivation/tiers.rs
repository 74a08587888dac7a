//! Tertile tier derivation
//!
//! Splits one document's strengths into strong/medium/weak using index-based
//! (not interpolated) percentiles. Thresholds are computed fresh for every
//! document and never carried across documents.
//!
//! Ties at a threshold index land in the upper bucket: with all strengths
//! equal, both thresholds coincide and every event is strong.

use crate::config::IngestConfig;
use crate::records::event::StrengthTier;

/// Lower/upper strength thresholds for one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    /// Events at or above this are at least medium
    pub lower: f64,
    /// Events at or above this are strong
    pub upper: f64,
}

impl TierThresholds {
    /// Compute thresholds from a document's strengths using the configured fractions
    ///
    /// # Example
    ///
    /// ```
    /// use onset_ingest::derivation::tiers::TierThresholds;
    /// use onset_ingest::IngestConfig;
    ///
    /// let strengths = [0.9, 0.1, 0.5, 0.3, 0.7, 0.2];
    /// let t = TierThresholds::from_strengths(&strengths, &IngestConfig::default());
    /// // sorted: [0.1, 0.2, 0.3, 0.5, 0.7, 0.9], indices floor(1.98) = 1 and floor(3.96) = 3
    /// assert_eq!(t.lower, 0.2);
    /// assert_eq!(t.upper, 0.5);
    /// ```
    pub fn from_strengths(strengths: &[f64], config: &IngestConfig) -> Self {
        Self::with_fractions(
            strengths,
            config.tier_lower_fraction,
            config.tier_upper_fraction,
        )
    }

    /// Compute thresholds with explicit fractions
    ///
    /// Empty input yields `lower = 0.0` and `upper = 1.0`.
    pub fn with_fractions(strengths: &[f64], lower_fraction: f64, upper_fraction: f64) -> Self {
        if strengths.is_empty() {
            return Self {
                lower: 0.0,
                upper: 1.0,
            };
        }

        let mut sorted = strengths.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            lower: sorted[percentile_index(sorted.len(), lower_fraction)],
            upper: sorted[percentile_index(sorted.len(), upper_fraction)],
        }
    }

    /// Tier of one strength
    pub fn classify(&self, strength: f64) -> StrengthTier {
        if strength >= self.upper {
            StrengthTier::Strong
        } else if strength >= self.lower {
            StrengthTier::Medium
        } else {
            StrengthTier::Weak
        }
    }
}

/// `floor(len * fraction)`, kept inside the array
fn percentile_index(len: usize, fraction: f64) -> usize {
    let idx = ((len as f64) * fraction.clamp(0.0, 1.0)).floor() as usize;
    idx.min(len - 1)
}

/// Tier every strength of a document
pub fn assign_tiers(strengths: &[f64], config: &IngestConfig) -> Vec<StrengthTier> {
    let thresholds = TierThresholds::from_strengths(strengths, config);
    log::debug!(
        "Tertile split over {} strengths: lower={:.4}, upper={:.4}",
        strengths.len(),
        thresholds.lower,
        thresholds.upper
    );
    strengths.iter().map(|&s| thresholds.classify(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IngestConfig {
        IngestConfig::default()
    }

    #[test]
    fn test_empty_defaults() {
        let t = TierThresholds::from_strengths(&[], &config());
        assert_eq!(t.lower, 0.0);
        assert_eq!(t.upper, 1.0);
        assert!(assign_tiers(&[], &config()).is_empty());
    }

    #[test]
    fn test_index_based_thresholds() {
        // n = 3: floor(0.99) = 0, floor(1.98) = 1
        let t = TierThresholds::from_strengths(&[0.9, 0.1, 0.5], &config());
        assert_eq!(t.lower, 0.1);
        assert_eq!(t.upper, 0.5);

        // n = 10: floor(3.3) = 3, floor(6.6) = 6
        let strengths: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let t = TierThresholds::from_strengths(&strengths, &config());
        assert_eq!(t.lower, 0.3);
        assert_eq!(t.upper, 0.6);
    }

    #[test]
    fn test_ten_events_bucket_sizes() {
        let strengths: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let tiers = assign_tiers(&strengths, &config());
        let count = |tier| tiers.iter().filter(|t| **t == tier).count();
        assert_eq!(count(StrengthTier::Weak), 3);
        assert_eq!(count(StrengthTier::Medium), 3);
        assert_eq!(count(StrengthTier::Strong), 4);
    }

    #[test]
    fn test_all_equal_is_strong() {
        let tiers = assign_tiers(&[0.4, 0.4, 0.4, 0.4], &config());
        assert!(tiers.iter().all(|t| *t == StrengthTier::Strong));
    }

    #[test]
    fn test_single_event_is_strong() {
        assert_eq!(assign_tiers(&[0.05], &config()), vec![StrengthTier::Strong]);
    }

    #[test]
    fn test_monotonic() {
        let strengths = vec![0.31, 0.02, 0.77, 0.5, 0.5, 0.91, 0.13, 0.64, 0.08, 0.45, 0.99];
        let tiers = assign_tiers(&strengths, &config());
        for i in 0..strengths.len() {
            for j in 0..strengths.len() {
                if strengths[i] > strengths[j] {
                    assert!(
                        tiers[i] >= tiers[j],
                        "strength {} got {:?} but weaker {} got {:?}",
                        strengths[i],
                        tiers[i],
                        strengths[j],
                        tiers[j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_deterministic_rederivation() {
        let strengths = vec![0.2, 0.8, 0.5, 0.1, 0.6];
        assert_eq!(assign_tiers(&strengths, &config()), assign_tiers(&strengths, &config()));
    }
}
