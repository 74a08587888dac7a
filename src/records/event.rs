//! Canonical event point and its categorical labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength tier derived from the per-document tertile split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrengthTier {
    /// Below the lower threshold ("약함")
    Weak,
    /// Between the thresholds ("중간")
    Medium,
    /// At or above the upper threshold ("강함")
    Strong,
}

impl StrengthTier {
    /// Label used in documents and views
    pub fn label(&self) -> &'static str {
        match self {
            StrengthTier::Strong => "강함",
            StrengthTier::Medium => "중간",
            StrengthTier::Weak => "약함",
        }
    }
}

/// Precision tier of a role-bearing event
///
/// Ordered by precedence: `P2` (high precision) outranks `P1`, which outranks `P0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrecisionTier {
    /// Low precision (main pulse)
    P0,
    /// Medium precision (pattern)
    P1,
    /// High precision (nuance)
    P2,
}

impl PrecisionTier {
    /// All tiers in ascending precedence
    pub const ALL: [PrecisionTier; 3] = [PrecisionTier::P0, PrecisionTier::P1, PrecisionTier::P2];

    /// Label used in documents and views
    pub fn label(&self) -> &'static str {
        match self {
            PrecisionTier::P0 => "P0",
            PrecisionTier::P1 => "P1",
            PrecisionTier::P2 => "P2",
        }
    }
}

/// Categorical layer of a canonical event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layer {
    /// Tertile-derived strength tier
    Strength(StrengthTier),
    /// Precision tier from a role-bearing document
    Precision(PrecisionTier),
    /// Opaque label supplied by the source
    Custom(String),
}

impl Layer {
    /// Parse a label, falling back to `Layer::Custom` for unknown vocabulary
    ///
    /// # Example
    ///
    /// ```
    /// use onset_ingest::records::event::{Layer, PrecisionTier, StrengthTier};
    ///
    /// assert_eq!(Layer::parse("강함"), Layer::Strength(StrengthTier::Strong));
    /// assert_eq!(Layer::parse("P1"), Layer::Precision(PrecisionTier::P1));
    /// assert_eq!(Layer::parse("ghost"), Layer::Custom("ghost".to_string()));
    /// ```
    pub fn parse(label: &str) -> Self {
        match label {
            "강함" => Layer::Strength(StrengthTier::Strong),
            "중간" => Layer::Strength(StrengthTier::Medium),
            "약함" => Layer::Strength(StrengthTier::Weak),
            "P0" => Layer::Precision(PrecisionTier::P0),
            "P1" => Layer::Precision(PrecisionTier::P1),
            "P2" => Layer::Precision(PrecisionTier::P2),
            other => Layer::Custom(other.to_string()),
        }
    }

    /// Label used in documents and views
    pub fn as_str(&self) -> &str {
        match self {
            Layer::Strength(tier) => tier.label(),
            Layer::Precision(tier) => tier.label(),
            Layer::Custom(label) => label,
        }
    }

    /// Precision tier, if this is a role layer
    pub fn precision(&self) -> Option<PrecisionTier> {
        match self {
            Layer::Precision(tier) => Some(*tier),
            _ => None,
        }
    }

    /// Vertical overlay row (0 = top) for known tiers
    ///
    /// Strong and `P0` share the top row, medium and `P1` the middle,
    /// weak and `P2` the bottom. Custom labels have no row.
    pub fn row(&self) -> Option<usize> {
        match self {
            Layer::Strength(StrengthTier::Strong) | Layer::Precision(PrecisionTier::P0) => Some(0),
            Layer::Strength(StrengthTier::Medium) | Layer::Precision(PrecisionTier::P1) => Some(1),
            Layer::Strength(StrengthTier::Weak) | Layer::Precision(PrecisionTier::P2) => Some(2),
            Layer::Custom(_) => None,
        }
    }
}

impl From<String> for Layer {
    fn from(label: String) -> Self {
        Layer::parse(&label)
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.as_str().to_string()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multi-tier membership: band names contributing to each precision tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    /// Bands in the low-precision tier
    #[serde(rename = "P0", default)]
    pub p0: Vec<String>,
    /// Bands in the medium-precision tier
    #[serde(rename = "P1", default)]
    pub p1: Vec<String>,
    /// Bands in the high-precision tier
    #[serde(rename = "P2", default)]
    pub p2: Vec<String>,
}

impl Roles {
    /// Bands assigned to `tier`
    pub fn bands(&self, tier: PrecisionTier) -> &[String] {
        match tier {
            PrecisionTier::P0 => &self.p0,
            PrecisionTier::P1 => &self.p1,
            PrecisionTier::P2 => &self.p2,
        }
    }

    /// True if `tier` has at least one band
    pub fn contains(&self, tier: PrecisionTier) -> bool {
        !self.bands(tier).is_empty()
    }

    /// Tiers with at least one band, in ascending precedence
    pub fn tiers(&self) -> impl Iterator<Item = PrecisionTier> + '_ {
        PrecisionTier::ALL.into_iter().filter(|t| self.contains(*t))
    }
}

/// Canonical event point
///
/// The uniform record every recognized document reduces to. Serializes with
/// the short `t` key, so a serialized list can be fed back through the generic
/// classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPoint {
    /// Event time in seconds
    #[serde(rename = "t")]
    pub time: f64,

    /// Strength in `[0, 1]`
    pub strength: f64,

    /// Optional texture (vertical placement) in `[0, 1]`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub texture: Option<f64>,

    /// Display color
    pub color: String,

    /// Categorical layer
    pub layer: Layer,

    /// Multi-tier membership, when the source encodes it
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub roles: Option<Roles>,
}

impl EventPoint {
    /// True if the event belongs to `layer`
    ///
    /// Role-bearing events belong to every precision tier whose band list is
    /// non-empty, so one event can be drawn in several tier rows.
    pub fn belongs_to(&self, layer: &Layer) -> bool {
        match (&self.roles, layer) {
            (Some(roles), Layer::Precision(tier)) => roles.contains(*tier),
            _ => &self.layer == layer,
        }
    }
}
