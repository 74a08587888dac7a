//! Categorical derivation from continuous scores
//!
//! - Tertile strength tiers, computed per document
//! - Precision-tier role resolution

pub mod roles;
pub mod tiers;

pub use roles::resolve_roles;
pub use tiers::{assign_tiers, TierThresholds};
