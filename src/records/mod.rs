//! Canonical and domain-extended record types
//!
//! All records are immutable value data created fresh for each document:
//! - Canonical event points (every recognized document)
//! - Domain record sets (energy, clarity, temporal, spectral, context,
//!   drum-band energy, streams/sections)
//! - The shared metadata envelope

pub mod clarity;
pub mod context;
pub mod drum_band;
pub mod energy;
pub mod event;
pub mod metadata;
pub mod spectral;
pub mod streams;
pub mod temporal;

pub use clarity::{ClarityEvent, ClarityRecordSet};
pub use context::{ContextEvent, ContextRecordSet};
pub use drum_band::{BandId, BandOnset, DrumBandRecordSet, DrumBands};
pub use energy::{EnergyEvent, EnergyRecordSet};
pub use event::{EventPoint, Layer, PrecisionTier, Roles, StrengthTier};
pub use metadata::Metadata;
pub use spectral::{SpectralEvent, SpectralRecordSet};
pub use streams::{Keypoint, KeypointKind, Section, Stream, StreamsSectionsRecordSet, SummaryValue};
pub use temporal::{TemporalEvent, TemporalRecordSet};
