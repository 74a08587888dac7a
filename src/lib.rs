//! # Onset Ingest
//!
//! A normalization engine for onset-analysis JSON documents. It accepts the
//! loosely structured output of many independent analysis pipelines and
//! reduces it to a small set of canonical record types, without the caller
//! declaring which kind of document it received.
//!
//! ## Features
//!
//! - **Schema Detection**: Shallow structural signatures tried in a fixed priority order
//! - **Lenient Coercion**: Total conversion of untyped fields to bounded numbers with defaults
//! - **Tier Derivation**: Per-document tertile split of strengths into strong/medium/weak
//! - **Role Resolution**: Multi-tier (`P0`/`P1`/`P2`) membership with primary-tier selection
//! - **Domain Records**: Energy, clarity, temporal, spectral, context, drum-band and
//!   streams/sections tables
//!
//! ## Quick Start
//!
//! ```
//! use onset_ingest::{normalize_str, IngestConfig, SchemaKind};
//!
//! let json = r#"{
//!     "source": "loop.wav", "sr": 22050, "duration_sec": 3,
//!     "energy_rms_min": 0.0,
//!     "events": [{"t": 0, "strength": 0.1}, {"t": 1, "strength": 0.5}, {"t": 2, "strength": 0.9}]
//! }"#;
//!
//! let doc = normalize_str(json, &IngestConfig::default())?;
//!
//! assert_eq!(doc.schema, Some(SchemaKind::Energy));
//! for event in &doc.events {
//!     println!("{:.2}s  {}  strength {:.2}", event.time, event.layer, event.strength);
//! }
//! # Ok::<(), onset_ingest::IngestError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! JSON → Schema Classification → Coercion → Tier/Role Derivation
//!      → Canonical + Domain Records
//! ```
//!
//! Every call is independent and stateless; documents can be normalized in
//! parallel without locking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembly;
pub mod coercion;
pub mod config;
pub mod derivation;
pub mod error;
pub mod records;
pub mod schema;
pub mod view;

// Re-export main types
pub use assembly::document::{
    extract_as, extract_domain, normalize_document, normalize_events, normalize_slice,
    normalize_str, DomainRecordSet, NormalizedDocument,
};
pub use config::IngestConfig;
pub use error::IngestError;
pub use records::{EventPoint, Layer, Metadata, PrecisionTier, Roles, StrengthTier};
pub use schema::{classify, SchemaClassifier, SchemaKind};
