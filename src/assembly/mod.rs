//! Record assembly
//!
//! - `canonical`: raw event arrays to canonical event points
//! - `document`: whole-document entry points combining the generic and domain paths

pub mod canonical;
pub mod document;

pub use canonical::assemble_events;
pub use document::{
    extract_as, extract_domain, normalize_document, normalize_events, normalize_slice,
    normalize_str, DomainRecordSet, NormalizedDocument,
};
