//! Generic event arrays
//!
//! Accepts an `events` array wrapper or a bare top-level array of event
//! objects. This is the baseline path: it runs for every document alongside
//! whichever domain classifier claims it.

use serde_json::Value;

use super::probe::{any_has_key, array_field};
use super::{SchemaClassifier, SchemaKind};
use crate::assembly::canonical::{assemble_events, CANONICAL_TIME_KEYS};
use crate::config::IngestConfig;
use crate::records::event::EventPoint;

/// Classifier for generic event arrays
#[derive(Debug, Clone, Copy, Default)]
pub struct EventsClassifier;

impl EventsClassifier {
    /// Raw event array of a document: `events` first, then a bare array
    pub fn raw_events(doc: &Value) -> Option<&[Value]> {
        array_field(doc, "events").or_else(|| doc.as_array().map(Vec::as_slice))
    }
}

impl SchemaClassifier for EventsClassifier {
    type Output = Vec<EventPoint>;
    const KIND: SchemaKind = SchemaKind::Events;

    fn test(&self, doc: &Value, config: &IngestConfig) -> bool {
        Self::raw_events(doc)
            .map(|items| any_has_key(items, &CANONICAL_TIME_KEYS, config))
            .unwrap_or(false)
    }

    fn extract(&self, doc: &Value, config: &IngestConfig) -> Vec<EventPoint> {
        Self::raw_events(doc)
            .map(|items| assemble_events(items, config))
            .unwrap_or_default()
    }
}
