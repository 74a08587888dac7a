//! Metadata envelope shared by every domain record set

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coercion::numeric::{coerce_count, coerce_number, coerce_string, coerce_u32};

/// Default sample rate when the source omits it
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Default STFT hop length when the source omits it
pub const DEFAULT_HOP_LENGTH: u32 = 256;

/// Default STFT window size when the source omits it
pub const DEFAULT_N_FFT: u32 = 2048;

/// Source-level metadata
///
/// Every field is read leniently: absence or garbage yields the default and
/// never blocks record extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source identifier (file or stem name)
    pub source: String,

    /// Sample rate in Hz
    #[serde(rename = "sr")]
    pub sample_rate: u32,

    /// Audio duration in seconds
    pub duration_sec: f64,

    /// STFT hop length in samples
    pub hop_length: u32,

    /// STFT window size in samples
    pub n_fft: u32,

    /// Tempo estimate (0.0 when unknown)
    pub bpm: f64,

    /// Event count recorded by the producer, or the number of extracted records
    pub total_events: usize,
}

impl Metadata {
    /// Read the envelope from `fields`, defaulting `total_events` to `record_count`
    pub fn from_fields(fields: Option<&Map<String, Value>>, record_count: usize) -> Self {
        let get = |key: &str| fields.and_then(|m| m.get(key));

        Self {
            source: coerce_string(get("source"), ""),
            sample_rate: coerce_u32(get("sr"), DEFAULT_SAMPLE_RATE),
            duration_sec: coerce_number(get("duration_sec"), 0.0),
            hop_length: coerce_u32(get("hop_length"), DEFAULT_HOP_LENGTH),
            n_fft: coerce_u32(get("n_fft"), DEFAULT_N_FFT),
            bpm: coerce_number(get("bpm"), 0.0),
            total_events: coerce_count(get("total_events"), record_count),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::from_fields(None, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_absent() {
        let meta = Metadata::from_fields(None, 0);
        assert_eq!(meta.source, "");
        assert_eq!(meta.sample_rate, 22050);
        assert_eq!(meta.duration_sec, 0.0);
        assert_eq!(meta.hop_length, 256);
        assert_eq!(meta.n_fft, 2048);
        assert_eq!(meta.bpm, 0.0);
        assert_eq!(meta.total_events, 0);
        assert_eq!(meta, Metadata::default());
    }

    #[test]
    fn test_reads_fields() {
        let v = json!({
            "source": "drums.wav",
            "sr": 44100,
            "duration_sec": 12.5,
            "hop_length": 512,
            "bpm": 121.3,
            "total_events": 40
        });
        let meta = Metadata::from_fields(v.as_object(), 3);
        assert_eq!(meta.source, "drums.wav");
        assert_eq!(meta.sample_rate, 44100);
        assert_eq!(meta.duration_sec, 12.5);
        assert_eq!(meta.hop_length, 512);
        assert_eq!(meta.bpm, 121.3);
        assert_eq!(meta.total_events, 40);
    }

    #[test]
    fn test_garbled_fields_default() {
        let v = json!({"sr": "fast", "total_events": -3, "bpm": null});
        let meta = Metadata::from_fields(v.as_object(), 5);
        assert_eq!(meta.sample_rate, 22050);
        assert_eq!(meta.total_events, 5);
        assert_eq!(meta.bpm, 0.0);
    }
}
