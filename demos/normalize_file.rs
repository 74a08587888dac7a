//! Example: Normalize a single analysis JSON file
//!
//! Usage:
//!   cargo run --example normalize_file -- [--json] <file.json>

use onset_ingest::view::{events_for_layer, layers_present};
use onset_ingest::{normalize_slice, DomainRecordSet, IngestConfig};
use std::env;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut json = false;
    let mut path: Option<String> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--help" | "-h" => {
                eprintln!("Usage: normalize_file [--json] <file.json>");
                return Ok(());
            }
            _ => path = Some(arg),
        }
    }
    let path = path.ok_or("Provide a JSON file path. Use --help for usage.")?;

    let config = IngestConfig::default();
    config.validate()?;

    let bytes = std::fs::read(&path)?;
    let t0 = Instant::now();
    let doc = normalize_slice(&bytes, &config)?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Normalization Results: {}", path);
    println!(
        "  Schema: {}",
        doc.schema.map(|k| k.name()).unwrap_or("unrecognized")
    );
    println!("  Canonical events: {}", doc.events.len());
    for layer in layers_present(&doc.events) {
        println!("    {:>6}: {}", layer.as_str(), events_for_layer(&doc.events, &layer).len());
    }

    if let Some(domain) = &doc.domain {
        let meta = domain.meta();
        println!("  Domain: {} ({} records)", domain.kind(), domain.record_count());
        println!(
            "    source='{}' sr={} duration={:.2}s bpm={:.1} total_events={}",
            meta.source, meta.sample_rate, meta.duration_sec, meta.bpm, meta.total_events
        );
        if let DomainRecordSet::StreamsSections(set) = domain {
            for stream in set.ordered_streams(&[]) {
                println!(
                    "    stream {:<10} {:>4} [{:.2}s, {:.2}s] {} onsets",
                    stream.id,
                    stream.band,
                    stream.start,
                    stream.end,
                    stream.events.len()
                );
            }
        }
    }
    println!("  Processing time: {:.2} ms", elapsed_ms);

    Ok(())
}
