//! Example: Normalize many analysis JSON files in parallel
//!
//! Usage:
//!   cargo run --release --example normalize_batch -- [--jobs N] [--json] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across documents. Each normalization is single-threaded and
//!   shares nothing with the others.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use onset_ingest::{normalize_slice, IngestConfig, NormalizedDocument};
use rayon::prelude::*;
use std::env;
use std::time::Instant;

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

struct ItemOut {
    path: String,
    result: Result<NormalizedDocument, String>,
    processing_ms: f64,
}

fn normalize_path(path: &str, config: &IngestConfig) -> ItemOut {
    let t0 = Instant::now();
    let result = std::fs::read(path)
        .map_err(|e| format!("read failed: {e}"))
        .and_then(|bytes| normalize_slice(&bytes, config).map_err(|e| e.to_string()));
    ItemOut {
        path: path.to_string(),
        result,
        processing_ms: t0.elapsed().as_secs_f64() * 1000.0,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: normalize_batch [--jobs N] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one JSON file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = IngestConfig::default();
    config.validate()?;

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| normalize_path(path, &config))
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        match (&o.result, json) {
            (Ok(doc), true) => println!(
                "{}",
                serde_json::json!({
                    "file": o.path,
                    "schema": doc.schema,
                    "events": doc.events.len(),
                    "domain_records": doc.domain.as_ref().map(|d| d.record_count()),
                    "processing_time_ms": o.processing_ms,
                })
            ),
            (Err(e), true) => println!("{}", serde_json::json!({ "file": o.path, "error": e })),
            (Ok(doc), false) => println!(
                "[{}/{}] {}: schema={} events={} domain_records={} time={:.2}ms",
                idx + 1,
                outs.len(),
                o.path,
                doc.schema.map(|k| k.name()).unwrap_or("none"),
                doc.events.len(),
                doc.domain.as_ref().map(|d| d.record_count()).unwrap_or(0),
                o.processing_ms
            ),
            (Err(e), false) => println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), o.path, e),
        }
    }

    let ok = outs.iter().filter(|o| o.result.is_ok()).count();
    let unrecognized = outs
        .iter()
        .filter(|o| matches!(&o.result, Ok(doc) if doc.schema.is_none()))
        .count();
    eprintln!(
        "Done: ok={}/{} unrecognized={} wall={:.0}ms",
        ok,
        outs.len(),
        unrecognized,
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
