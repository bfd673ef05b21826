use anyhow::{bail, Context, Result};
use log::{info, warn};
use reqwest::Client;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::cli::TaxonomyArgs;
use crate::common::{ensure_dir, format_elapsed, write_parquet, TaxonomyStats};
use crate::taxonomy::{build_taxonomy, events_from_html, fetch_taxonomy_page, taxonomy_frame, taxonomy_stats};

/// Read the saved page, or download it when no input file is given
fn load_taxonomy_page(args: &TaxonomyArgs) -> Result<String> {
    match &args.input {
        Some(path) => {
            info!("Reading taxonomy page from: {}", path);
            fs::read_to_string(path).with_context(|| format!("Failed to read taxonomy page: {}", path))
        }
        None => {
            info!("Fetching taxonomy page from: {}", args.url);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(fetch_taxonomy_page(
                &Client::new(),
                &args.url,
                Duration::from_secs(args.timeout),
            ))
        }
    }
}

/// Import the category taxonomy into a Parquet lookup table
pub fn run_taxonomy(args: TaxonomyArgs) -> Result<TaxonomyStats> {
    let start_time = Instant::now();

    info!("Starting taxonomy import");
    info!("Output: {}", args.output);

    let html = load_taxonomy_page(&args)?;
    let events = events_from_html(&html)?;
    let entries = build_taxonomy(events);

    if entries.is_empty() {
        bail!("No taxonomy entries found; the page layout may have changed");
    }

    let stats = taxonomy_stats(&entries);
    let unnamed = entries.iter().filter(|e| e.category_id.is_empty()).count();
    if unnamed > 0 {
        warn!("{} entries have a category heading without a code", unnamed);
    }

    let output = Path::new(&args.output);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let mut df = taxonomy_frame(&entries)?;
    write_parquet(&mut df, output)?;

    info!("");
    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(start_time.elapsed()));
    info!("Groups: {}", stats.groups);
    info!("Archives: {}", stats.archives);
    info!("Taxonomy entries: {}", stats.entries);
    info!("Output: {}", args.output);
    info!("=======================================================");

    Ok(stats)
}
