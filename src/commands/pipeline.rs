use anyhow::{Context, Result};
use log::info;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use uuid::Uuid;

use crate::cli::{BuildArgs, IngestArgs, PipelineArgs, TaxonomyArgs};
use crate::commands::{build, ingest, taxonomy};
use crate::common::{format_elapsed, BuildStats, IngestStats, TaxonomyStats};

/// Timeout for fetching the taxonomy page inside the pipeline
const TAXONOMY_FETCH_TIMEOUT_SECS: u64 = 30;

/// Context for managing pipeline state and temp files
struct PipelineContext {
    work_dir: PathBuf,
    taxonomy_output: PathBuf,
    keep_intermediates: bool,
}

impl PipelineContext {
    fn new(args: &PipelineArgs) -> Result<Self> {
        let run_id = &Uuid::new_v4().to_string()[..8];

        let temp_dir = args.temp_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        let work_dir = temp_dir.join(format!("arxiv_tables_{}", run_id));
        fs::create_dir_all(&work_dir)
            .with_context(|| format!("Failed to create temp directory: {}", work_dir.display()))?;

        let taxonomy_output = work_dir.join("taxonomy.parquet");

        Ok(Self {
            work_dir,
            taxonomy_output,
            keep_intermediates: args.keep_intermediates,
        })
    }

    fn cleanup(&self) -> Result<()> {
        if self.keep_intermediates {
            info!("Keeping intermediate tables in: {}", self.work_dir.display());
            return Ok(());
        }

        info!("Cleaning up intermediate tables...");

        if self.work_dir.exists() {
            fs::remove_dir_all(&self.work_dir)
                .with_context(|| format!("Failed to remove: {}", self.work_dir.display()))?;
        }

        Ok(())
    }
}

impl Drop for PipelineContext {
    fn drop(&mut self) {
        // Best-effort cleanup when a step fails
        if !self.keep_intermediates {
            let _ = fs::remove_dir_all(&self.work_dir);
        }
    }
}

/// Run the full pipeline: ingest -> taxonomy -> build
pub fn run_pipeline(args: PipelineArgs) -> Result<(IngestStats, TaxonomyStats, BuildStats)> {
    let start_time = Instant::now();

    info!("Starting arXiv influential papers pipeline");
    info!("Metadata: {}", args.metadata);
    info!("Citations: {}", args.citations);
    match &args.taxonomy_input {
        Some(path) => info!("Taxonomy page: {}", path),
        None => info!("Taxonomy URL: {}", args.taxonomy_url),
    }
    info!("Output directory: {}", args.output_dir);

    let ctx = PipelineContext::new(&args)?;

    info!("Temp directory: {}", ctx.work_dir.display());

    info!("");
    info!("=== STEP 1/3: Ingesting metadata and citations ===");
    info!("");

    let ingest_args = IngestArgs {
        metadata: args.metadata.clone(),
        citations: args.citations.clone(),
        output_dir: ctx.work_dir.to_string_lossy().to_string(),
        threads: args.threads,
        batch_size: args.batch_size,
        log_level: args.log_level.clone(),
    };

    let ingest_stats = ingest::run_ingest(ingest_args)
        .context("Ingest step failed")?;

    info!("Ingest complete: {} papers, {} citation edges", ingest_stats.papers, ingest_stats.citation_edges);

    info!("");
    info!("=== STEP 2/3: Importing category taxonomy ===");
    info!("");

    let taxonomy_args = TaxonomyArgs {
        input: args.taxonomy_input.clone(),
        url: args.taxonomy_url.clone(),
        output: ctx.taxonomy_output.to_string_lossy().to_string(),
        timeout: TAXONOMY_FETCH_TIMEOUT_SECS,
        log_level: args.log_level.clone(),
    };

    let taxonomy_stats = taxonomy::run_taxonomy(taxonomy_args)
        .context("Taxonomy step failed")?;

    info!("Taxonomy complete: {} entries", taxonomy_stats.entries);

    info!("");
    info!("=== STEP 3/3: Building influential set ===");
    info!("");

    let build_args = BuildArgs {
        tables_dir: ctx.work_dir.to_string_lossy().to_string(),
        taxonomy: ctx.taxonomy_output.to_string_lossy().to_string(),
        output_dir: args.output_dir.clone(),
        rank: args.rank.clone(),
        exclude_self_citations: args.exclude_self_citations,
        enrich: args.enrich.clone(),
        log_level: args.log_level.clone(),
    };

    let build_stats = build::run_build(build_args)
        .context("Build step failed")?;

    info!("Build complete: {} influential rows", build_stats.select.selected_rows);

    ctx.cleanup()?;

    let total_time = start_time.elapsed();

    info!("");
    info!("==================== PIPELINE COMPLETE ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("");
    info!("Ingest step:");
    info!("  Records parsed: {}", ingest_stats.records_parsed);
    info!("  Duplicate records dropped: {}", ingest_stats.duplicate_records);
    info!("  Papers: {}", ingest_stats.papers);
    info!("  Citation edges: {}", ingest_stats.citation_edges);
    info!("");
    info!("Taxonomy step:");
    info!("  Groups: {}", taxonomy_stats.groups);
    info!("  Entries: {}", taxonomy_stats.entries);
    info!("");
    info!("Build step:");
    info!("  (year, paper) counts: {}", build_stats.aggregate.count_rows);
    info!("  Influential rows: {}", build_stats.select.selected_rows);
    info!("  Cross-reference ids resolved: {}", build_stats.enrich.resolved);
    info!("  Cross-reference lookups failed: {}", build_stats.enrich.failed);
    info!("");
    info!("Output directory: {}", args.output_dir);
    info!("===========================================================");

    Ok((ingest_stats, taxonomy_stats, build_stats))
}
