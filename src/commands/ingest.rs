use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::IngestArgs;
use crate::common::{ensure_dir, format_elapsed, percent, write_parquet, IngestStats, TablePaths};
use crate::ingest::{build_pool, citation_edges_frame, ingest_metadata, load_citation_graph, open_input};

/// Parse the metadata dump and citation graph into the four ingest tables
pub fn run_ingest(args: IngestArgs) -> Result<IngestStats> {
    let start_time = Instant::now();

    info!("Starting arXiv metadata ingestion");
    info!("Metadata: {}", args.metadata);
    info!("Citations: {}", args.citations);
    info!("Output directory: {}", args.output_dir);
    info!("Batch size: {} lines", args.batch_size);

    let output_dir = PathBuf::from(&args.output_dir);
    ensure_dir(&output_dir)?;
    let paths = TablePaths::in_dir(&output_dir);

    let pool = build_pool(args.threads)?;
    info!("Parsing with {} threads", pool.current_num_threads());

    let parse_start = Instant::now();
    let reader = open_input(Path::new(&args.metadata))?;
    let builder = ingest_metadata(reader, args.batch_size, &pool)
        .with_context(|| format!("Failed to ingest metadata: {}", args.metadata))?;

    let mut stats = IngestStats {
        lines_read: builder.lines_read,
        records_parsed: builder.records_parsed,
        duplicate_records: builder.duplicate_records,
        papers: builder.paper_count(),
        versions: builder.version_count(),
        category_rows: builder.category_row_count(),
        ..Default::default()
    };

    info!(
        "Parsed {} records ({} duplicates dropped) in {}",
        stats.records_parsed,
        stats.duplicate_records,
        format_elapsed(parse_start.elapsed())
    );

    let mut tables = builder.finish()?;
    write_parquet(&mut tables.papers, &paths.papers)?;
    write_parquet(&mut tables.versions, &paths.versions)?;
    write_parquet(&mut tables.categories, &paths.categories)?;

    info!("Loading citation graph...");
    let graph = load_citation_graph(open_input(Path::new(&args.citations))?)
        .with_context(|| format!("Failed to load citation graph: {}", args.citations))?;
    let mut edges = citation_edges_frame(&graph)?;
    stats.citation_edges = edges.height();
    write_parquet(&mut edges, &paths.citations)?;

    let total_time = start_time.elapsed();

    info!("");
    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("Lines read: {}", stats.lines_read);
    info!("Records parsed: {}", stats.records_parsed);
    info!(
        "Duplicate records dropped: {} ({:.2}%)",
        stats.duplicate_records,
        percent(stats.duplicate_records, stats.records_parsed)
    );
    info!("Papers: {}", stats.papers);
    info!("Version rows: {}", stats.versions);
    info!("Category rows: {}", stats.category_rows);
    info!("Citing papers: {}", graph.len());
    info!("Citation edges: {}", stats.citation_edges);
    info!("Output directory: {}", output_dir.display());
    info!("=======================================================");

    Ok(stats)
}
