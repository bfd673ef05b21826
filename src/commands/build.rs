use anyhow::{Context, Result};
use log::{info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::cli::{BuildArgs, EnrichArgs, RankArgs};
use crate::common::{
    ensure_dir, format_elapsed, read_parquet, scan_parquet, write_csv, write_parquet, AggregateStats,
    ArtifactPaths, BuildStats, EnrichStats, SelectStats, TablePaths,
};
use crate::enrich::{
    blank_external_ids, create_translator_client, enrich_influential, ConnectedPapersTranslator, EnrichConfig,
    IdTranslator,
};
use crate::influence::{
    category_sizes, citation_counts, first_version_years, influential_candidates, select_influential,
    SelectorConfig, TieBreak,
};
use crate::taxonomy::collapse_taxonomy;

impl RankArgs {
    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            top_k: self.top_k,
            threshold: self.threshold,
            tie_break: if self.deterministic { TieBreak::Id } else { TieBreak::InputOrder },
        }
    }
}

impl EnrichArgs {
    pub fn enrich_config(&self) -> EnrichConfig {
        EnrichConfig {
            concurrency: self.concurrency.max(1),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Everything the build step needs besides its inputs
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub selector: SelectorConfig,
    pub exclude_self_citations: bool,
    pub enrich: EnrichConfig,
    pub skip_enrich: bool,
}

/// Influential set and category sizes before enrichment
pub struct RankedTables {
    pub influential: DataFrame,
    pub category_sizes: DataFrame,
    pub aggregate: AggregateStats,
    pub select: SelectStats,
}

/// Count citations and select the influential set from the ingest tables
pub fn rank_tables(tables: &TablePaths, taxonomy: &Path, options: &BuildOptions) -> Result<RankedTables> {
    tables.ensure_exist()?;

    let citations = read_parquet(&tables.citations)?;
    let versions = read_parquet(&tables.versions)?;
    let categories = scan_parquet(&tables.categories)?;
    let papers = scan_parquet(&tables.papers)?;
    let taxonomy = collapse_taxonomy(scan_parquet(taxonomy)?);

    let stage_start = Instant::now();
    let dated_papers = first_version_years(versions.clone().lazy()).collect()?.height();
    let counts = citation_counts(citations.clone().lazy(), versions.lazy(), options.exclude_self_citations)
        .collect()
        .context("Failed to aggregate citation counts")?;

    let aggregate = AggregateStats {
        citation_edges: citations.height(),
        dated_papers,
        count_rows: counts.height(),
    };
    info!(
        "Aggregated {} edges into {} (year, paper) counts in {}",
        aggregate.citation_edges,
        aggregate.count_rows,
        format_elapsed(stage_start.elapsed())
    );

    let stage_start = Instant::now();
    let candidate_rows = influential_candidates(counts.clone().lazy(), categories.clone(), taxonomy.clone())
        .collect()?
        .height();
    let influential = select_influential(counts.lazy(), categories.clone(), taxonomy.clone(), papers, &options.selector)
        .collect()
        .context("Failed to select influential papers")?;
    let category_sizes = category_sizes(categories, taxonomy)
        .collect()
        .context("Failed to compute category sizes")?;

    let select = SelectStats {
        candidate_rows,
        selected_rows: influential.height(),
        categories: influential.column("category_id")?.as_materialized_series().n_unique()?,
        category_sizes: category_sizes.height(),
    };
    info!(
        "Selected {} of {} candidate rows across {} categories in {}",
        select.selected_rows,
        select.candidate_rows,
        select.categories,
        format_elapsed(stage_start.elapsed())
    );

    Ok(RankedTables {
        influential,
        category_sizes,
        aggregate,
        select,
    })
}

/// Rank, enrich and write the web artifacts
pub async fn build_artifacts<T: IdTranslator>(
    tables: &TablePaths,
    taxonomy: &Path,
    output_dir: &Path,
    options: &BuildOptions,
    translator: &T,
) -> Result<BuildStats> {
    let ranked = rank_tables(tables, taxonomy, options)?;

    let (mut influential, enrich) = if options.skip_enrich {
        warn!("Skipping cross-reference lookups; every cp_id is empty");
        let rows = ranked.influential.height();
        let df = blank_external_ids(ranked.influential)?;
        (df, EnrichStats { rows, ..Default::default() })
    } else {
        enrich_influential(ranked.influential, translator, &options.enrich).await?
    };

    ensure_dir(output_dir)?;
    let paths = ArtifactPaths::in_dir(output_dir);
    let mut sizes = ranked.category_sizes;

    write_parquet(&mut sizes, &paths.category_sizes)?;
    write_parquet(&mut influential, &paths.influential)?;
    write_csv(&mut influential, &paths.influential_csv)?;

    Ok(BuildStats {
        aggregate: ranked.aggregate,
        select: ranked.select,
        enrich,
    })
}

pub async fn run_build_async(args: BuildArgs) -> Result<BuildStats> {
    let start_time = Instant::now();

    let options = BuildOptions {
        selector: args.rank.selector_config(),
        exclude_self_citations: args.exclude_self_citations,
        enrich: args.enrich.enrich_config(),
        skip_enrich: args.enrich.skip_enrich,
    };

    info!("Starting influential set build");
    info!("Tables directory: {}", args.tables_dir);
    info!("Taxonomy: {}", args.taxonomy);
    info!("Output directory: {}", args.output_dir);
    info!(
        "Top K: {} | threshold: {} | tie break: {:?}",
        options.selector.top_k, options.selector.threshold, options.selector.tie_break
    );
    if options.exclude_self_citations {
        info!("Excluding self-citations");
    }
    if !options.skip_enrich {
        info!("Translator: {}", args.enrich.translator_url);
    }

    let client = create_translator_client(options.enrich.timeout)?;
    let translator = ConnectedPapersTranslator::new(client, &args.enrich.translator_url);

    let tables = TablePaths::in_dir(&args.tables_dir);
    let output_dir = PathBuf::from(&args.output_dir);
    let stats = build_artifacts(&tables, Path::new(&args.taxonomy), &output_dir, &options, &translator).await?;

    let total_time = start_time.elapsed();

    info!("");
    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("");
    info!("Citation counts:");
    info!("  Citation edges: {}", stats.aggregate.citation_edges);
    info!("  Papers with a first-version year: {}", stats.aggregate.dated_papers);
    info!("  (year, paper) counts: {}", stats.aggregate.count_rows);
    info!("");
    info!("Selection:");
    info!("  Candidate rows: {}", stats.select.candidate_rows);
    info!("  Influential rows: {}", stats.select.selected_rows);
    info!("  Categories represented: {}", stats.select.categories);
    info!("  Category size rows: {}", stats.select.category_sizes);
    info!("");
    info!("Cross-reference ids:");
    info!("  Rows: {}", stats.enrich.rows);
    info!("  Distinct ids: {}", stats.enrich.distinct_ids);
    info!("  Resolved: {}", stats.enrich.resolved);
    info!("  Failed: {}", stats.enrich.failed);
    info!("");
    info!("Output directory: {}", output_dir.display());
    info!("=======================================================");

    Ok(stats)
}

pub fn run_build(args: BuildArgs) -> Result<BuildStats> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_build_async(args))
}
