/// Statistics from the ingest step
#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    pub lines_read: usize,
    pub records_parsed: usize,
    pub duplicate_records: usize,
    pub papers: usize,
    pub versions: usize,
    pub category_rows: usize,
    pub citation_edges: usize,
}

/// Statistics from the taxonomy import
#[derive(Debug, Clone, Default)]
pub struct TaxonomyStats {
    pub groups: usize,
    pub archives: usize,
    pub entries: usize,
}

/// Statistics from citation aggregation
#[derive(Debug, Clone, Default)]
pub struct AggregateStats {
    pub citation_edges: usize,
    pub dated_papers: usize,
    pub count_rows: usize,
}

/// Statistics from influential-set selection
#[derive(Debug, Clone, Default)]
pub struct SelectStats {
    pub candidate_rows: usize,
    pub selected_rows: usize,
    pub categories: usize,
    pub category_sizes: usize,
}

/// Statistics from cross-reference id enrichment
#[derive(Debug, Clone, Default)]
pub struct EnrichStats {
    pub rows: usize,
    pub distinct_ids: usize,
    pub resolved: usize,
    pub failed: usize,
}

/// Statistics from the build step (aggregate -> select -> enrich)
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    pub aggregate: AggregateStats,
    pub select: SelectStats,
    pub enrich: EnrichStats,
}
