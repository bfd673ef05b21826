use polars::prelude::*;

use crate::ingest::FIRST_VERSION;

/// (id, year) of every paper's first version
pub fn first_version_years(versions: LazyFrame) -> LazyFrame {
    versions
        .filter(
            col("version")
                .eq(lit(FIRST_VERSION))
                .and(col("year").is_not_null()),
        )
        .select([col("id"), col("year")])
        .unique_stable(Some(vec!["id".into()]), UniqueKeepStrategy::First)
}

/// Count, per (citing year, cited id), the distinct papers of that year citing it.
///
/// Output columns: `year`, `cited_id`, `references`, `year_orig`. Edges whose
/// citing paper has no first-version year are dropped, as are targets without
/// one.
pub fn citation_counts(citations: LazyFrame, versions: LazyFrame, exclude_self_citations: bool) -> LazyFrame {
    let years = first_version_years(versions);

    let edges = if exclude_self_citations {
        citations.filter(col("citing_id").neq(col("cited_id")))
    } else {
        citations
    };

    edges
        .inner_join(years.clone(), col("citing_id"), col("id"))
        .group_by([col("year"), col("cited_id")])
        .agg([col("citing_id")
            .n_unique()
            .cast(DataType::UInt32)
            .alias("references")])
        .inner_join(
            years.select([col("id"), col("year").alias("year_orig")]),
            col("cited_id"),
            col("id"),
        )
        .select([col("year"), col("cited_id"), col("references"), col("year_orig")])
}
