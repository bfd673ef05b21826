use polars::prelude::*;

/// Papers kept per (category, year)
pub const DEFAULT_TOP_K: usize = 3;

/// Citation count a paper must strictly exceed to be kept
pub const DEFAULT_THRESHOLD: u32 = 10;

/// How rows with equal counts are ordered inside a (category, year) group.
///
/// `InputOrder` keeps whatever order the rows reach the ranking in, so ties
/// at the K-th slot may resolve differently between runs. `Id` adds the
/// cited id (ascending) as a secondary key and makes the output reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    InputOrder,
    Id,
}

#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub top_k: usize,
    pub threshold: u32,
    pub tie_break: TieBreak,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
            tie_break: TieBreak::InputOrder,
        }
    }
}

/// Column order of the influential table
pub const INFLUENTIAL_COLUMNS: [&str; 12] = [
    "id",
    "category_id",
    "year",
    "references",
    "year_orig",
    "group_name",
    "archive_name",
    "category_name",
    "title",
    "abstract",
    "authors",
    "journal_ref",
];

/// Citation counts joined to every category of the cited paper.
///
/// Categories missing from the taxonomy are dropped. `taxonomy` must already
/// be collapsed to one row per category id.
pub fn influential_candidates(counts: LazyFrame, categories: LazyFrame, taxonomy: LazyFrame) -> LazyFrame {
    let known_categories = categories.inner_join(
        taxonomy.select([col("category_id")]),
        col("category_id"),
        col("category_id"),
    );

    counts.inner_join(known_categories, col("cited_id"), col("id"))
}

fn rank_options(tie_break: TieBreak) -> (Vec<Expr>, SortMultipleOptions) {
    let (by, descending) = match tie_break {
        TieBreak::InputOrder => (vec![col("references")], vec![true]),
        TieBreak::Id => (vec![col("references"), col("cited_id")], vec![true, false]),
    };

    let options = SortMultipleOptions::default()
        .with_order_descending_multi(descending)
        .with_maintain_order(true);

    (by, options)
}

/// Top-K most cited papers per (category, year) above the threshold, with
/// taxonomy names and paper metadata attached.
///
/// A group with fewer than K qualifying papers yields fewer rows; a group
/// with none yields no rows.
pub fn select_influential(
    counts: LazyFrame,
    categories: LazyFrame,
    taxonomy: LazyFrame,
    papers: LazyFrame,
    config: &SelectorConfig,
) -> LazyFrame {
    let (by, options) = rank_options(config.tie_break);
    let top_k = config.top_k;
    let ranked = |name: &str| {
        col(name)
            .sort_by(by.clone(), options.clone())
            .head(Some(top_k))
    };

    let names = taxonomy.clone().select([
        col("category_id"),
        col("group_name"),
        col("archive_name"),
        col("category_name"),
    ]);

    influential_candidates(counts, categories, taxonomy)
        .group_by([col("category_id"), col("year")])
        .agg([ranked("cited_id"), ranked("references"), ranked("year_orig")])
        .explode([col("cited_id"), col("references"), col("year_orig")])
        .filter(col("references").gt(lit(config.threshold)))
        .inner_join(names, col("category_id"), col("category_id"))
        .inner_join(papers, col("cited_id"), col("id"))
        .rename(["cited_id"], ["id"], true)
        .select(INFLUENTIAL_COLUMNS.iter().map(|name| col(*name)).collect::<Vec<_>>())
        .sort(
            ["category_id", "year", "references"],
            SortMultipleOptions::default()
                .with_order_descending_multi([false, false, true])
                .with_maintain_order(true),
        )
}
