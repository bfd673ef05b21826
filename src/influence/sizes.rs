use polars::prelude::*;

/// Paper count per category for the treemap.
///
/// A paper is counted once per taxonomy group: when it has two categories in
/// the same group only the first one counts, so group totals are paper
/// totals. Categories missing from the taxonomy keep null names.
pub fn category_sizes(categories: LazyFrame, taxonomy: LazyFrame) -> LazyFrame {
    let names = taxonomy.select([
        col("category_id"),
        col("group_name"),
        col("category_name"),
        col("category_description"),
    ]);

    categories
        .left_join(names, col("category_id"), col("category_id"))
        .unique_stable(
            Some(vec!["id".into(), "group_name".into()]),
            UniqueKeepStrategy::First,
        )
        .group_by([col("category_id")])
        .agg([
            col("group_name").first(),
            col("category_name").first(),
            col("category_description").first(),
            col("id").count().cast(DataType::UInt32).alias("count"),
        ])
        .sort(
            ["count", "category_id"],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_maintain_order(true),
        )
}
