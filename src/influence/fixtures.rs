//! Small in-memory tables shared by the ranking tests.

use polars::prelude::*;

/// (id, version, year) rows; month is set to 1 wherever a year is present
pub fn versions_frame(rows: &[(&str, &str, Option<i32>)]) -> DataFrame {
    DataFrame::new(vec![
        Column::new("id".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new("version".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()),
        Column::new("year".into(), rows.iter().map(|r| r.2).collect::<Vec<_>>()),
        Column::new("month".into(), rows.iter().map(|r| r.2.map(|_| 1i32)).collect::<Vec<_>>()),
    ])
    .unwrap()
}

/// (citing_id, cited_id) rows
pub fn edges_frame(edges: &[(&str, &str)]) -> DataFrame {
    DataFrame::new(vec![
        Column::new("citing_id".into(), edges.iter().map(|e| e.0).collect::<Vec<_>>()),
        Column::new("cited_id".into(), edges.iter().map(|e| e.1).collect::<Vec<_>>()),
    ])
    .unwrap()
}

/// (year, cited_id, references, year_orig) rows
pub fn counts_frame(rows: &[(i32, &str, u32, i32)]) -> DataFrame {
    DataFrame::new(vec![
        Column::new("year".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new("cited_id".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()),
        Column::new("references".into(), rows.iter().map(|r| r.2).collect::<Vec<_>>()),
        Column::new("year_orig".into(), rows.iter().map(|r| r.3).collect::<Vec<_>>()),
    ])
    .unwrap()
}

/// (paper id, category_id) rows
pub fn categories_frame(rows: &[(&str, &str)]) -> DataFrame {
    DataFrame::new(vec![
        Column::new("id".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new("category_id".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()),
    ])
    .unwrap()
}

/// Collapsed taxonomy from (group_name, category_id, category_name) rows
pub fn taxonomy_frame(rows: &[(&str, &str, &str)]) -> DataFrame {
    DataFrame::new(vec![
        Column::new("category_id".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()),
        Column::new("group_name".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new("archive_name".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new("archive_id".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new("category_name".into(), rows.iter().map(|r| r.2).collect::<Vec<_>>()),
        Column::new("category_description".into(), rows.iter().map(|_| "").collect::<Vec<_>>()),
    ])
    .unwrap()
}

/// Papers with generated titles: "Title of <id>"
pub fn papers_frame(ids: &[&str]) -> DataFrame {
    let titles: Vec<String> = ids.iter().map(|id| format!("Title of {}", id)).collect();
    DataFrame::new(vec![
        Column::new("id".into(), ids.to_vec()),
        Column::new("title".into(), titles),
        Column::new("abstract".into(), ids.iter().map(|_| "abstract").collect::<Vec<_>>()),
        Column::new("authors".into(), ids.iter().map(|_| "A. Author").collect::<Vec<_>>()),
        Column::new("journal_ref".into(), ids.iter().map(|_| None::<&str>).collect::<Vec<_>>()),
    ])
    .unwrap()
}
