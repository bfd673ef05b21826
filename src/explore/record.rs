use anyhow::{anyhow, Result};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

use crate::common::read_parquet;
use crate::enrich::EXTERNAL_ID_COLUMN;

/// One row of the influential artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfluentialRecord {
    pub id: String,
    pub category_id: String,
    pub year: i32,
    pub references: u32,
    pub year_orig: i32,
    pub group_name: String,
    pub archive_name: String,
    pub category_name: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: String,
    pub journal_ref: Option<String>,
    pub cp_id: String,
}

fn strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn required_strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    Ok(strings(df, name)?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

fn ints(df: &DataFrame, name: &str) -> Result<Vec<i32>> {
    let column = df.column(name)?.cast(&DataType::Int32)?;
    column
        .i32()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| anyhow!("Null {} at row {}", name, row)))
        .collect()
}

fn counts(df: &DataFrame, name: &str) -> Result<Vec<u32>> {
    let column = df.column(name)?.cast(&DataType::UInt32)?;
    column
        .u32()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| anyhow!("Null {} at row {}", name, row)))
        .collect()
}

/// Convert the influential table into records
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<InfluentialRecord>> {
    let ids = required_strings(df, "id")?;
    let category_ids = required_strings(df, "category_id")?;
    let years = ints(df, "year")?;
    let references = counts(df, "references")?;
    let years_orig = ints(df, "year_orig")?;
    let group_names = required_strings(df, "group_name")?;
    let archive_names = required_strings(df, "archive_name")?;
    let category_names = required_strings(df, "category_name")?;
    let titles = required_strings(df, "title")?;
    let abstracts = required_strings(df, "abstract")?;
    let authors = required_strings(df, "authors")?;
    let journal_refs = strings(df, "journal_ref")?;
    let cp_ids = required_strings(df, EXTERNAL_ID_COLUMN)?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        records.push(InfluentialRecord {
            id: ids[i].clone(),
            category_id: category_ids[i].clone(),
            year: years[i],
            references: references[i],
            year_orig: years_orig[i],
            group_name: group_names[i].clone(),
            archive_name: archive_names[i].clone(),
            category_name: category_names[i].clone(),
            title: titles[i].clone(),
            abstract_text: abstracts[i].clone(),
            authors: authors[i].clone(),
            journal_ref: journal_refs[i].clone(),
            cp_id: cp_ids[i].clone(),
        });
    }

    Ok(records)
}

/// Read the influential artifact written by the build step
pub fn load_influential(path: &Path) -> Result<Vec<InfluentialRecord>> {
    let df = read_parquet(path)?;
    records_from_frame(&df)
}
