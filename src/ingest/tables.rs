use anyhow::Result;
use polars::prelude::*;
use std::collections::HashSet;

use super::record::{parse_record, PaperRecord, VersionEntry};
use super::version::{version_rows, VersionRow};

/// A metadata line parsed into its record and version rows
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    pub record: PaperRecord,
    pub versions: Vec<VersionRow>,
}

/// Parse a metadata line and derive its version rows. Both steps are fatal
/// on malformed input.
pub fn parse_line(line: &str, line_no: usize) -> Result<ParsedRecord> {
    let record = parse_record(line, line_no)?;
    let versions = version_rows(&record.id, record.versions.iter().map(VersionEntry::label))
        .map_err(|e| e.context(format!("Invalid identifier at line {}", line_no)))?;
    Ok(ParsedRecord { record, versions })
}

/// The three per-paper tables derived from the metadata dump
#[derive(Debug, Clone)]
pub struct PaperTables {
    pub papers: DataFrame,
    pub versions: DataFrame,
    pub categories: DataFrame,
}

/// Accumulates the paper, version and category tables column by column.
///
/// Each table keeps its own first-seen id set, so a duplicate id is dropped
/// from each table independently of the others.
#[derive(Debug, Default)]
pub struct TableBuilder {
    paper_seen: HashSet<String>,
    version_seen: HashSet<String>,
    category_seen: HashSet<String>,

    paper_ids: Vec<String>,
    titles: Vec<String>,
    abstracts: Vec<String>,
    authors: Vec<String>,
    journal_refs: Vec<Option<String>>,

    version_ids: Vec<String>,
    version_labels: Vec<String>,
    version_years: Vec<Option<i32>>,
    version_months: Vec<Option<i32>>,

    category_paper_ids: Vec<String>,
    category_ids: Vec<String>,

    pub lines_read: usize,
    pub records_parsed: usize,
    pub duplicate_records: usize,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, parsed: ParsedRecord) {
        let ParsedRecord { record, versions } = parsed;
        self.records_parsed += 1;

        if self.category_seen.insert(record.id.clone()) {
            for code in record.categories.codes() {
                self.category_paper_ids.push(record.id.clone());
                self.category_ids.push(code.to_string());
            }
        }

        if self.version_seen.insert(record.id.clone()) {
            for row in versions {
                self.version_ids.push(row.id);
                self.version_labels.push(row.version);
                self.version_years.push(row.year);
                self.version_months.push(row.month);
            }
        }

        if self.paper_seen.insert(record.id.clone()) {
            self.paper_ids.push(record.id);
            self.titles.push(record.title);
            self.abstracts.push(record.abstract_text);
            self.authors.push(record.authors);
            self.journal_refs.push(record.journal_ref);
        } else {
            self.duplicate_records += 1;
        }
    }

    pub fn paper_count(&self) -> usize {
        self.paper_ids.len()
    }

    pub fn version_count(&self) -> usize {
        self.version_ids.len()
    }

    pub fn category_row_count(&self) -> usize {
        self.category_ids.len()
    }

    pub fn finish(self) -> Result<PaperTables> {
        let papers = DataFrame::new(vec![
            Column::new("id".into(), self.paper_ids),
            Column::new("title".into(), self.titles),
            Column::new("abstract".into(), self.abstracts),
            Column::new("authors".into(), self.authors),
            Column::new("journal_ref".into(), self.journal_refs),
        ])?;

        let versions = DataFrame::new(vec![
            Column::new("id".into(), self.version_ids),
            Column::new("version".into(), self.version_labels),
            Column::new("year".into(), self.version_years),
            Column::new("month".into(), self.version_months),
        ])?;

        let categories = DataFrame::new(vec![
            Column::new("id".into(), self.category_paper_ids),
            Column::new("category_id".into(), self.category_ids),
        ])?;

        Ok(PaperTables {
            papers,
            versions,
            categories,
        })
    }
}
