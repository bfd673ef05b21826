//! Category taxonomy: group -> archive -> category lookup table.
//!
//! The taxonomy page is a flat run of headings and paragraphs. It is turned
//! into [`TaxonomyEvent`]s by [`html::events_from_html`] and folded into rows
//! by [`TaxonomyBuilder`].

pub mod html;

use anyhow::Result;
use lazy_static::lazy_static;
use polars::prelude::*;
use regex::Regex;
use std::collections::HashSet;

use crate::common::TaxonomyStats;

pub use html::*;

lazy_static! {
    // "Astrophysics (astro-ph)" or "cs.AI (Artificial Intelligence)"
    static ref PAREN_PATTERN: Regex = Regex::new(r"^(.*)\((.*)\)\s*$").unwrap();
}

/// One element of the taxonomy listing, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyEvent {
    /// Top level group, e.g. "Physics"
    Group(String),
    /// Archive heading, "Name (code)"
    Archive(String),
    /// Category heading, "code (Name)"
    Category(String),
    /// Description paragraph of the current category
    Description(String),
}

/// One row of the taxonomy table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub group_name: String,
    pub archive_name: String,
    pub archive_id: String,
    pub category_name: String,
    pub category_id: String,
    pub category_description: String,
}

/// Split "outer (inner)" into trimmed (outer, inner).
///
/// Without a parenthesised part the whole text is returned as `outer` and
/// `inner` is `None`.
pub fn split_parenthesized(text: &str) -> (String, Option<String>) {
    match PAREN_PATTERN.captures(text) {
        Some(cap) => (
            cap[1].trim().to_string(),
            Some(cap[2].trim().to_string()),
        ),
        None => (text.trim().to_string(), None),
    }
}

/// Folds taxonomy events into entries, one per description paragraph.
///
/// Headings only update the "last seen" registers; a heading without a
/// following paragraph produces nothing.
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    group_name: String,
    archive_id: String,
    archive_name: String,
    category_id: String,
    category_name: String,
    entries: Vec<TaxonomyEntry>,
}

impl TaxonomyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: TaxonomyEvent) {
        match event {
            TaxonomyEvent::Group(text) => {
                let text = text.trim().to_string();
                self.archive_id = text.clone();
                self.archive_name = text.clone();
                self.group_name = text;
            }
            TaxonomyEvent::Archive(text) => {
                let (name, code) = split_parenthesized(&text);
                match code {
                    Some(code) => {
                        self.archive_name = name;
                        self.archive_id = code;
                    }
                    None => {
                        self.archive_name = name;
                        self.archive_id = String::new();
                    }
                }
            }
            TaxonomyEvent::Category(text) => {
                // category headings put the code first: "cs.AI (Artificial Intelligence)"
                let (outer, inner) = split_parenthesized(&text);
                match inner {
                    Some(name) => {
                        self.category_id = outer;
                        self.category_name = name;
                    }
                    None => {
                        self.category_id = String::new();
                        self.category_name = outer;
                    }
                }
            }
            TaxonomyEvent::Description(text) => {
                self.entries.push(TaxonomyEntry {
                    group_name: self.group_name.clone(),
                    archive_name: self.archive_name.clone(),
                    archive_id: self.archive_id.clone(),
                    category_name: self.category_name.clone(),
                    category_id: self.category_id.clone(),
                    category_description: text.trim().to_string(),
                });
            }
        }
    }

    pub fn finish(self) -> Vec<TaxonomyEntry> {
        self.entries
    }
}

/// Fold a sequence of events into taxonomy entries
pub fn build_taxonomy<I>(events: I) -> Vec<TaxonomyEntry>
where
    I: IntoIterator<Item = TaxonomyEvent>,
{
    let mut builder = TaxonomyBuilder::new();
    for event in events {
        builder.apply(event);
    }
    builder.finish()
}

/// Counts of distinct groups and archives among the entries
pub fn taxonomy_stats(entries: &[TaxonomyEntry]) -> TaxonomyStats {
    let groups: HashSet<&str> = entries.iter().map(|e| e.group_name.as_str()).collect();
    let archives: HashSet<(&str, &str)> = entries
        .iter()
        .map(|e| (e.group_name.as_str(), e.archive_id.as_str()))
        .collect();

    TaxonomyStats {
        groups: groups.len(),
        archives: archives.len(),
        entries: entries.len(),
    }
}

fn string_column(name: &str, entries: &[TaxonomyEntry], field: fn(&TaxonomyEntry) -> &str) -> Column {
    let values: Vec<&str> = entries.iter().map(field).collect();
    Column::new(name.into(), values)
}

/// Build the taxonomy DataFrame
pub fn taxonomy_frame(entries: &[TaxonomyEntry]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        string_column("group_name", entries, |e| e.group_name.as_str()),
        string_column("archive_name", entries, |e| e.archive_name.as_str()),
        string_column("archive_id", entries, |e| e.archive_id.as_str()),
        string_column("category_name", entries, |e| e.category_name.as_str()),
        string_column("category_id", entries, |e| e.category_id.as_str()),
        string_column("category_description", entries, |e| e.category_description.as_str()),
    ])?;

    Ok(df)
}

/// Collapse the taxonomy to one row per category id, keeping the first
/// description seen for each.
pub fn collapse_taxonomy(taxonomy: LazyFrame) -> LazyFrame {
    taxonomy
        .group_by_stable([col("category_id")])
        .agg([
            col("group_name").first(),
            col("archive_name").first(),
            col("archive_id").first(),
            col("category_name").first(),
            col("category_description").first(),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use TaxonomyEvent::*;

    fn s(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn test_split_parenthesized() {
        assert_eq!(
            split_parenthesized("Astrophysics (astro-ph)"),
            (s("Astrophysics"), Some(s("astro-ph")))
        );
        assert_eq!(
            split_parenthesized("cs.AI (Artificial Intelligence)"),
            (s("cs.AI"), Some(s("Artificial Intelligence")))
        );
        assert_eq!(split_parenthesized(" Economics "), (s("Economics"), None));
    }

    #[test]
    fn test_registers_carry_forward() {
        let entries = build_taxonomy(vec![
            Group(s("Physics")),
            Archive(s("Astrophysics (astro-ph)")),
            Category(s("astro-ph.CO (Cosmology and Nongalactic Astrophysics)")),
            Description(s("Phenomenology of early universe")),
            Category(s("astro-ph.EP (Earth and Planetary Astrophysics)")),
            Description(s("Interplanetary medium")),
            Description(s("Second paragraph")),
        ]);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].group_name, "Physics");
        assert_eq!(entries[0].archive_name, "Astrophysics");
        assert_eq!(entries[0].archive_id, "astro-ph");
        assert_eq!(entries[0].category_id, "astro-ph.CO");
        assert_eq!(entries[0].category_name, "Cosmology and Nongalactic Astrophysics");
        assert_eq!(entries[2].category_id, "astro-ph.EP");
        assert_eq!(entries[2].category_description, "Second paragraph");
    }

    #[test]
    fn test_group_without_archive_uses_group_as_archive() {
        let entries = build_taxonomy(vec![
            Group(s("Computer Science")),
            Category(s("cs.AI (Artificial Intelligence)")),
            Description(s("Covers all areas of AI")),
        ]);

        assert_eq!(entries[0].archive_name, "Computer Science");
        assert_eq!(entries[0].archive_id, "Computer Science");
        assert_eq!(entries[0].category_id, "cs.AI");
    }

    #[test]
    fn test_heading_without_paragraph_emits_nothing() {
        let entries = build_taxonomy(vec![
            Group(s("Mathematics")),
            Category(s("math.AG (Algebraic Geometry)")),
        ]);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unmatched_heading_becomes_name_with_empty_code() {
        let entries = build_taxonomy(vec![
            Group(s("Physics")),
            Archive(s("Condensed Matter")),
            Category(s("Soft Matter")),
            Description(s("text")),
        ]);

        assert_eq!(entries[0].archive_name, "Condensed Matter");
        assert_eq!(entries[0].archive_id, "");
        assert_eq!(entries[0].category_name, "Soft Matter");
        assert_eq!(entries[0].category_id, "");
    }

    #[test]
    fn test_collapse_keeps_first_per_category() {
        let entries = build_taxonomy(vec![
            Group(s("Mathematics")),
            Category(s("math.NA (Numerical Analysis)")),
            Description(s("first")),
            Description(s("second")),
        ]);
        let df = collapse_taxonomy(taxonomy_frame(&entries).unwrap().lazy())
            .collect()
            .unwrap();

        assert_eq!(df.height(), 1);
        let desc = df.column("category_description").unwrap().str().unwrap().get(0);
        assert_eq!(desc, Some("first"));
    }

    #[test]
    fn test_taxonomy_stats() {
        let entries = build_taxonomy(vec![
            Group(s("Physics")),
            Archive(s("Astrophysics (astro-ph)")),
            Category(s("astro-ph.CO (Cosmology)")),
            Description(s("a")),
            Archive(s("Nuclear Theory (nucl-th)")),
            Category(s("nucl-th (Nuclear Theory)")),
            Description(s("b")),
        ]);
        let stats = taxonomy_stats(&entries);
        assert_eq!(stats.groups, 1);
        assert_eq!(stats.archives, 2);
        assert_eq!(stats.entries, 2);
    }
}
