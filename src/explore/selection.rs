use anyhow::{bail, Result};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use crate::influence::{SelectorConfig, TieBreak};

use super::InfluentialRecord;

/// Label of the treemap root
pub const ROOT_LABEL: &str = "all";

/// Display name of the root selection
pub const ROOT_TITLE: &str = "arXiv";

/// A treemap selection: everything, one group, or one category of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPath {
    Root,
    Group(String),
    /// Category names are only unique within a group ("Numerical Analysis"
    /// exists in both Mathematics and Computer Science).
    Category { group: String, category: String },
}

impl SelectionPath {
    /// Parse `all`, `all/<group>` or `all/<group>/<category name>`; the
    /// leading root label is optional.
    pub fn parse(path: &str) -> Result<Self> {
        let mut segments: Vec<&str> = path
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.first() == Some(&ROOT_LABEL) {
            segments.remove(0);
        }

        match segments.as_slice() {
            [] => Ok(SelectionPath::Root),
            [group] => Ok(SelectionPath::Group(group.to_string())),
            [group, category] => Ok(SelectionPath::Category {
                group: group.to_string(),
                category: category.to_string(),
            }),
            _ => bail!(
                "Unsupported selection path '{}': expected at most a group and a category",
                path
            ),
        }
    }

    /// Human readable name of the selection
    pub fn title(&self) -> &str {
        match self {
            SelectionPath::Root => ROOT_TITLE,
            SelectionPath::Group(group) => group,
            SelectionPath::Category { category, .. } => category,
        }
    }
}

impl FromStr for SelectionPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SelectionPath::parse(s)
    }
}

fn rank_cmp(a: &InfluentialRecord, b: &InfluentialRecord, tie_break: TieBreak) -> Ordering {
    let by_count = b.references.cmp(&a.references);
    match tie_break {
        TieBreak::InputOrder => by_count,
        TieBreak::Id => by_count.then_with(|| a.id.cmp(&b.id)),
    }
}

/// Per year, the top-K rows by references above the threshold.
///
/// Rows are first reduced to one per (year, id), keeping the first, since the
/// same paper appears once per category it belongs to.
pub fn top_per_year(rows: Vec<&InfluentialRecord>, config: &SelectorConfig) -> Vec<InfluentialRecord> {
    let mut seen: HashSet<(i32, &str)> = HashSet::new();
    let mut by_year: BTreeMap<i32, Vec<&InfluentialRecord>> = BTreeMap::new();

    for row in rows {
        if seen.insert((row.year, row.id.as_str())) {
            by_year.entry(row.year).or_default().push(row);
        }
    }

    let mut selected = Vec::new();
    for (_, mut year_rows) in by_year {
        year_rows.sort_by(|a, b| rank_cmp(a, b, config.tie_break));
        selected.extend(
            year_rows
                .into_iter()
                .take(config.top_k)
                .filter(|row| row.references > config.threshold)
                .cloned(),
        );
    }

    selected
}

/// Rows to render for a selection.
///
/// Root and group selections re-rank across categories; a category selection
/// returns that category's rows as built.
pub fn select_slice(
    records: &[InfluentialRecord],
    path: &SelectionPath,
    config: &SelectorConfig,
) -> Vec<InfluentialRecord> {
    match path {
        SelectionPath::Root => top_per_year(records.iter().collect(), config),
        SelectionPath::Group(group) => top_per_year(
            records.iter().filter(|r| &r.group_name == group).collect(),
            config,
        ),
        SelectionPath::Category { group, category } => records
            .iter()
            .filter(|r| &r.group_name == group && &r.category_name == category)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explore::fixtures::record;

    fn config(top_k: usize, threshold: u32) -> SelectorConfig {
        SelectorConfig { top_k, threshold, tie_break: TieBreak::Id }
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!(SelectionPath::parse("").unwrap(), SelectionPath::Root);
        assert_eq!(SelectionPath::parse("all").unwrap(), SelectionPath::Root);
        assert_eq!(
            SelectionPath::parse("all/Physics").unwrap(),
            SelectionPath::Group("Physics".to_string())
        );
        assert_eq!(
            SelectionPath::parse("Mathematics/Numerical Analysis").unwrap(),
            SelectionPath::Category {
                group: "Mathematics".to_string(),
                category: "Numerical Analysis".to_string()
            }
        );
    }

    #[test]
    fn test_parse_too_deep_is_error() {
        let err = SelectionPath::parse("all/a/b/c").unwrap_err();
        assert!(err.to_string().contains("Unsupported selection path"));
    }

    #[test]
    fn test_titles() {
        assert_eq!(SelectionPath::Root.title(), "arXiv");
        assert_eq!("all/Physics".parse::<SelectionPath>().unwrap().title(), "Physics");
    }

    #[test]
    fn test_root_dedups_paper_across_categories() {
        let records = vec![
            record("X", "cs.AI", "Computer Science", "AI", 2020, 40),
            record("X", "cs.LG", "Computer Science", "ML", 2020, 40),
            record("Y", "math.CO", "Mathematics", "Combinatorics", 2020, 30),
            record("Z", "math.CO", "Mathematics", "Combinatorics", 2020, 20),
        ];

        let slice = select_slice(&records, &SelectionPath::Root, &config(2, 10));

        let ids: Vec<&str> = slice.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["X", "Y"]);
    }

    #[test]
    fn test_group_selection_filters_and_thresholds() {
        let records = vec![
            record("X", "cs.AI", "Computer Science", "AI", 2019, 12),
            record("W", "cs.AI", "Computer Science", "AI", 2020, 9),
            record("Y", "math.CO", "Mathematics", "Combinatorics", 2020, 30),
        ];

        let slice = select_slice(
            &records,
            &SelectionPath::Group("Computer Science".to_string()),
            &config(3, 10),
        );

        let ids: Vec<&str> = slice.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["X"]);
    }

    #[test]
    fn test_category_selection_uses_group_and_name() {
        let records = vec![
            record("A", "math.NA", "Mathematics", "Numerical Analysis", 2020, 15),
            record("B", "cs.NA", "Computer Science", "Numerical Analysis", 2020, 15),
        ];

        let slice = select_slice(
            &records,
            &SelectionPath::parse("all/Computer Science/Numerical Analysis").unwrap(),
            &config(3, 10),
        );

        assert_eq!(slice.len(), 1);
        assert_eq!(slice[0].id, "B");
    }

    #[test]
    fn test_top_per_year_counts_non_increasing() {
        let records: Vec<InfluentialRecord> = (0..6)
            .map(|i| record(&format!("P{}", i), "hep-th", "Physics", "HEP Theory", 2021, 11 + i * 3))
            .collect();

        let slice = top_per_year(records.iter().collect(), &config(3, 10));

        let refs: Vec<u32> = slice.iter().map(|r| r.references).collect();
        assert_eq!(refs, vec![26, 23, 20]);
    }
}
