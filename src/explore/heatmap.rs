use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::{default_paper, InfluentialRecord, PaperDetail, SelectionPath};
use crate::influence::SelectorConfig;

/// Characters of the title kept for the axis label
pub const SHORT_TITLE_CHARS: usize = 30;

/// Separator between hover text lines
pub const HOVER_LINE_BREAK: &str = "<br />";

const HOVER_ID_PREFIX: &str = "Id: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    pub id: String,
    pub title: String,
    pub short_title: String,
}

/// Papers × years matrix of reference counts.
///
/// `z[row][column]` is the count of `rows[row]` in `years[column]`, 0 where
/// the paper was not selected that year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub years: Vec<i32>,
    pub rows: Vec<HeatmapRow>,
    pub z: Vec<Vec<u32>>,
    pub hover: Vec<Vec<String>>,
}

impl Heatmap {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What the explorer renders for a selection: the heatmap and the paper
/// shown before any cell is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceView {
    pub title: String,
    pub heatmap: Heatmap,
    pub default_paper: Option<PaperDetail>,
}

pub fn short_title(title: &str) -> String {
    let prefix: String = title.chars().take(SHORT_TITLE_CHARS).collect();
    format!("{} ...", prefix)
}

pub fn hover_text(year: i32, title: &str, references: u32, id: &str) -> String {
    [
        format!("Year: {}", year),
        format!("Title: {}", title),
        format!("Citations: {}", references),
        format!("{}{}", HOVER_ID_PREFIX, id),
    ]
    .join(HOVER_LINE_BREAK)
}

/// Recover the paper id from a cell's hover text
pub fn paper_id_from_hover(hover: &str) -> Option<&str> {
    hover
        .rsplit(HOVER_LINE_BREAK)
        .next()
        .and_then(|line| line.strip_prefix(HOVER_ID_PREFIX))
        .filter(|id| !id.is_empty())
}

/// Pivot slice rows into the heatmap matrix; papers are ordered by id.
pub fn build_heatmap(rows: &[InfluentialRecord]) -> Heatmap {
    let years: Vec<i32> = rows
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut papers: BTreeMap<&str, (&str, BTreeMap<i32, u32>)> = BTreeMap::new();
    for row in rows {
        let (_, by_year) = papers
            .entry(row.id.as_str())
            .or_insert_with(|| (row.title.as_str(), BTreeMap::new()));
        let cell = by_year.entry(row.year).or_insert(0);
        *cell = (*cell).max(row.references);
    }

    let mut heatmap = Heatmap {
        years,
        rows: Vec::with_capacity(papers.len()),
        z: Vec::with_capacity(papers.len()),
        hover: Vec::with_capacity(papers.len()),
    };

    for (id, (title, by_year)) in papers {
        let counts: Vec<u32> = heatmap
            .years
            .iter()
            .map(|year| by_year.get(year).copied().unwrap_or(0))
            .collect();
        let hover = heatmap
            .years
            .iter()
            .zip(&counts)
            .map(|(year, count)| hover_text(*year, title, *count, id))
            .collect();

        heatmap.rows.push(HeatmapRow {
            id: id.to_string(),
            title: title.to_string(),
            short_title: short_title(title),
        });
        heatmap.z.push(counts);
        heatmap.hover.push(hover);
    }

    heatmap
}

pub fn slice_view(records: &[InfluentialRecord], path: &SelectionPath, config: &SelectorConfig) -> SliceView {
    let rows = super::select_slice(records, path, config);
    SliceView {
        title: path.title().to_string(),
        heatmap: build_heatmap(&rows),
        default_paper: default_paper(&rows).map(PaperDetail::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explore::fixtures::record;

    #[test]
    fn test_short_title() {
        assert_eq!(short_title("Short"), "Short ...");
        assert_eq!(
            short_title("An extremely long title about quantum gravity"),
            "An extremely long title about  ..."
        );
    }

    #[test]
    fn test_hover_round_trip_id() {
        let text = hover_text(2020, "Title", 12, "0801.0001");
        assert_eq!(text, "Year: 2020<br />Title: Title<br />Citations: 12<br />Id: 0801.0001");
        assert_eq!(paper_id_from_hover(&text), Some("0801.0001"));
        assert_eq!(paper_id_from_hover("Year: 2020"), None);
    }

    #[test]
    fn test_heatmap_fills_missing_years_with_zero() {
        let rows = vec![
            record("B", "hep-th", "Physics", "HEP Theory", 2021, 15),
            record("A", "hep-th", "Physics", "HEP Theory", 2019, 20),
            record("A", "hep-th", "Physics", "HEP Theory", 2021, 11),
        ];

        let heatmap = build_heatmap(&rows);

        assert_eq!(heatmap.years, vec![2019, 2021]);
        let ids: Vec<&str> = heatmap.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(heatmap.z, vec![vec![20, 11], vec![0, 15]]);
        assert_eq!(heatmap.hover[1][0], hover_text(2019, "Title of B", 0, "B"));
    }

    #[test]
    fn test_empty_slice_gives_empty_heatmap() {
        let heatmap = build_heatmap(&[]);
        assert!(heatmap.is_empty());
        assert!(heatmap.years.is_empty());
    }

    #[test]
    fn test_slice_view_title() {
        let rows = vec![
            record("A", "hep-th", "Physics", "HEP Theory", 2019, 20),
            record("B", "hep-th", "Physics", "HEP Theory", 2019, 25),
        ];
        let view = slice_view(&rows, &SelectionPath::Group("Physics".to_string()), &SelectorConfig::default());
        assert_eq!(view.title, "Physics");
        assert_eq!(view.heatmap.z, vec![vec![20], vec![25]]);
        assert_eq!(view.default_paper.unwrap().id, "B");
    }
}
