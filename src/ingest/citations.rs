use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::io::Read;

/// Internal citation graph: citing id -> cited ids
pub type CitationGraph = BTreeMap<String, Vec<String>>;

/// Read the internal-citations JSON object
pub fn load_citation_graph<R: Read>(reader: R) -> Result<CitationGraph> {
    serde_json::from_reader(reader).context("Failed to parse citation graph JSON")
}

/// Flatten the graph into one (citing_id, cited_id) row per listed citation.
/// Duplicates and self-citations are kept as they appear.
pub fn citation_edges_frame(graph: &CitationGraph) -> Result<DataFrame> {
    let edge_count: usize = graph.values().map(Vec::len).sum();
    let mut citing_ids: Vec<&str> = Vec::with_capacity(edge_count);
    let mut cited_ids: Vec<&str> = Vec::with_capacity(edge_count);

    for (citing, cited) in graph {
        for target in cited {
            citing_ids.push(citing);
            cited_ids.push(target);
        }
    }

    let df = DataFrame::new(vec![
        Column::new("citing_id".into(), citing_ids),
        Column::new("cited_id".into(), cited_ids),
    ])?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_keep_duplicates_and_self_citations() {
        let json = r#"{"A": ["X", "X", "A"], "B": []}"#;
        let graph = load_citation_graph(json.as_bytes()).unwrap();
        let df = citation_edges_frame(&graph).unwrap();

        assert_eq!(df.height(), 3);
        let cited: Vec<_> = df.column("cited_id").unwrap().str().unwrap().into_iter().flatten().collect();
        assert_eq!(cited, vec!["X", "X", "A"]);
    }

    #[test]
    fn test_malformed_graph_is_error() {
        assert!(load_citation_graph(r#"{"A": "X"}"#.as_bytes()).is_err());
    }
}
