use anyhow::{Context, Result};
use serde::Deserialize;

/// One line of the arXiv metadata dump.
///
/// Only the fields the pipeline needs are declared; everything else in the
/// record is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: String,
    #[serde(rename = "journal-ref", default)]
    pub journal_ref: Option<String>,
    pub categories: CategoryField,
    pub versions: Vec<VersionEntry>,
}

/// The `categories` field: a list whose first element is the space separated
/// category string (older dumps), or that string directly (newer dumps).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryField {
    List(Vec<String>),
    Single(String),
}

impl CategoryField {
    /// The primary category string; later list elements are ignored
    pub fn primary(&self) -> &str {
        match self {
            CategoryField::List(items) => items.first().map(String::as_str).unwrap_or(""),
            CategoryField::Single(s) => s,
        }
    }

    /// Category codes of the primary string, in order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.primary().split_whitespace()
    }
}

/// A `versions` element: `"v1"` or `{"version": "v1", "created": "..."}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VersionEntry {
    Label(String),
    Detailed { version: String },
}

impl VersionEntry {
    pub fn label(&self) -> &str {
        match self {
            VersionEntry::Label(label) => label,
            VersionEntry::Detailed { version } => version,
        }
    }
}

/// Parse one metadata line. `line_no` is 1-based and only used for the error.
pub fn parse_record(line: &str, line_no: usize) -> Result<PaperRecord> {
    serde_json::from_str(line)
        .with_context(|| format!("Failed to parse metadata record at line {}", line_no))
}
