use serde::Serialize;

use super::InfluentialRecord;

pub const PDF_URL_BASE: &str = "https://arxiv.org/pdf";
pub const EXTERNAL_URL_BASE: &str = "https://www.connectedpapers.com/main";

/// Full metadata of one selected paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperDetail {
    pub id: String,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub year_orig: i32,
    pub journal_ref: Option<String>,
    pub pdf_url: String,
    pub external_url: Option<String>,
}

pub fn pdf_url(id: &str) -> String {
    format!("{}/{}", PDF_URL_BASE, id)
}

pub fn external_url(cp_id: &str) -> Option<String> {
    if cp_id.is_empty() {
        None
    } else {
        Some(format!("{}/{}/arxiv", EXTERNAL_URL_BASE, cp_id))
    }
}

impl From<&InfluentialRecord> for PaperDetail {
    fn from(record: &InfluentialRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            authors: record.authors.clone(),
            abstract_text: record.abstract_text.clone(),
            year_orig: record.year_orig,
            journal_ref: record.journal_ref.clone(),
            pdf_url: pdf_url(&record.id),
            external_url: external_url(&record.cp_id),
        }
    }
}

/// Detail of the first row with this id
pub fn paper_detail(records: &[InfluentialRecord], id: &str) -> Option<PaperDetail> {
    records.iter().find(|r| r.id == id).map(PaperDetail::from)
}

/// Paper shown before anything is clicked: the most referenced row, first on ties
pub fn default_paper(rows: &[InfluentialRecord]) -> Option<&InfluentialRecord> {
    rows.iter().fold(None, |best: Option<&InfluentialRecord>, row| match best {
        Some(b) if b.references >= row.references => Some(b),
        _ => Some(row),
    })
}
