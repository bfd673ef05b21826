use super::InfluentialRecord;

/// Influential row with derived title/abstract and a 2008 original year
pub fn record(id: &str, category_id: &str, group: &str, category: &str, year: i32, references: u32) -> InfluentialRecord {
    InfluentialRecord {
        id: id.to_string(),
        category_id: category_id.to_string(),
        year,
        references,
        year_orig: 2008,
        group_name: group.to_string(),
        archive_name: group.to_string(),
        category_name: category.to_string(),
        title: format!("Title of {}", id),
        abstract_text: format!("Abstract of {}", id),
        authors: "A. Author".to_string(),
        journal_ref: None,
        cp_id: String::new(),
    }
}
