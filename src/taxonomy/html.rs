use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use log::debug;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

use super::TaxonomyEvent;

/// Public arXiv taxonomy page
pub const DEFAULT_TAXONOMY_URL: &str = "https://arxiv.org/category_taxonomy";

lazy_static! {
    static ref LIST_SELECTOR: Selector = Selector::parse("#category_taxonomy_list").unwrap();
    static ref NODE_SELECTOR: Selector = Selector::parse("h2, h3, h4, p").unwrap();
}

/// Turn the taxonomy page into heading/paragraph events, in document order.
///
/// `h2` is a group, `h3` an archive, `h4` a category and `p` its description.
pub fn events_from_html(html: &str) -> Result<Vec<TaxonomyEvent>> {
    let document = Html::parse_document(html);

    let list = document
        .select(&LIST_SELECTOR)
        .next()
        .ok_or_else(|| anyhow!("Taxonomy page has no #category_taxonomy_list element"))?;

    let events: Vec<TaxonomyEvent> = list
        .select(&NODE_SELECTOR)
        .filter_map(|element| {
            let text: String = element.text().collect();
            match element.value().name() {
                "h2" => Some(TaxonomyEvent::Group(text)),
                "h3" => Some(TaxonomyEvent::Archive(text)),
                "h4" => Some(TaxonomyEvent::Category(text)),
                "p" => Some(TaxonomyEvent::Description(text)),
                _ => None,
            }
        })
        .collect();

    debug!("Taxonomy page yielded {} events", events.len());
    Ok(events)
}

/// Download the taxonomy page
pub async fn fetch_taxonomy_page(client: &Client, url: &str, timeout: Duration) -> Result<String> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("Failed to fetch taxonomy page: {}", url))?
        .error_for_status()
        .with_context(|| format!("Taxonomy page returned an error status: {}", url))?;

    response
        .text()
        .await
        .with_context(|| format!("Failed to read taxonomy page body: {}", url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::build_taxonomy;

    const PAGE: &str = r#"
        <html><body>
        <h2>Not part of the listing</h2>
        <div id="category_taxonomy_list">
          <h2 class="accordion-head">Computer Science</h2>
          <div class="accordion-body">
            <h4>cs.AI <span>(Artificial Intelligence)</span></h4>
            <p>Covers all areas of AI except Vision.</p>
          </div>
          <h2 class="accordion-head">Physics</h2>
          <div class="accordion-body">
            <h3>Astrophysics (astro-ph)</h3>
            <h4>astro-ph.GA <span>(Astrophysics of Galaxies)</span></h4>
            <p>Phenomena pertaining to galaxies.</p>
          </div>
        </div>
        </body></html>"#;

    #[test]
    fn test_events_in_document_order() {
        let events = events_from_html(PAGE).unwrap();
        assert_eq!(events.len(), 7);
        assert_eq!(events[0], TaxonomyEvent::Group("Computer Science".to_string()));
        assert_eq!(events[1], TaxonomyEvent::Category("cs.AI (Artificial Intelligence)".to_string()));
    }

    #[test]
    fn test_page_to_entries() {
        let entries = build_taxonomy(events_from_html(PAGE).unwrap());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category_id, "cs.AI");
        assert_eq!(entries[0].category_name, "Artificial Intelligence");
        assert_eq!(entries[1].group_name, "Physics");
        assert_eq!(entries[1].archive_id, "astro-ph");
        assert_eq!(entries[1].category_name, "Astrophysics of Galaxies");
    }

    #[test]
    fn test_missing_listing_is_error() {
        assert!(events_from_html("<html><body><p>nothing</p></body></html>").is_err());
    }
}
