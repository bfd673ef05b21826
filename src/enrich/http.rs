use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Connected Papers arXiv id translation endpoint
pub const DEFAULT_TRANSLATOR_URL: &str = "https://rest.connectedpapers.com/id_translator/arxiv";

/// Maps an arXiv id to an external service's paper id.
#[allow(async_fn_in_trait)]
pub trait IdTranslator {
    /// Any error means "no id" to the caller; implementations need not retry.
    async fn translate(&self, arxiv_id: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TranslatorResponse {
    #[serde(rename = "paperId")]
    paper_id: Option<String>,
}

/// `GET {base_url}/{arxiv_id}` returning `{"paperId": "..."}`
#[derive(Debug, Clone)]
pub struct ConnectedPapersTranslator {
    client: Client,
    base_url: String,
}

impl ConnectedPapersTranslator {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, arxiv_id: &str) -> String {
        format!("{}/{}", self.base_url, arxiv_id)
    }
}

impl IdTranslator for ConnectedPapersTranslator {
    async fn translate(&self, arxiv_id: &str) -> Result<String> {
        let response = self
            .client
            .get(self.url_for(arxiv_id))
            .send()
            .await?
            .error_for_status()?;

        let body: TranslatorResponse = response.json().await?;

        body.paper_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow!("No paperId in translator response for {}", arxiv_id))
    }
}

/// Create an HTTP client for the translator. `connect_timeout` bounds the
/// TCP/TLS handshake; the whole request is bounded by the runner.
pub fn create_translator_client(connect_timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().connect_timeout(connect_timeout).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let translator = ConnectedPapersTranslator::new(Client::new(), "http://localhost:9/arxiv/");
        assert_eq!(translator.url_for("0704.0001"), "http://localhost:9/arxiv/0704.0001");
        assert_eq!(translator.url_for("hep-th/9912001"), "http://localhost:9/arxiv/hep-th/9912001");
    }

    #[test]
    fn test_response_without_paper_id() {
        let body: TranslatorResponse = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert!(body.paper_id.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_error() {
        let client = create_translator_client(Duration::from_millis(200)).unwrap();
        // port 9 (discard) on localhost is closed in test environments
        let translator = ConnectedPapersTranslator::new(client, "http://127.0.0.1:9/arxiv");
        assert!(translator.translate("0704.0001").await.is_err());
    }
}
