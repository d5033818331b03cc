//! HTTP client for the active-calls page.

use std::time::Duration;

use activecalls_core::IncidentRow;
use reqwest::Client;

use crate::error::FeedError;
use crate::table::parse_incident_rows;

// The city's page serves an error document to bare library agents.
pub(crate) const BROWSER_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Fetches the HTML page that carries the incident table.
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    /// Creates a client for `url` with a bounded request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(BROWSER_UA)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the page body. Attempted exactly once.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] on network, TLS or timeout failure.
    /// - [`FeedError::UnexpectedStatus`] on any non-2xx response.
    pub async fn fetch_page(&self) -> Result<String, FeedError> {
        tracing::info!(url = %self.url, "fetching active calls page");

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        tracing::info!(bytes = body.len(), "fetched active calls page");
        Ok(body)
    }
}

/// Fetches the page and extracts its incident rows.
///
/// # Errors
///
/// Propagates [`FeedClient::fetch_page`] errors and returns
/// [`FeedError::TableNotFound`] when the page carries no table.
pub async fn fetch_incident_rows(client: &FeedClient) -> Result<Vec<IncidentRow>, FeedError> {
    let html = client.fetch_page().await?;
    parse_incident_rows(&html)
}
