use crate::core::RateFeed;
use crate::core::rates::{RateSnapshot, parse};
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::debug;

const USER_AGENT: &str = concat!("cnbrates/", env!("CARGO_PKG_VERSION"));

/// Fetches the CNB daily fixing text, either straight from the bank or
/// through the relay.
pub struct CnbFeedProvider {
    url: String,
    client: reqwest::Client,
}

impl CnbFeedProvider {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(CnbFeedProvider {
            url: url.to_string(),
            client,
        })
    }

    pub async fn fetch_text(&self) -> Result<String> {
        debug!("Requesting rates feed from {}", self.url);

        let client = &self.client;
        let url = self.url.as_str();
        let response = with_retry(|| client.get(url).send(), 3, 500)
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Rates feed returned HTTP {}", status));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text from {url}"))?;

        if text.trim().is_empty() {
            return Err(anyhow!("Received empty rates feed from {}", url));
        }
        Ok(text)
    }
}

#[async_trait]
impl RateFeed for CnbFeedProvider {
    async fn fetch_snapshot(&self) -> Result<RateSnapshot> {
        let text = self.fetch_text().await?;
        let snapshot = parse(&text)?;
        debug!(
            "Fetched {} rates for {} #{}",
            snapshot.rates.len(),
            snapshot.effective_date,
            snapshot.sequence_id
        );
        Ok(snapshot)
    }
}
