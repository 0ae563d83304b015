//! Rates feed abstraction

use crate::core::rates::RateSnapshot;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RateFeed: Send + Sync {
    /// Fetches the latest publication and parses it into a fresh snapshot.
    async fn fetch_snapshot(&self) -> Result<RateSnapshot>;
}
