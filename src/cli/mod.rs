//! Terminal presentation of rates and conversions

pub mod convert;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::{RateFeed, RateSnapshot};
use anyhow::{Context, Result};

/// Fetches a fresh snapshot behind a spinner.
pub(crate) async fn load_snapshot(feed: &dyn RateFeed) -> Result<RateSnapshot> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let result = feed.fetch_snapshot().await;
    spinner.finish_and_clear();
    result.context("Failed to load exchange rates")
}
