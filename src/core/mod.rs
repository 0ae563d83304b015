//! Core rate parsing, conversion and presentation rules

pub mod config;
pub mod convert;
pub mod feed;
pub mod format;
pub mod log;
pub mod ordering;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::convert;
pub use feed::RateFeed;
pub use format::{format_number, format_rate};
pub use ordering::{SortDirection, SortKey, SortState};
pub use rates::{FormatError, RateRecord, RateSnapshot, parse};
