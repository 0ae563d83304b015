//! Rate records and the parser for the CNB daily fixing feed.
//!
//! The feed is line oriented:
//!
//! ```text
//! 27 Nov 2024 #230
//! Country|Currency|Amount|Code|Rate
//! EMU|euro|1|EUR|26.105
//! Japan|yen|100|JPY|15.644
//! ```
//!
//! Only the header line is mandatory. Data rows that cannot be read are
//! dropped without failing the parse.

use regex::Regex;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+#(\d+)$").expect("header pattern is valid"));

const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid CNB response format: unable to parse header")]
    Header,
}

/// One quoted currency line of the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub country: String,
    pub currency_name: String,
    /// Number of foreign units the rate is quoted for, e.g. 100 for JPY.
    pub quoted_units: u32,
    pub code: String,
    /// Home currency price of `quoted_units` foreign units.
    pub rate: f64,
}

impl RateRecord {
    /// Home currency price of a single foreign unit.
    pub fn normalized_rate(&self) -> f64 {
        self.rate / f64::from(self.quoted_units)
    }
}

impl Serialize for RateRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RateRecord", 6)?;
        state.serialize_field("country", &self.country)?;
        state.serialize_field("currency_name", &self.currency_name)?;
        state.serialize_field("quoted_units", &self.quoted_units)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("rate", &self.rate)?;
        state.serialize_field("normalized_rate", &self.normalized_rate())?;
        state.end()
    }
}

/// A complete parse of one feed publication. Rates keep feed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSnapshot {
    pub effective_date: String,
    pub sequence_id: u32,
    pub rates: Vec<RateRecord>,
}

impl RateSnapshot {
    /// Looks up a rate by its currency code, ignoring ASCII case.
    pub fn find(&self, code: &str) -> Option<&RateRecord> {
        let code = code.trim();
        self.rates
            .iter()
            .find(|record| record.code.eq_ignore_ascii_case(code))
    }

    /// Rates whose country, code or currency name contain `term`,
    /// case-insensitively. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&RateRecord> {
        let term = term.trim().to_lowercase();
        self.rates
            .iter()
            .filter(|record| {
                record.country.to_lowercase().contains(&term)
                    || record.code.to_lowercase().contains(&term)
                    || record.currency_name.to_lowercase().contains(&term)
            })
            .collect()
    }
}

/// Parses a raw feed body into a snapshot.
///
/// Fails only when the header line lacks the trailing `#<sequence>` token.
/// The column header line is skipped and every following line goes
/// through [`try_parse_row`].
pub fn parse(text: &str) -> Result<RateSnapshot, FormatError> {
    let mut lines = text.trim().lines();

    let header = lines.next().map(str::trim_end).ok_or(FormatError::Header)?;
    let captures = HEADER_PATTERN.captures(header).ok_or(FormatError::Header)?;
    let effective_date = captures[1].trim().to_string();
    let sequence_id = captures[2].parse::<u32>().map_err(|_| FormatError::Header)?;

    // Column names, never validated
    lines.next();

    let rates: Vec<RateRecord> = lines.filter_map(try_parse_row).collect();
    debug!(
        %effective_date,
        sequence_id,
        count = rates.len(),
        "Parsed rates feed"
    );

    Ok(RateSnapshot {
        effective_date,
        sequence_id,
        rates,
    })
}

/// Reads a single `country|currency|amount|code|rate` row.
///
/// Returns `None` for blank lines, rows without exactly five fields and
/// rows whose amount or rate is not a positive number.
pub fn try_parse_row(line: &str) -> Option<RateRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    let [country, currency_name, units, code, rate] = fields.as_slice() else {
        debug!(
            line,
            fields = fields.len(),
            expected = FIELD_COUNT,
            "Skipping row with unexpected field count"
        );
        return None;
    };

    let quoted_units = match units.parse::<u32>() {
        Ok(units) if units > 0 => units,
        _ => {
            debug!(line, units, "Skipping row with invalid amount");
            return None;
        }
    };

    let rate = match rate.parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate > 0.0 => rate,
        _ => {
            debug!(line, rate, "Skipping row with invalid rate");
            return None;
        }
    };

    Some(RateRecord {
        country: country.to_string(),
        currency_name: currency_name.to_string(),
        quoted_units,
        code: code.to_string(),
        rate,
    })
}
