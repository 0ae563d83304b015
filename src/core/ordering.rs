//! Sorting of rate tables by a user selected column.

use crate::core::rates::RateRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    Country,
    CurrencyName,
    Code,
    NormalizedRate,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortKey::Country => "country",
                SortKey::CurrencyName => "currency",
                SortKey::Code => "code",
                SortKey::NormalizedRate => "rate",
            }
        )
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "country" => Ok(SortKey::Country),
            "currency" | "currency-name" => Ok(SortKey::CurrencyName),
            "code" => Ok(SortKey::Code),
            "rate" | "normalized-rate" => Ok(SortKey::NormalizedRate),
            _ => Err(anyhow::anyhow!(
                "Invalid sort key: {} (expected country, currency, code or rate)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active column and direction of a rates table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Next state after the user picks `key` in a table header. Picking the
    /// active column while ascending flips to descending, anything else
    /// starts ascending. The CLI takes key and direction as flags and builds
    /// its state with [`SortState::new`]; this is for interactive tables.
    pub fn request(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key, direction }
    }
}

/// Orders two records by `key`. Text columns compare by code point, the
/// rate column numerically.
pub fn compare(a: &RateRecord, b: &RateRecord, key: SortKey, direction: SortDirection) -> Ordering {
    let ordering = match key {
        SortKey::Country => a.country.cmp(&b.country),
        SortKey::CurrencyName => a.currency_name.cmp(&b.currency_name),
        SortKey::Code => a.code.cmp(&b.code),
        SortKey::NormalizedRate => a.normalized_rate().total_cmp(&b.normalized_rate()),
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Returns the records in `state` order. Ties keep their input order and
/// `rates` itself is left untouched.
pub fn sorted<'a, I>(rates: I, state: SortState) -> Vec<&'a RateRecord>
where
    I: IntoIterator<Item = &'a RateRecord>,
{
    let mut ordered: Vec<&RateRecord> = rates.into_iter().collect();
    ordered.sort_by(|a, b| compare(a, b, state.key, state.direction));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::parse;

    const FEED: &str = "27 Nov 2024 #230
Country|Currency|Amount|Code|Rate
EMU|euro|1|EUR|26.105
Japan|yen|100|JPY|15.644
USA|dollar|1|USD|24.107
Australia|dollar|1|AUD|15.707";

    fn codes(records: &[&RateRecord]) -> Vec<String> {
        records.iter().map(|r| r.code.clone()).collect()
    }

    #[test]
    fn test_sort_by_normalized_rate_both_directions() {
        let snapshot = parse(FEED).unwrap();
        let pair = &snapshot.rates[..2];

        let asc_state = SortState::new(SortKey::NormalizedRate, SortDirection::Ascending);
        let asc = sorted(pair, asc_state);
        let desc = sorted(pair, asc_state.request(SortKey::NormalizedRate));

        assert_eq!(codes(&asc), vec!["JPY", "EUR"]);
        let mut reversed = codes(&desc);
        reversed.reverse();
        assert_eq!(codes(&asc), reversed);
    }

    #[test]
    fn test_sort_by_text_columns() {
        let snapshot = parse(FEED).unwrap();

        let by_country = sorted(
            &snapshot.rates,
            SortState::new(SortKey::Country, SortDirection::Ascending),
        );
        assert_eq!(codes(&by_country), vec!["AUD", "EUR", "JPY", "USD"]);

        let by_code = sorted(
            &snapshot.rates,
            SortState::new(SortKey::Code, SortDirection::Descending),
        );
        assert_eq!(codes(&by_code), vec!["USD", "JPY", "EUR", "AUD"]);
    }

    #[test]
    fn test_ties_keep_feed_order() {
        let snapshot = parse(FEED).unwrap();
        let state = SortState::new(SortKey::CurrencyName, SortDirection::Ascending);

        let by_name = sorted(&snapshot.rates, state);
        assert_eq!(codes(&by_name), vec!["USD", "AUD", "EUR", "JPY"]);

        let by_name_desc = sorted(&snapshot.rates, state.request(SortKey::CurrencyName));
        assert_eq!(codes(&by_name_desc), vec!["JPY", "EUR", "USD", "AUD"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let snapshot = parse(FEED).unwrap();
        let state = SortState::new(SortKey::NormalizedRate, SortDirection::Descending);

        let once = sorted(&snapshot.rates, state);
        let twice = sorted(once.iter().copied(), state);
        assert_eq!(codes(&once), codes(&twice));
    }

    #[test]
    fn test_sorting_does_not_touch_snapshot() {
        let snapshot = parse(FEED).unwrap();
        let before = snapshot.clone();

        let _ = sorted(&snapshot.rates, SortState::default().request(SortKey::Code));
        assert_eq!(snapshot, before);
        assert_eq!(snapshot.rates[0].code, "EUR");
    }

    #[test]
    fn test_compare_is_consistent() {
        let snapshot = parse(FEED).unwrap();
        let (eur, jpy) = (&snapshot.rates[0], &snapshot.rates[1]);

        assert_eq!(
            compare(eur, jpy, SortKey::Code, SortDirection::Ascending),
            Ordering::Less
        );
        assert_eq!(
            compare(jpy, eur, SortKey::Code, SortDirection::Ascending),
            Ordering::Greater
        );
        assert_eq!(
            compare(eur, jpy, SortKey::Code, SortDirection::Descending),
            Ordering::Greater
        );
        assert_eq!(
            compare(eur, eur, SortKey::NormalizedRate, SortDirection::Descending),
            Ordering::Equal
        );
    }

    #[test]
    fn test_request_toggles_direction() {
        let state = SortState::default();
        assert_eq!(state, SortState::new(SortKey::Country, SortDirection::Ascending));

        let state = state.request(SortKey::Country);
        assert_eq!(state.direction, SortDirection::Descending);

        let state = state.request(SortKey::Country);
        assert_eq!(state.direction, SortDirection::Ascending);

        let state = state.request(SortKey::Country).request(SortKey::Code);
        assert_eq!(state, SortState::new(SortKey::Code, SortDirection::Ascending));
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("rate".parse::<SortKey>().unwrap(), SortKey::NormalizedRate);
        assert_eq!("Currency".parse::<SortKey>().unwrap(), SortKey::CurrencyName);
        assert_eq!(SortKey::Code.to_string(), "code");
        assert!("amount".parse::<SortKey>().is_err());
    }
}
