//! Conversion of home currency amounts into a foreign currency.

/// Reads a user supplied amount. Accepts either `.` or `,` as the decimal
/// separator. Returns `None` for anything that is not a finite number.
pub fn parse_amount(amount_text: &str) -> Option<f64> {
    let normalized = amount_text.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Converts a home currency amount into units of the target currency.
///
/// `normalized_rate` is the home currency price of one foreign unit. A
/// missing, zero or negative amount gives `None`, meaning there is nothing
/// to show yet. The result is not rounded.
pub fn convert(amount_text: &str, normalized_rate: f64) -> Option<f64> {
    if !(normalized_rate.is_finite() && normalized_rate > 0.0) {
        return None;
    }
    parse_amount(amount_text)
        .filter(|amount| *amount > 0.0)
        .map(|amount| amount / normalized_rate)
}
