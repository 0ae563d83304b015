//! Number rendering for the Czech display locale.
//!
//! Decimal comma, no-break space between thousands groups.

pub const DEFAULT_MIN_DECIMALS: usize = 2;
pub const DEFAULT_MAX_DECIMALS: usize = 5;

const DECIMAL_SEPARATOR: char = ',';
const GROUP_SEPARATOR: char = '\u{a0}';

/// Formats `value` with at least `min_decimals` and at most `max_decimals`
/// fraction digits. Zeros past `min_decimals` are dropped.
///
/// Exact halfway values round away from zero. A negative value keeps its
/// sign even when it rounds to zero. A `max_decimals` below `min_decimals`
/// is raised to `min_decimals`.
pub fn format_number(value: f64, min_decimals: usize, max_decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let max_decimals = max_decimals.max(min_decimals);
    let rounded = round_half_away(value.abs(), max_decimals);
    let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let kept = fraction.trim_end_matches('0').len().max(min_decimals);
    let fraction = &fraction[..kept];

    let mut output = String::with_capacity(rounded.len() + integer.len() / 3 + 1);
    if value.is_sign_negative() {
        output.push('-');
    }
    output.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        output.push(DECIMAL_SEPARATOR);
        output.push_str(fraction);
    }
    output
}

/// [`format_number`] with the default 2 to 5 fraction digits used for rates
/// and conversion results.
pub fn format_rate(value: f64) -> String {
    format_number(value, DEFAULT_MIN_DECIMALS, DEFAULT_MAX_DECIMALS)
}

/// Renders a non-negative `value` with exactly `decimals` fraction digits.
///
/// `{:.N}` breaks exact ties to the even digit, so those are bumped up here.
fn round_half_away(value: f64, decimals: usize) -> String {
    let rounded = format!("{:.*}", decimals, value);

    // A tie needs at most `decimals + 1` fraction bits, which also makes the
    // widened rendering exact.
    let widened_digits = decimals + 1;
    let scaled = value * 2f64.powi(widened_digits as i32);
    if !scaled.is_finite() || scaled.fract() != 0.0 {
        return rounded;
    }
    let widened = format!("{:.*}", widened_digits, value);
    let Some(truncated) = widened.strip_suffix('5') else {
        return rounded;
    };
    increment_last_digit(truncated.strip_suffix('.').unwrap_or(truncated))
}

/// Adds one unit in the last place of a plain decimal such as `12.99`.
fn increment_last_digit(number: &str) -> String {
    let mut bytes = number.as_bytes().to_vec();
    let mut carry = true;
    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            digit => {
                *byte = digit + 1;
                carry = false;
                break;
            }
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }
    bytes.into_iter().map(char::from).collect()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}
