use super::ui;
use crate::core::convert::{convert, parse_amount};
use crate::core::{RateFeed, RateSnapshot, format_rate};
use anyhow::{Result, anyhow};

pub const HOME_CURRENCY: &str = "CZK";

const PROMPT: &str = "Please enter amount and select currency";

pub async fn run(feed: &dyn RateFeed, amount: &str, code: &str) -> Result<()> {
    let snapshot = super::load_snapshot(feed).await?;
    println!("{}", render(&snapshot, amount, code)?);
    Ok(())
}

/// Renders the conversion of `amount` CZK into `code`, or a prompt when the
/// amount gives nothing to convert.
pub fn render(snapshot: &RateSnapshot, amount: &str, code: &str) -> Result<String> {
    let record = snapshot
        .find(code)
        .ok_or_else(|| anyhow!("Unknown currency code: {}", code.trim().to_uppercase()))?;

    let mut output = format!(
        "{} {} ({})\n",
        ui::style_text(&format!("{HOME_CURRENCY} TO"), ui::StyleType::Subtle),
        record.country,
        record.code
    );

    match (parse_amount(amount), convert(amount, record.normalized_rate())) {
        (Some(parsed), Some(converted)) => output.push_str(&format!(
            "{} {HOME_CURRENCY} = {} {}",
            format_rate(parsed),
            ui::style_text(&format_rate(converted), ui::StyleType::Value),
            record.code
        )),
        _ => output.push_str(&format!("= {}", ui::style_text(PROMPT, ui::StyleType::Error))),
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse;
    use crate::core::rates::tests::SAMPLE_FEED;

    #[test]
    fn test_converts_to_eur() {
        let snapshot = parse(SAMPLE_FEED).unwrap();

        let output = render(&snapshot, "100", "EUR").unwrap();
        assert!(output.contains("EMU (EUR)"));
        assert!(output.contains("100,00 CZK = "));
        assert!(output.contains("3,83068"));

        let output = render(&snapshot, "1000", "eur").unwrap();
        assert!(output.contains("38,306"));
    }

    #[test]
    fn test_converts_currencies_quoted_per_hundred() {
        let snapshot = parse(SAMPLE_FEED).unwrap();

        let output = render(&snapshot, "100", "JPY").unwrap();
        assert!(output.contains("Japan (JPY)"));
        assert!(output.contains("639,2"));
    }

    #[test]
    fn test_prompts_without_valid_amount() {
        let snapshot = parse(SAMPLE_FEED).unwrap();

        for amount in ["", "0", "-5", "abc"] {
            let output = render(&snapshot, amount, "EUR").unwrap();
            assert!(output.contains(PROMPT), "amount {amount:?}: {output}");
        }
    }

    #[test]
    fn test_unknown_code_is_an_error() {
        let snapshot = parse(SAMPLE_FEED).unwrap();

        let err = render(&snapshot, "100", "xyz").unwrap_err();
        assert_eq!(err.to_string(), "Unknown currency code: XYZ");
    }
}
