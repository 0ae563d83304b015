use super::ui;
use crate::core::ordering::{self, SortDirection, SortKey, SortState};
use crate::core::{RateFeed, RateSnapshot, format_rate};
use anyhow::Result;
use comfy_table::Cell;
use tracing::debug;

/// What the `rates` command shows and how.
#[derive(Debug, Clone, Default)]
pub struct RatesOptions {
    pub sort: SortState,
    pub filter: Option<String>,
    pub json: bool,
}

pub async fn run(feed: &dyn RateFeed, options: &RatesOptions) -> Result<()> {
    let snapshot = super::load_snapshot(feed).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{}", render(&snapshot, options));
    Ok(())
}

fn sort_marker(state: SortState, key: SortKey) -> Option<&'static str> {
    (state.key == key).then_some(match state.direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    })
}

/// Renders the snapshot header followed by the rates table.
pub fn render(snapshot: &RateSnapshot, options: &RatesOptions) -> String {
    let visible = match options.filter.as_deref() {
        Some(term) => snapshot.search(term),
        None => snapshot.rates.iter().collect(),
    };
    debug!(
        "Showing {} of {} rates sorted by {} {:?}",
        visible.len(),
        snapshot.rates.len(),
        options.sort.key,
        options.sort.direction
    );

    let mut output = format!(
        "{}\n\n",
        ui::style_text(
            &format!("{} #{}", snapshot.effective_date, snapshot.sequence_id),
            ui::StyleType::Title
        )
    );

    if visible.is_empty() {
        output.push_str(&ui::style_text("No matching currencies.", ui::StyleType::Subtle));
        return output;
    }

    let sort = options.sort;
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Country", sort_marker(sort, SortKey::Country)),
        ui::header_cell("Currency", sort_marker(sort, SortKey::CurrencyName)),
        ui::header_cell("Amount", None),
        ui::header_cell("Code", sort_marker(sort, SortKey::Code)),
        ui::header_cell("Rate", None),
        ui::header_cell("Rate normalized", sort_marker(sort, SortKey::NormalizedRate)),
    ]);

    for record in ordering::sorted(visible, sort) {
        table.add_row(vec![
            Cell::new(&record.country),
            Cell::new(&record.currency_name),
            ui::number_cell(record.quoted_units.to_string()),
            Cell::new(&record.code),
            ui::number_cell(format_rate(record.rate)),
            ui::number_cell(format_rate(record.normalized_rate())),
        ]);
    }

    output.push_str(&table.to_string());
    output
}
