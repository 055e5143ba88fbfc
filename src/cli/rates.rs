use super::ui;
use crate::core::currency::{CURRENCIES, PIVOT_CURRENCY};
use crate::core::rates::RateSource;
use crate::providers::{RateCache, RateSnapshot};
use comfy_table::Cell;

impl RateSnapshot {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell("Name"),
            ui::header_cell(&format!("Rate (per 1 {PIVOT_CURRENCY})")),
        ]);

        for currency in CURRENCIES {
            let rate = self
                .rates
                .get(currency.code)
                .map_or("N/A".to_string(), |r| format!("{r:.4}"));
            table.add_row(vec![
                Cell::new(format!("{} {}", currency.symbol, currency.code)),
                Cell::new(currency.name),
                ui::number_cell(rate),
            ]);
        }

        let source = match self.source {
            RateSource::Live => ui::style_text("live rates", ui::StyleType::TotalValue),
            RateSource::Fallback => ui::style_text(
                "fallback rates (live rates unavailable)",
                ui::StyleType::Warning,
            ),
        };
        let fetched_at = ui::style_text(
            &format!("fetched {}", self.fetched_at.format("%Y-%m-%d %H:%M UTC")),
            ui::StyleType::Subtle,
        );

        format!(
            "{}\n{table}\n{source}, {fetched_at}",
            ui::style_text("Exchange Rates", ui::StyleType::Title)
        )
    }
}

pub async fn display_rates(rates: &RateCache) -> String {
    rates.snapshot().await.display_as_table()
}
