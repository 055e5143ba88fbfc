//! Currency conversion through the pivot currency and amount formatting for display

use crate::core::currency::currency_symbol;
use crate::core::rates::RateTable;
use numfmt::{Formatter, Precision};
use std::sync::OnceLock;

/// Largest magnitude rendered by [`format_amount`]; anything above is clamped.
pub const MAX_DISPLAY_AMOUNT: f64 = 999_999_999_999.99;

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

/// Converts `amount` from one currency to another by way of the pivot currency.
///
/// Conversion is skipped (the amount is returned unchanged) when both codes
/// match, when either code is missing from `rates`, or when the source rate is
/// zero. Precision is good enough for display, not for accounting.
pub fn convert(amount: f64, from: &str, to: &str, rates: &RateTable) -> f64 {
    if from == to {
        return amount;
    }

    let (Some(from_rate), Some(to_rate)) = (rates.get(from), rates.get(to)) else {
        return amount;
    };
    if from_rate == 0.0 {
        return amount;
    }

    let amount_in_pivot = amount / from_rate;
    amount_in_pivot * to_rate
}

/// Formats the magnitude of `amount` for display.
///
/// Non-finite input renders as `0.00`. Values from a thousand upwards are
/// abbreviated with a `K`, `M` or `B` suffix; smaller values get two decimals
/// with comma grouping. The sign is dropped, callers add their own prefix.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }

    let clamped = amount.abs().min(MAX_DISPLAY_AMOUNT);

    if clamped >= BILLION {
        return format!("{:.2}B", clamped / BILLION);
    }
    if clamped >= MILLION {
        return format!("{:.2}M", clamped / MILLION);
    }
    if clamped >= THOUSAND {
        return format!("{:.2}K", clamped / THOUSAND);
    }

    with_grouping(&format!("{clamped:.2}"))
}

/// Currency symbol followed by [`format_amount`], e.g. `€1.50K`.
pub fn format_money(amount: f64, code: &str) -> String {
    format!("{}{}", currency_symbol(code), format_amount(amount))
}

// Rounding can carry a sub-thousand value up to "1000.00", so the whole part
// still goes through the grouping formatter.
fn with_grouping(fixed: &str) -> String {
    static GROUPING_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed, "00"));
    let grouping_fmt = GROUPING_FMT.get_or_init(|| {
        Formatter::currency("")
            .ok()
            .map(|f| f.precision(Precision::Decimals(0)))
    });

    let grouped = match (grouping_fmt, whole.parse::<f64>()) {
        // Zero is hardcoded as "0" by numfmt, and the whole part is never fractional
        (Some(fmt), Ok(value)) if value > 0.0 => {
            fmt.fmt_string(value).trim_end_matches('.').to_owned()
        }
        _ => whole.to_owned(),
    };

    format!("{grouped}.{cents}")
}
