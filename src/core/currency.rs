//! Supported currencies and their display metadata

use serde::Serialize;

/// The currency all exchange rates are expressed against.
pub const PIVOT_CURRENCY: &str = "USD";

/// Symbol used when a currency code is not one we know about.
pub const DEFAULT_SYMBOL: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyDescriptor {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: [CurrencyDescriptor; 6] = [
    CurrencyDescriptor {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
    },
    CurrencyDescriptor {
        code: "EUR",
        symbol: "€",
        name: "Euro",
    },
    CurrencyDescriptor {
        code: "GBP",
        symbol: "£",
        name: "British Pound",
    },
    CurrencyDescriptor {
        code: "RUB",
        symbol: "₽",
        name: "Russian Ruble",
    },
    CurrencyDescriptor {
        code: "JPY",
        symbol: "¥",
        name: "Japanese Yen",
    },
    CurrencyDescriptor {
        code: "CNY",
        symbol: "¥",
        name: "Chinese Yuan",
    },
];

pub fn find_currency(code: &str) -> Option<&'static CurrencyDescriptor> {
    CURRENCIES.iter().find(|c| c.code == code)
}

pub fn is_supported(code: &str) -> bool {
    find_currency(code).is_some()
}

/// Returns the display symbol for `code`, or `$` for unknown codes.
pub fn currency_symbol(code: &str) -> &'static str {
    find_currency(code).map_or(DEFAULT_SYMBOL, |c| c.symbol)
}
