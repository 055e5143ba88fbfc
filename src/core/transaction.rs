//! Transactions, categories and the payloads used to create or edit them

use crate::core::currency::PIVOT_CURRENCY;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionKind::Income => "income",
                TransactionKind::Expense => "expense",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: TransactionKind,
    pub icon: Option<String>,
}

impl Category {
    fn new(id: &str, name: &str, kind: TransactionKind, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            icon: Some(icon.to_string()),
        }
    }
}

/// The categories every new store starts with.
pub fn default_categories() -> Vec<Category> {
    use TransactionKind::{Expense, Income};

    vec![
        Category::new("test-category-id", "Food", Expense, "🍔"),
        Category::new("cat-transport", "Transport", Expense, "🚗"),
        Category::new("cat-entertainment", "Entertainment", Expense, "🎬"),
        Category::new("cat-shopping", "Shopping", Expense, "🛒"),
        Category::new("cat-salary", "Salary", Income, "💰"),
        Category::new("cat-freelance", "Freelance", Income, "💼"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_id: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: TransactionKind,
    pub category_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Editable fields of a stored transaction. The date is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: TransactionKind,
    pub category_id: String,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Resolves an optional currency field, treating blank values as absent.
pub fn currency_or_default(currency: Option<&str>) -> String {
    currency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(PIVOT_CURRENCY)
        .to_string()
}

/// Normalises an optional description, dropping blank values.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
