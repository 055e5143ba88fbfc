//! Transaction, category and balance endpoints.

use crate::core::balance::BalanceSummary;
use crate::core::currency::is_supported;
use crate::core::pagination::{Page, TransactionFilter, paginate};
use crate::core::rates::RateSource;
use crate::core::transaction::{
    Category, NewTransaction, Transaction, TransactionKind, TransactionUpdate,
};
use crate::server::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{ApiJson, ApiQuery};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub kind: Option<TransactionKind>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BalanceQuery {
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    #[serde(flatten)]
    pub summary: BalanceSummary,
    pub formatted: FormattedBalance,
    pub rate_source: RateSource,
}

#[derive(Debug, Serialize)]
pub struct FormattedBalance {
    pub income: String,
    pub expenses: String,
    pub balance: String,
    /// The balance string carries no sign, this says whether it is below zero.
    pub negative: bool,
}

/// A transaction as shown in the list, with its category resolved.
#[derive(Debug, Serialize)]
pub struct ListedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: Option<Category>,
    /// The description, or the category name when there is none.
    pub label: String,
}

impl ListedTransaction {
    fn new(transaction: Transaction, categories: &[Category]) -> Self {
        let category = categories
            .iter()
            .find(|c| c.id == transaction.category_id)
            .cloned();
        let label = match (&transaction.description, &category) {
            (Some(description), _) => description.clone(),
            (None, Some(category)) => category.name.clone(),
            (None, None) => transaction.category_id.clone(),
        };
        Self {
            transaction,
            category,
            label,
        }
    }
}

pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CategoryQuery>,
) -> Json<Vec<Category>> {
    let categories = state
        .store
        .categories()
        .await
        .into_iter()
        .filter(|c| query.kind.is_none_or(|kind| c.kind == kind))
        .collect();
    Json(categories)
}

pub async fn list_transactions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Json<Page<ListedTransaction>> {
    let filter = TransactionFilter {
        kind: query.kind,
        category_id: query.category,
    };

    let categories = state.store.categories().await;
    let transactions: Vec<Transaction> = state
        .store
        .list()
        .await
        .into_iter()
        .filter(|t| filter.matches(t))
        .collect();

    let page = paginate(&transactions, query.page.unwrap_or(1), state.page_size);
    Json(page.map(|t| ListedTransaction::new(t, &categories)))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = state.store.create(new).await?;
    tracing::info!(id = %transaction.id, "Created transaction");
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<TransactionUpdate>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state.store.update(&id, update).await?;
    tracing::info!(id = %transaction.id, "Updated transaction");
    Ok(Json(transaction))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&id).await?;
    tracing::info!(%id, "Deleted transaction");
    Ok(StatusCode::NO_CONTENT)
}

/// Totals every stored transaction in the requested display currency.
pub async fn get_balance(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BalanceQuery>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let currency = query
        .currency
        .unwrap_or_else(|| state.display_currency.clone());
    if !is_supported(&currency) {
        return Err(ApiError::BadRequest(format!(
            "Unsupported currency: {currency}"
        )));
    }

    let snapshot = state.rates.snapshot().await;
    let transactions = state.store.list().await;
    let summary = BalanceSummary::compute(&transactions, &currency, Some(snapshot.rates.as_ref()));

    Ok(Json(BalanceResponse {
        formatted: FormattedBalance {
            income: summary.income_display(),
            expenses: summary.expenses_display(),
            balance: summary.balance_display(),
            negative: summary.is_negative(),
        },
        summary,
        rate_source: snapshot.source,
    }))
}
