pub mod memory;

use crate::core::transaction::{Category, NewTransaction, Transaction, TransactionUpdate};
use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryTransactionStore;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Transaction not found: {0}")]
    NotFound(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Category {category_id} does not accept {kind} transactions")]
    CategoryKindMismatch { category_id: String, kind: String },
    #[error("Amount must be a positive number")]
    InvalidAmount,
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// Storage for transactions and their categories.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn categories(&self) -> Vec<Category>;

    /// All transactions, newest date first.
    async fn list(&self) -> Vec<Transaction>;

    async fn get(&self, id: &str) -> Result<Transaction, StoreError>;

    async fn create(&self, new: NewTransaction) -> Result<Transaction, StoreError>;

    async fn update(&self, id: &str, update: TransactionUpdate)
    -> Result<Transaction, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
