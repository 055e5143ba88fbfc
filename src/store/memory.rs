use crate::core::currency::is_supported;
use crate::core::transaction::{
    Category, NewTransaction, Transaction, TransactionKind, TransactionUpdate,
    currency_or_default, default_categories, normalize_description,
};
use crate::store::{StoreError, TransactionStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

struct StoredTransaction {
    transaction: Transaction,
    // Creation order, used to break ties between transactions on the same date
    seq: u64,
}

/// In-memory transaction store. Contents are lost when the process exits.
pub struct MemoryTransactionStore {
    categories: Vec<Category>,
    transactions: Arc<RwLock<HashMap<String, StoredTransaction>>>,
    next_id: AtomicU64,
}

impl MemoryTransactionStore {
    /// Creates a store seeded with the default categories
    pub fn new() -> Self {
        Self::with_categories(default_categories())
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories,
            transactions: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    fn validate(
        &self,
        amount: f64,
        kind: TransactionKind,
        category_id: &str,
        currency: &str,
    ) -> Result<(), StoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(StoreError::InvalidAmount);
        }

        let category = self
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| StoreError::UnknownCategory(category_id.to_string()))?;
        if category.kind != kind {
            return Err(StoreError::CategoryKindMismatch {
                category_id: category_id.to_string(),
                kind: kind.to_string(),
            });
        }

        if !is_supported(currency) {
            return Err(StoreError::UnsupportedCurrency(currency.to_string()));
        }

        Ok(())
    }
}

impl Default for MemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    async fn list(&self) -> Vec<Transaction> {
        let transactions = self.transactions.read().await;
        let mut stored: Vec<&StoredTransaction> = transactions.values().collect();
        stored.sort_by(|a, b| {
            b.transaction
                .date
                .cmp(&a.transaction.date)
                .then(b.seq.cmp(&a.seq))
        });
        stored.into_iter().map(|s| s.transaction.clone()).collect()
    }

    async fn get(&self, id: &str) -> Result<Transaction, StoreError> {
        let transactions = self.transactions.read().await;
        transactions
            .get(id)
            .map(|s| s.transaction.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn create(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        let currency = currency_or_default(new.currency.as_deref());
        self.validate(new.amount, new.kind, &new.category_id, &currency)?;

        let seq = self.next_id.fetch_add(1, Ordering::SeqCst);
        let transaction = Transaction {
            id: format!("txn-{seq}"),
            amount: new.amount,
            description: normalize_description(new.description.as_deref()),
            date: new.date,
            kind: new.kind,
            category_id: new.category_id,
            currency,
        };

        let mut transactions = self.transactions.write().await;
        debug!(id = %transaction.id, "Storing transaction");
        transactions.insert(
            transaction.id.clone(),
            StoredTransaction {
                transaction: transaction.clone(),
                seq,
            },
        );
        Ok(transaction)
    }

    async fn update(
        &self,
        id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction, StoreError> {
        let currency = currency_or_default(update.currency.as_deref());

        let mut transactions = self.transactions.write().await;
        let stored = transactions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.validate(update.amount, update.kind, &update.category_id, &currency)?;

        let transaction = &mut stored.transaction;
        transaction.amount = update.amount;
        transaction.description = normalize_description(update.description.as_deref());
        transaction.kind = update.kind;
        transaction.category_id = update.category_id;
        transaction.currency = currency;

        debug!(id, "Updated transaction");
        Ok(transaction.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut transactions = self.transactions.write().await;
        if transactions.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(id, "Deleted transaction");
        Ok(())
    }
}
