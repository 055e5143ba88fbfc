//! Filtering and paging for transaction lists.

use crate::core::transaction::{Transaction, TransactionKind};
use serde::{Deserialize, Serialize};

/// The number of transactions shown per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category_id: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.kind.is_none_or(|kind| transaction.kind == kind)
            && self
                .category_id
                .as_deref()
                .is_none_or(|id| transaction.category_id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served, after clamping.
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Transforms the items on this page, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Returns the requested page of `items`.
///
/// Out of range page numbers are clamped to the first or last page so the
/// caller always gets a valid page, which is empty only when `items` is.
pub fn paginate<T: Clone>(items: &[T], page: u64, per_page: u64) -> Page<T> {
    let per_page = if per_page == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        per_page
    };
    let total_items = items.len() as u64;
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * per_page) as usize;
    let end = (start + per_page as usize).min(items.len());
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}
