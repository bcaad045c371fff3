//! Expense operations on top of an [`ExpenseStore`].

use crate::core::{Expense, ExpenseDraft, ValidationErrors};
use crate::store::ExpenseStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("invalid expense: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("expense {0} not found")]
    NotFound(u64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;

/// Newest first; expenses sharing a date keep their store order.
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}

#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Expense>> {
        let mut expenses = self.store.all().await?;
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &ExpenseDraft) -> Result<Expense> {
        let new = draft.validate_new()?;
        let expense = self.store.insert(new).await?;
        debug!(id = expense.id, "Created expense");
        Ok(expense)
    }

    pub async fn retrieve(&self, id: u64) -> Result<Expense> {
        self.store.get(id).await?.ok_or(ExpenseError::NotFound(id))
    }

    /// Full update when `partial` is false, otherwise only supplied fields.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: u64, draft: &ExpenseDraft, partial: bool) -> Result<Expense> {
        // an unknown id is reported before any validation problem
        if self.store.get(id).await?.is_none() {
            return Err(ExpenseError::NotFound(id));
        }
        let changes = draft.validate_changes(partial)?;
        self.store
            .update(id, changes)
            .await?
            .ok_or(ExpenseError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        if self.store.remove(id).await? {
            debug!(id, "Deleted expense");
            Ok(())
        } else {
            Err(ExpenseError::NotFound(id))
        }
    }
}
