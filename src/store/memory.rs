use super::ExpenseStore;
use crate::core::{Expense, ExpenseChanges, NewExpense};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct Inner {
    last_id: u64,
    expenses: BTreeMap<u64, Expense>,
}

/// In-memory expense store, lost on drop
#[derive(Default)]
pub struct MemoryExpenseStore {
    inner: Mutex<Inner>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn all(&self) -> Result<Vec<Expense>> {
        let inner = self.inner.lock().await;
        Ok(inner.expenses.values().cloned().collect())
    }

    async fn insert(&self, new: NewExpense) -> Result<Expense> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let expense = new.into_expense(inner.last_id, Utc::now());
        inner.expenses.insert(expense.id, expense.clone());
        debug!(id = expense.id, "Stored expense in memory");
        Ok(expense)
    }

    async fn get(&self, id: u64) -> Result<Option<Expense>> {
        let inner = self.inner.lock().await;
        Ok(inner.expenses.get(&id).cloned())
    }

    async fn update(&self, id: u64, changes: ExpenseChanges) -> Result<Option<Expense>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.expenses.get_mut(&id).map(|expense| {
            expense.apply(changes);
            expense.clone()
        }))
    }

    async fn remove(&self, id: u64) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        Ok(inner.expenses.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn lunch() -> NewExpense {
        NewExpense {
            amount: Decimal::new(1250, 2),
            category: Category::Food,
            date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            notes: Some("lunch".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = MemoryExpenseStore::new();

        let created = store.insert(lunch()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.get(1).await.unwrap(), Some(created));

        assert!(store.remove(1).await.unwrap());
        assert!(store.get(1).await.unwrap().is_none());
        assert!(!store.remove(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryExpenseStore::new();
        store.insert(lunch()).await.unwrap();
        let second = store.insert(lunch()).await.unwrap();
        store.remove(second.id).await.unwrap();

        let third = store.insert(lunch()).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryExpenseStore::new();
        let result = store.update(7, ExpenseChanges::default()).await.unwrap();
        assert!(result.is_none());
    }
}
