pub mod disk;
pub mod memory;

use crate::core::{Expense, ExpenseChanges, NewExpense};
use anyhow::Result;
use async_trait::async_trait;

pub use disk::DiskExpenseStore;
pub use memory::MemoryExpenseStore;

/// Persistence for the expense collection.
///
/// Implementations assign ids from a sequence that never hands out the same
/// id twice, stamp `created_at` on insert and return records in ascending id
/// order from [`ExpenseStore::all`]. Every write is durable once the call
/// returns.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn all(&self) -> Result<Vec<Expense>>;
    async fn insert(&self, new: NewExpense) -> Result<Expense>;
    async fn get(&self, id: u64) -> Result<Option<Expense>>;
    /// Returns `None` when no expense has this id.
    async fn update(&self, id: u64, changes: ExpenseChanges) -> Result<Option<Expense>>;
    /// Returns whether an expense was removed.
    async fn remove(&self, id: u64) -> Result<bool>;
}
