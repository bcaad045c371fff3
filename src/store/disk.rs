use super::ExpenseStore;
use crate::core::{Expense, ExpenseChanges, NewExpense};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

const EXPENSES_PARTITION: &str = "expenses";
const META_PARTITION: &str = "meta";
const LAST_ID_KEY: &str = "last_id";

/// Expense store backed by a fjall keyspace.
///
/// Records live in the `expenses` partition keyed by the big-endian id so
/// that iteration yields ascending ids. The `meta` partition holds the last
/// allocated id.
pub struct DiskExpenseStore {
    keyspace: Keyspace,
    expenses: PartitionHandle,
    meta: PartitionHandle,
    // serializes id allocation and read-modify-write updates
    write_lock: Mutex<()>,
}

impl DiskExpenseStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open keyspace at {}", path.display()))?;
        let expenses = keyspace
            .open_partition(EXPENSES_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open expenses partition")?;
        let meta = keyspace
            .open_partition(META_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open meta partition")?;

        debug!("Opened expense store at {}", path.display());
        Ok(Self {
            keyspace,
            expenses,
            meta,
            write_lock: Mutex::new(()),
        })
    }

    fn last_id(&self) -> Result<u64> {
        match self.meta.get(LAST_ID_KEY)? {
            Some(bytes) => {
                let raw = <[u8; 8]>::try_from(&bytes[..])
                    .map_err(|_| anyhow!("Corrupt id sequence"))?;
                Ok(u64::from_be_bytes(raw))
            }
            None => Ok(0),
        }
    }

    fn read(&self, id: u64) -> Result<Option<Expense>> {
        match self.expenses.get(id.to_be_bytes())? {
            Some(bytes) => {
                let expense = serde_json::from_slice(&bytes)
                    .with_context(|| format!("Failed to decode expense {id}"))?;
                Ok(Some(expense))
            }
            None => Ok(None),
        }
    }

    fn write(&self, expense: &Expense) -> Result<()> {
        let value = serde_json::to_vec(expense)?;
        self.expenses
            .insert(expense.id.to_be_bytes().as_slice(), value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

#[async_trait]
impl ExpenseStore for DiskExpenseStore {
    async fn all(&self) -> Result<Vec<Expense>> {
        let mut all = Vec::new();
        for item in self.expenses.iter() {
            let (_, value) = item?;
            let expense: Expense =
                serde_json::from_slice(&value).context("Failed to decode expense")?;
            all.push(expense);
        }
        Ok(all)
    }

    async fn insert(&self, new: NewExpense) -> Result<Expense> {
        let _guard = self.write_lock.lock().await;
        let id = self.last_id()? + 1;
        let expense = new.into_expense(id, Utc::now());

        let mut batch = self.keyspace.batch();
        batch.insert(&self.meta, LAST_ID_KEY, id.to_be_bytes().as_slice());
        batch.insert(
            &self.expenses,
            id.to_be_bytes().as_slice(),
            serde_json::to_vec(&expense)?,
        );
        batch.commit()?;
        self.keyspace.persist(PersistMode::SyncAll)?;

        debug!(id, "Stored expense");
        Ok(expense)
    }

    async fn get(&self, id: u64) -> Result<Option<Expense>> {
        self.read(id)
    }

    async fn update(&self, id: u64, changes: ExpenseChanges) -> Result<Option<Expense>> {
        let _guard = self.write_lock.lock().await;
        let Some(mut expense) = self.read(id)? else {
            return Ok(None);
        };
        expense.apply(changes);
        self.write(&expense)?;
        debug!(id, "Updated expense");
        Ok(Some(expense))
    }

    async fn remove(&self, id: u64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        if !self.expenses.contains_key(id.to_be_bytes())? {
            return Ok(false);
        }
        self.expenses.remove(id.to_be_bytes().as_slice())?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(id, "Removed expense");
        Ok(true)
    }
}
