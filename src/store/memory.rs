use lazy_static::lazy_static;
use tokio::sync::RwLock;

use crate::categories::categories_model::Category;
use crate::budgets::budgets_model::Budget;
use crate::errors::{Error, Result};
use crate::goals::goals_model::Goal;
use crate::store::Record;
use crate::transactions::transactions_model::Transaction;
use crate::transactions::TransactionKind;

/// One in-memory entity collection. Reads hand out cloned snapshots; every
/// mutation goes through this type so there is no shared mutable state
/// outside it.
pub struct Collection<T: Record> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Collection {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn seeded(records: Vec<T>) -> Self {
        Collection {
            records: RwLock::new(records),
        }
    }

    /// Snapshot of the collection in insertion order.
    pub async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Result<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| Error::not_found(T::ENTITY, id))
    }

    /// Inserts the record produced by `build`, which receives the assigned id.
    pub async fn insert(&self, build: impl FnOnce(i64) -> T) -> T {
        let mut records = self.records.write().await;
        let next_id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
        let record = build(next_id);
        records.push(record.clone());
        record
    }

    /// Applies `mutate` to the stored record and returns the updated copy.
    pub async fn update_with(&self, id: i64, mutate: impl FnOnce(&mut T)) -> Result<T> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Error::not_found(T::ENTITY, id))?;
        mutate(record);
        Ok(record.clone())
    }

    pub async fn remove(&self, id: i64) -> Result<bool> {
        self.remove_if(id, |_| Ok(())).await
    }

    /// Removes a record unless `guard` rejects it. A rejected delete leaves
    /// the collection unchanged.
    pub async fn remove_if(
        &self,
        id: i64,
        guard: impl FnOnce(&T) -> Result<()>,
    ) -> Result<bool> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| Error::not_found(T::ENTITY, id))?;
        guard(&records[index])?;
        records.remove(index);
        Ok(true)
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory backend owning the four entity collections. Constructed once at
/// session start and shared by reference with every repository; no state
/// lives outside it.
pub struct MemoryBackend {
    pub transactions: Collection<Transaction>,
    pub categories: Collection<Category>,
    pub budgets: Collection<Budget>,
    pub goals: Collection<Goal>,
}

impl MemoryBackend {
    /// An empty backend seeded with the default category set.
    pub fn new() -> Self {
        MemoryBackend {
            transactions: Collection::new(),
            categories: Collection::seeded(default_categories()),
            budgets: Collection::new(),
            goals: Collection::new(),
        }
    }

    /// A fully empty backend, mainly for tests.
    pub fn empty() -> Self {
        MemoryBackend {
            transactions: Collection::new(),
            categories: Collection::new(),
            budgets: Collection::new(),
            goals: Collection::new(),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    /// (name, kind, color, icon) for the categories every session starts with.
    static ref DEFAULT_CATEGORY_SEED: Vec<(&'static str, TransactionKind, &'static str, &'static str)> = vec![
        ("Salary", TransactionKind::Income, "#10b981", "Banknote"),
        ("Other Income", TransactionKind::Income, "#22c55e", "PlusCircle"),
        ("Food", TransactionKind::Expense, "#f59e0b", "UtensilsCrossed"),
        ("Transport", TransactionKind::Expense, "#3b82f6", "Car"),
        ("Bills", TransactionKind::Expense, "#8b5cf6", "Receipt"),
        ("Entertainment", TransactionKind::Expense, "#ec4899", "Film"),
        ("Shopping", TransactionKind::Expense, "#f97316", "ShoppingBag"),
        ("Healthcare", TransactionKind::Expense, "#ef4444", "HeartPulse"),
        ("Education", TransactionKind::Expense, "#0891b2", "GraduationCap"),
        ("Savings", TransactionKind::Expense, "#14b8a6", "PiggyBank"),
        ("Investments", TransactionKind::Expense, "#6366f1", "TrendingUp"),
        ("Other Expense", TransactionKind::Expense, "#64748b", "Circle"),
    ];
}

fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORY_SEED
        .iter()
        .enumerate()
        .map(|(index, (name, kind, color, icon))| Category {
            id: index as i64 + 1,
            name: (*name).to_string(),
            kind: *kind,
            color: (*color).to_string(),
            icon: (*icon).to_string(),
            is_default: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn sample(amount: rust_decimal::Decimal) -> impl FnOnce(i64) -> Transaction {
        move |id| Transaction {
            id,
            amount,
            kind: TransactionKind::Expense,
            category: "Food".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increment_from_max() {
        let collection: Collection<Transaction> = Collection::new();
        let first = collection.insert(sample(dec!(10))).await;
        let second = collection.insert(sample(dec!(20))).await;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        collection.remove(1).await.unwrap();
        let third = collection.insert(sample(dec!(30))).await;
        assert_eq!(third.id, 3, "id reuses max+1, not freed slots");
    }

    #[tokio::test]
    async fn get_is_idempotent_between_writes() {
        let collection: Collection<Transaction> = Collection::new();
        let created = collection.insert(sample(dec!(42))).await;
        let a = collection.get(created.id).await.unwrap();
        let b = collection.get(created.id).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn rejected_guard_leaves_collection_unchanged() {
        let backend = MemoryBackend::new();
        let before = backend.categories.list().await;
        let default_id = before[0].id;

        let err = backend
            .categories
            .remove_if(default_id, |category| {
                if category.is_default {
                    Err(Error::protected(Category::ENTITY, category.id))
                } else {
                    Ok(())
                }
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Protected { .. }));
        assert_eq!(backend.categories.list().await.len(), before.len());
    }

    #[tokio::test]
    async fn default_categories_are_seeded() {
        let backend = MemoryBackend::new();
        let categories = backend.categories.list().await;
        assert_eq!(categories.len(), 12);
        assert!(categories.iter().all(|category| category.is_default));
        assert!(categories.iter().any(|category| category.name == "Salary"));
    }
}
