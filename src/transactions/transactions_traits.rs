use async_trait::async_trait;

use crate::analytics::{CategorySpend, MonthlySummary};
use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionUpdate};
use crate::utils::MonthKey;

/// Trait for transaction repository operations.
///
/// `list` and `list_by_month` return records ordered by date descending,
/// ties kept in insertion order.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Transaction>>;
    async fn get(&self, id: i64) -> Result<Transaction>;
    async fn list_by_month(&self, month: MonthKey) -> Result<Vec<Transaction>>;
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update(&self, id: i64, update: TransactionUpdate) -> Result<Transaction>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn get_transactions(&self) -> Result<Vec<Transaction>>;
    async fn get_transaction(&self, id: i64) -> Result<Transaction>;
    async fn get_transactions_by_month(&self, month: MonthKey) -> Result<Vec<Transaction>>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        id: i64,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, id: i64) -> Result<bool>;
    async fn get_summary_by_month(&self, month: MonthKey) -> Result<MonthlySummary>;
    async fn get_category_breakdown(&self, month: MonthKey) -> Result<Vec<CategorySpend>>;
}
