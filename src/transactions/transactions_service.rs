use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};

use crate::analytics;
use crate::analytics::{CategorySpend, MonthlySummary};
use crate::errors::{Error, Result};
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionUpdate};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use crate::utils::MonthKey;

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { repository }
    }

    /// Store failures on read paths degrade to an empty result set so
    /// dependent views render an empty state instead of crashing.
    fn degrade_on_store_failure(result: Result<Vec<Transaction>>) -> Result<Vec<Transaction>> {
        match result {
            Err(err @ Error::Store(_)) => {
                error!("transaction read failed, serving empty set: {err}");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn get_transactions(&self) -> Result<Vec<Transaction>> {
        Self::degrade_on_store_failure(self.repository.list().await)
    }

    async fn get_transaction(&self, id: i64) -> Result<Transaction> {
        self.repository.get(id).await
    }

    async fn get_transactions_by_month(&self, month: MonthKey) -> Result<Vec<Transaction>> {
        Self::degrade_on_store_failure(self.repository.list_by_month(month).await)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let created = self.repository.create(new_transaction).await?;
        debug!("created transaction {}", created.id);
        Ok(created)
    }

    async fn update_transaction(
        &self,
        id: i64,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        self.repository.update(id, update).await
    }

    async fn delete_transaction(&self, id: i64) -> Result<bool> {
        self.repository.delete(id).await
    }

    async fn get_summary_by_month(&self, month: MonthKey) -> Result<MonthlySummary> {
        let transactions = self.get_transactions_by_month(month).await?;
        Ok(analytics::monthly_summary(&transactions, month))
    }

    async fn get_category_breakdown(&self, month: MonthKey) -> Result<Vec<CategorySpend>> {
        let transactions = self.get_transactions_by_month(month).await?;
        Ok(analytics::category_breakdown(&transactions, month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use crate::transactions::transactions_model::TransactionKind;
    use crate::transactions::InMemoryTransactionRepository;
    use rust_decimal_macros::dec;

    fn service() -> TransactionService {
        let backend = Arc::new(MemoryBackend::new());
        TransactionService::new(Arc::new(InMemoryTransactionRepository::new(backend)))
    }

    fn new_txn(amount: rust_decimal::Decimal, date: &str) -> NewTransaction {
        NewTransaction {
            amount,
            kind: TransactionKind::Expense,
            category: "Food".to_string(),
            date: date.parse().unwrap(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_non_positive_amount() {
        let service = service();
        let err = service
            .create_transaction(new_txn(dec!(0), "2024-03-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(service.get_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_orders_most_recent_first_with_stable_ties() {
        let service = service();
        let first = service
            .create_transaction(new_txn(dec!(10), "2024-03-05"))
            .await
            .unwrap();
        let second = service
            .create_transaction(new_txn(dec!(20), "2024-03-09"))
            .await
            .unwrap();
        let third = service
            .create_transaction(new_txn(dec!(30), "2024-03-05"))
            .await
            .unwrap();

        let listed = service.get_transactions().await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id, third.id]);
    }

    #[tokio::test]
    async fn update_preserves_id_and_created_at() {
        let service = service();
        let created = service
            .create_transaction(new_txn(dec!(10), "2024-03-05"))
            .await
            .unwrap();

        let updated = service
            .update_transaction(
                created.id,
                TransactionUpdate {
                    amount: Some(dec!(12.50)),
                    notes: Some("groceries".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.amount, dec!(12.50));
        assert_eq!(updated.notes.as_deref(), Some("groceries"));
    }

    #[tokio::test]
    async fn month_filter_uses_parsed_dates() {
        let service = service();
        service
            .create_transaction(new_txn(dec!(10), "2024-03-05"))
            .await
            .unwrap();
        service
            .create_transaction(new_txn(dec!(20), "2024-04-01"))
            .await
            .unwrap();

        let march = service
            .get_transactions_by_month("2024-03".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].amount, dec!(10));
    }

    #[tokio::test]
    async fn summary_and_breakdown_cover_requested_month() {
        let service = service();
        service
            .create_transaction(NewTransaction {
                amount: dec!(100),
                kind: TransactionKind::Income,
                category: "Salary".to_string(),
                date: "2024-03-01".parse().unwrap(),
                notes: None,
            })
            .await
            .unwrap();
        service
            .create_transaction(new_txn(dec!(40), "2024-03-05"))
            .await
            .unwrap();

        let month: MonthKey = "2024-03".parse().unwrap();
        let summary = service.get_summary_by_month(month).await.unwrap();
        assert_eq!(summary.income, dec!(100));
        assert_eq!(summary.expenses, dec!(40));
        assert_eq!(summary.net, dec!(60));

        let breakdown = service.get_category_breakdown(month).await.unwrap();
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].category, "Food");
    }

    #[tokio::test]
    async fn get_missing_transaction_is_not_found() {
        let service = service();
        let err = service.get_transaction(99).await.unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                entity: "Transaction",
                id: 99
            }
        ));
    }
}
