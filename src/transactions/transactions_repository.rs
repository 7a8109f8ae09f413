use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{Error, Result};
use crate::store::{MemoryBackend, Record, RecordClient};
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionUpdate};
use crate::transactions::transactions_traits::TransactionRepositoryTrait;
use crate::utils::MonthKey;

/// Orders most recent first; the stable sort keeps same-date records in
/// insertion order.
fn sort_date_descending(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

pub struct InMemoryTransactionRepository {
    backend: Arc<MemoryBackend>,
}

impl InMemoryTransactionRepository {
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        InMemoryTransactionRepository { backend }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryTransactionRepository {
    async fn list(&self) -> Result<Vec<Transaction>> {
        let mut transactions = self.backend.transactions.list().await;
        sort_date_descending(&mut transactions);
        Ok(transactions)
    }

    async fn get(&self, id: i64) -> Result<Transaction> {
        self.backend.transactions.get(id).await
    }

    async fn list_by_month(&self, month: MonthKey) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .backend
            .transactions
            .list()
            .await
            .into_iter()
            .filter(|transaction| month.contains(transaction.date))
            .collect();
        sort_date_descending(&mut transactions);
        Ok(transactions)
    }

    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        let created_at = Utc::now();
        let created = self
            .backend
            .transactions
            .insert(|id| new_transaction.into_record(id, created_at))
            .await;
        Ok(created)
    }

    async fn update(&self, id: i64, update: TransactionUpdate) -> Result<Transaction> {
        update.validate()?;
        self.backend
            .transactions
            .update_with(id, |record| update.apply_to(record))
            .await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.backend.transactions.remove(id).await
    }
}

/// Create payload for the record store: the new fields plus the creation
/// timestamp the core stamps itself.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionCreateBody {
    #[serde(flatten)]
    fields: NewTransaction,
    created_at: DateTime<Utc>,
}

pub struct RemoteTransactionRepository {
    client: Arc<RecordClient>,
}

impl RemoteTransactionRepository {
    pub fn new(client: Arc<RecordClient>) -> Self {
        RemoteTransactionRepository { client }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for RemoteTransactionRepository {
    async fn list(&self) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> =
            self.client.list(Transaction::COLLECTION, &[]).await?;
        sort_date_descending(&mut transactions);
        Ok(transactions)
    }

    async fn get(&self, id: i64) -> Result<Transaction> {
        self.client
            .get(Transaction::COLLECTION, id)
            .await?
            .ok_or_else(|| Error::not_found(Transaction::ENTITY, id))
    }

    async fn list_by_month(&self, month: MonthKey) -> Result<Vec<Transaction>> {
        // The store's month filter is a string-prefix match over the date
        // field, which would also accept malformed dates like "2024-0305".
        // Fetch the collection and filter on parsed dates instead.
        let mut transactions: Vec<Transaction> = self
            .client
            .list(Transaction::COLLECTION, &[])
            .await?
            .into_iter()
            .filter(|transaction: &Transaction| month.contains(transaction.date))
            .collect();
        sort_date_descending(&mut transactions);
        Ok(transactions)
    }

    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        let body = TransactionCreateBody {
            fields: new_transaction,
            created_at: Utc::now(),
        };
        Ok(self.client.create(Transaction::COLLECTION, &body).await?)
    }

    async fn update(&self, id: i64, update: TransactionUpdate) -> Result<Transaction> {
        update.validate()?;
        self.client
            .update(Transaction::COLLECTION, id, &update)
            .await?
            .ok_or_else(|| Error::not_found(Transaction::ENTITY, id))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self.client.delete(Transaction::COLLECTION, id).await?;
        if deleted {
            Ok(true)
        } else {
            Err(Error::not_found(Transaction::ENTITY, id))
        }
    }
}
