use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::budgets::budgets_model::{Budget, BudgetUpdate, NewBudget};
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::errors::{Error, Result};
use crate::store::{MemoryBackend, Record, RecordClient};
use crate::utils::MonthKey;

pub struct InMemoryBudgetRepository {
    backend: Arc<MemoryBackend>,
}

impl InMemoryBudgetRepository {
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        InMemoryBudgetRepository { backend }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryBudgetRepository {
    async fn list(&self) -> Result<Vec<Budget>> {
        Ok(self.backend.budgets.list().await)
    }

    async fn get(&self, id: i64) -> Result<Budget> {
        self.backend.budgets.get(id).await
    }

    async fn list_by_month(&self, month: MonthKey) -> Result<Vec<Budget>> {
        Ok(self
            .backend
            .budgets
            .list()
            .await
            .into_iter()
            .filter(|budget| budget.month == month)
            .collect())
    }

    async fn create(&self, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        let created = self
            .backend
            .budgets
            .insert(|id| new_budget.into_record(id))
            .await;
        Ok(created)
    }

    async fn update(&self, id: i64, update: BudgetUpdate) -> Result<Budget> {
        update.validate()?;
        self.backend
            .budgets
            .update_with(id, |record| update.apply_to(record))
            .await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.backend.budgets.remove(id).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetCreateBody {
    #[serde(flatten)]
    fields: NewBudget,
    spent: Decimal,
}

pub struct RemoteBudgetRepository {
    client: Arc<RecordClient>,
}

impl RemoteBudgetRepository {
    pub fn new(client: Arc<RecordClient>) -> Self {
        RemoteBudgetRepository { client }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for RemoteBudgetRepository {
    async fn list(&self) -> Result<Vec<Budget>> {
        Ok(self.client.list(Budget::COLLECTION, &[]).await?)
    }

    async fn get(&self, id: i64) -> Result<Budget> {
        self.client
            .get(Budget::COLLECTION, id)
            .await?
            .ok_or_else(|| Error::not_found(Budget::ENTITY, id))
    }

    async fn list_by_month(&self, month: MonthKey) -> Result<Vec<Budget>> {
        Ok(self
            .client
            .list(Budget::COLLECTION, &[("month", month.to_string())])
            .await?)
    }

    async fn create(&self, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        let body = BudgetCreateBody {
            fields: new_budget,
            spent: Decimal::ZERO,
        };
        Ok(self.client.create(Budget::COLLECTION, &body).await?)
    }

    async fn update(&self, id: i64, update: BudgetUpdate) -> Result<Budget> {
        update.validate()?;
        self.client
            .update(Budget::COLLECTION, id, &update)
            .await?
            .ok_or_else(|| Error::not_found(Budget::ENTITY, id))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self.client.delete(Budget::COLLECTION, id).await?;
        if deleted {
            Ok(true)
        } else {
            Err(Error::not_found(Budget::ENTITY, id))
        }
    }
}
