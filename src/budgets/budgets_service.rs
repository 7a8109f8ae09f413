use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};

use crate::budgets::budgets_model::{Budget, BudgetUpdate, NewBudget};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::MonthKey;

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { repository }
    }

    fn degrade_on_store_failure(result: Result<Vec<Budget>>) -> Result<Vec<Budget>> {
        match result {
            Err(err @ Error::Store(_)) => {
                error!("budget read failed, serving empty set: {err}");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// At most one budget may exist per (category, month). `exclude_id`
    /// skips the record being updated.
    async fn ensure_unique(
        &self,
        category_id: i64,
        month: MonthKey,
        exclude_id: Option<i64>,
    ) -> Result<()> {
        let existing = self.repository.list_by_month(month).await?;
        let duplicate = existing.iter().any(|budget| {
            budget.category_id == category_id && Some(budget.id) != exclude_id
        });
        if duplicate {
            Err(ValidationError::DuplicateBudget {
                category_id,
                month: month.to_string(),
            }
            .into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn get_budgets(&self) -> Result<Vec<Budget>> {
        Self::degrade_on_store_failure(self.repository.list().await)
    }

    async fn get_budget(&self, id: i64) -> Result<Budget> {
        self.repository.get(id).await
    }

    async fn get_budgets_by_month(&self, month: MonthKey) -> Result<Vec<Budget>> {
        Self::degrade_on_store_failure(self.repository.list_by_month(month).await)
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        self.ensure_unique(new_budget.category_id, new_budget.month, None)
            .await?;
        let created = self.repository.create(new_budget).await?;
        debug!(
            "created budget {} for category {} in {}",
            created.id, created.category_id, created.month
        );
        Ok(created)
    }

    async fn update_budget(&self, id: i64, update: BudgetUpdate) -> Result<Budget> {
        update.validate()?;
        if update.category_id.is_some() || update.month.is_some() {
            let current = self.repository.get(id).await?;
            let category_id = update.category_id.unwrap_or(current.category_id);
            let month = update.month.unwrap_or(current.month);
            self.ensure_unique(category_id, month, Some(id)).await?;
        }
        self.repository.update(id, update).await
    }

    async fn delete_budget(&self, id: i64) -> Result<bool> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgets::InMemoryBudgetRepository;
    use crate::store::MemoryBackend;
    use rust_decimal_macros::dec;

    fn service() -> BudgetService {
        let backend = Arc::new(MemoryBackend::new());
        BudgetService::new(Arc::new(InMemoryBudgetRepository::new(backend)))
    }

    fn march() -> MonthKey {
        "2024-03".parse().unwrap()
    }

    fn new_budget(category_id: i64) -> NewBudget {
        NewBudget {
            category_id,
            month: march(),
            amount: dec!(200),
        }
    }

    #[tokio::test]
    async fn create_starts_spent_at_zero() {
        let service = service();
        let created = service.create_budget(new_budget(3)).await.unwrap();
        assert_eq!(created.spent, dec!(0));
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn duplicate_category_month_pair_is_rejected() {
        let service = service();
        service.create_budget(new_budget(3)).await.unwrap();

        let err = service.create_budget(new_budget(3)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateBudget { .. })
        ));

        // same category in another month is fine
        service
            .create_budget(NewBudget {
                category_id: 3,
                month: "2024-04".parse().unwrap(),
                amount: dec!(180),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_cannot_collide_with_existing_pair() {
        let service = service();
        service.create_budget(new_budget(3)).await.unwrap();
        let other = service.create_budget(new_budget(4)).await.unwrap();

        let err = service
            .update_budget(
                other.id,
                BudgetUpdate {
                    category_id: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateBudget { .. })
        ));
    }

    #[tokio::test]
    async fn update_amount_keeps_pair_and_succeeds() {
        let service = service();
        let created = service.create_budget(new_budget(3)).await.unwrap();
        let updated = service
            .update_budget(
                created.id,
                BudgetUpdate {
                    amount: Some(dec!(250)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, dec!(250));
        assert_eq!(updated.category_id, 3);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_amount() {
        let service = service();
        let err = service
            .create_budget(NewBudget {
                category_id: 3,
                month: march(),
                amount: dec!(0),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
