use async_trait::async_trait;

use crate::budgets::budgets_model::{Budget, BudgetUpdate, NewBudget};
use crate::errors::Result;
use crate::utils::MonthKey;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Budget>>;
    async fn get(&self, id: i64) -> Result<Budget>;
    async fn list_by_month(&self, month: MonthKey) -> Result<Vec<Budget>>;
    async fn create(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update(&self, id: i64, update: BudgetUpdate) -> Result<Budget>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Trait for budget service operations.
///
/// The service enforces the one-budget-per-(category, month) invariant on
/// top of the repository contract.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    async fn get_budgets(&self) -> Result<Vec<Budget>>;
    async fn get_budget(&self, id: i64) -> Result<Budget>;
    async fn get_budgets_by_month(&self, month: MonthKey) -> Result<Vec<Budget>>;
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(&self, id: i64, update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, id: i64) -> Result<bool>;
}
