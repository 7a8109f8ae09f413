use async_trait::async_trait;
use chrono::NaiveDate;

use crate::budgets::budgets_model::Budget;
use crate::errors::Result;
use crate::utils::MonthKey;
use crate::views::views_model::{Dashboard, MonthBudgets, MonthlyReport, TransactionView};

/// Trait for the derived-view assembler. Every operation reads entity
/// snapshots, joins them and recomputes derived numbers; only
/// `refresh_budget_spent` writes anything back.
#[async_trait]
pub trait ViewServiceTrait: Send + Sync {
    async fn month_budgets(&self, month: MonthKey) -> Result<MonthBudgets>;
    async fn recent_transactions(&self, limit: usize) -> Result<Vec<TransactionView>>;
    async fn dashboard(&self, month: MonthKey, today: NaiveDate) -> Result<Dashboard>;
    async fn report(&self, month: MonthKey, today: NaiveDate) -> Result<MonthlyReport>;
    async fn refresh_budget_spent(&self, month: MonthKey) -> Result<Vec<Budget>>;
}
