use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::join;
use log::{debug, error};
use rust_decimal::Decimal;

use crate::analytics;
use crate::budgets::budgets_model::{Budget, BudgetUpdate};
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::categories::categories_model::Category;
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::constants::{
    DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON, DISPLAY_DECIMAL_PRECISION, TREND_MONTHS,
    UNKNOWN_CATEGORY_NAME,
};
use crate::errors::{Error, Result};
use crate::goals::goals_model::GoalStatus;
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::transactions::transactions_model::Transaction;
use crate::transactions::transactions_traits::TransactionRepositoryTrait;
use crate::utils::{last_n_months, MonthKey};
use crate::views::views_model::{
    BudgetView, Dashboard, GoalView, MonthBudgets, MonthlyReport, TransactionView, TrendPoint,
};
use crate::views::views_traits::ViewServiceTrait;

/// How many transactions the dashboard's activity section shows.
const DASHBOARD_RECENT_TRANSACTIONS: usize = 5;

/// Assembles caller-facing views by joining entity snapshots and recomputing
/// every derived number on read. Holds no state of its own.
pub struct ViewService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl ViewService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        ViewService {
            transaction_repository,
            category_repository,
            budget_repository,
            goal_repository,
        }
    }

    fn build_budget_view(
        budget: Budget,
        categories_by_id: &HashMap<i64, &Category>,
        transactions: &[Transaction],
    ) -> BudgetView {
        let (category_name, category_icon) = match categories_by_id.get(&budget.category_id) {
            Some(category) => (category.name.clone(), category.icon.clone()),
            None => (
                UNKNOWN_CATEGORY_NAME.to_string(),
                DEFAULT_CATEGORY_ICON.to_string(),
            ),
        };
        let consumption = analytics::budget_consumption(&budget, &category_name, transactions);
        BudgetView {
            id: budget.id,
            category_id: budget.category_id,
            category_name,
            category_icon,
            month: budget.month,
            amount: budget.amount,
            spent: consumption.spent,
            // caller-facing percentages carry display precision; the engine
            // keeps full precision internally
            percent_used: consumption.percent_used.round_dp(DISPLAY_DECIMAL_PRECISION),
            status: consumption.status,
        }
    }

    fn enrich_transactions(
        transactions: Vec<Transaction>,
        categories: &[Category],
    ) -> Vec<TransactionView> {
        let by_name: HashMap<&str, &Category> = categories
            .iter()
            .map(|category| (category.name.as_str(), category))
            .collect();
        transactions
            .into_iter()
            .map(|transaction| {
                let (category_icon, category_color) = match by_name.get(transaction.category.as_str())
                {
                    Some(category) => (category.icon.clone(), category.color.clone()),
                    None => (
                        DEFAULT_CATEGORY_ICON.to_string(),
                        DEFAULT_CATEGORY_COLOR.to_string(),
                    ),
                };
                TransactionView {
                    signed_amount: transaction.signed_amount(),
                    transaction,
                    category_icon,
                    category_color,
                }
            })
            .collect()
    }
}

/// A failed store read empties the affected section instead of failing the
/// whole view. Validation and not-found errors still propagate.
fn degrade<T>(section: &str, result: Result<Vec<T>>) -> Result<Vec<T>> {
    match result {
        Err(err @ Error::Store(_)) => {
            error!("{section} read failed, serving empty section: {err}");
            Ok(Vec::new())
        }
        other => other,
    }
}

#[async_trait]
impl ViewServiceTrait for ViewService {
    async fn month_budgets(&self, month: MonthKey) -> Result<MonthBudgets> {
        let (budgets, categories, transactions) = join!(
            self.budget_repository.list_by_month(month),
            self.category_repository.list(),
            self.transaction_repository.list_by_month(month),
        );
        let budgets = degrade("budgets", budgets)?;
        let categories = degrade("categories", categories)?;
        let transactions = degrade("transactions", transactions)?;

        let categories_by_id: HashMap<i64, &Category> = categories
            .iter()
            .map(|category| (category.id, category))
            .collect();

        let mut views = Vec::with_capacity(budgets.len());
        let mut total_budgeted = Decimal::ZERO;
        let mut total_spent = Decimal::ZERO;
        for budget in budgets {
            let view = Self::build_budget_view(budget, &categories_by_id, &transactions);
            total_budgeted += view.amount;
            total_spent += view.spent;
            views.push(view);
        }
        Ok(MonthBudgets {
            month,
            budgets: views,
            total_budgeted,
            total_spent,
        })
    }

    async fn recent_transactions(&self, limit: usize) -> Result<Vec<TransactionView>> {
        let (transactions, categories) = join!(
            self.transaction_repository.list(),
            self.category_repository.list(),
        );
        // Transactions arrive newest first, so the most recent survive the cut.
        let mut transactions = degrade("transactions", transactions)?;
        transactions.truncate(limit);
        let categories = degrade("categories", categories)?;
        Ok(Self::enrich_transactions(transactions, &categories))
    }

    async fn dashboard(&self, month: MonthKey, today: NaiveDate) -> Result<Dashboard> {
        let (transactions, categories, goals) = join!(
            self.transaction_repository.list(),
            self.category_repository.list(),
            self.goal_repository.list_by_status(GoalStatus::Active),
        );
        let transactions = degrade("transactions", transactions)?;
        let categories = degrade("categories", categories)?;
        let goals = degrade("goals", goals)?;

        let summary = analytics::monthly_summary(&transactions, month);
        let breakdown = analytics::category_breakdown(&transactions, month);
        let active_goals = goals
            .into_iter()
            .map(|goal| {
                let progress = analytics::goal_progress(&goal, today);
                GoalView { goal, progress }
            })
            .collect();
        let mut recent = transactions;
        recent.truncate(DASHBOARD_RECENT_TRANSACTIONS);
        Ok(Dashboard {
            month,
            summary,
            breakdown,
            active_goals,
            recent_transactions: Self::enrich_transactions(recent, &categories),
        })
    }

    async fn report(&self, month: MonthKey, today: NaiveDate) -> Result<MonthlyReport> {
        let transactions = degrade("transactions", self.transaction_repository.list().await)?;

        let summary = analytics::monthly_summary(&transactions, month);
        let mut breakdown = analytics::category_breakdown(&transactions, month);
        breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));

        let months = last_n_months(month.first_day(), TREND_MONTHS);
        let trend = analytics::trend(&transactions, &months)
            .into_iter()
            .zip(months)
            .map(|(summary, month)| TrendPoint { month, summary })
            .collect();

        Ok(MonthlyReport {
            month,
            generated_for: today,
            savings_rate: analytics::savings_rate(&summary).round_dp(DISPLAY_DECIMAL_PRECISION),
            expense_ratio: analytics::expense_ratio(&summary)
                .round_dp(DISPLAY_DECIMAL_PRECISION),
            summary,
            breakdown,
            trend,
        })
    }

    async fn refresh_budget_spent(&self, month: MonthKey) -> Result<Vec<Budget>> {
        let budgets = self.budget_repository.list_by_month(month).await?;
        let (categories, transactions) = join!(
            self.category_repository.list(),
            self.transaction_repository.list_by_month(month),
        );
        let categories = categories?;
        let transactions = transactions?;
        let categories_by_id: HashMap<i64, &Category> = categories
            .iter()
            .map(|category| (category.id, category))
            .collect();

        let mut refreshed = Vec::with_capacity(budgets.len());
        for budget in budgets {
            // Transactions reference categories by name, budgets by id; the
            // id must be resolved before matching. A missing category means
            // nothing can match, so the cache settles at zero.
            let spent = match categories_by_id.get(&budget.category_id) {
                Some(category) => {
                    analytics::spent_for_category(&transactions, month, &category.name)
                }
                None => Decimal::ZERO,
            };
            if spent == budget.spent {
                refreshed.push(budget);
                continue;
            }
            debug!(
                "refreshing spent cache for budget {}: {} -> {}",
                budget.id, budget.spent, spent
            );
            let update = BudgetUpdate {
                spent: Some(spent),
                ..Default::default()
            };
            refreshed.push(self.budget_repository.update(budget.id, update).await?);
        }
        Ok(refreshed)
    }
}
