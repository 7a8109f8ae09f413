use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{BudgetStatusTier, CategorySpend, GoalProgress, MonthlySummary};
use crate::goals::goals_model::Goal;
use crate::transactions::transactions_model::Transaction;
use crate::utils::MonthKey;

/// A budget joined with its category and its recomputed consumption. When the
/// linked category no longer exists the name and icon fall back to
/// placeholders instead of failing the whole view.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub category_icon: String,
    pub month: MonthKey,
    pub amount: Decimal,
    pub spent: Decimal,
    pub percent_used: Decimal,
    pub status: BudgetStatusTier,
}

/// All budgets of one month with their month-wide totals.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MonthBudgets {
    pub month: MonthKey,
    pub budgets: Vec<BudgetView>,
    pub total_budgeted: Decimal,
    pub total_spent: Decimal,
}

/// A transaction enriched with the icon and color of its category, plus the
/// display-signed amount (expenses negative).
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub signed_amount: Decimal,
    pub category_icon: String,
    pub category_color: String,
}

/// An active goal together with its progress as of the requested day.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: GoalProgress,
}

/// The landing view: one month's headline numbers plus the freshest activity.
/// Sections are independent; a section whose read failed comes back empty.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub month: MonthKey,
    pub summary: MonthlySummary,
    pub breakdown: Vec<CategorySpend>,
    pub active_goals: Vec<GoalView>,
    pub recent_transactions: Vec<TransactionView>,
}

/// One point of the income/expense trend line.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: MonthKey,
    #[serde(flatten)]
    pub summary: MonthlySummary,
}

/// The reporting view for one month: totals, ranked category spending and the
/// trailing trend.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: MonthKey,
    pub generated_for: NaiveDate,
    pub summary: MonthlySummary,
    /// Category spending, largest first.
    pub breakdown: Vec<CategorySpend>,
    pub savings_rate: Decimal,
    pub expense_ratio: Decimal,
    pub trend: Vec<TrendPoint>,
}
