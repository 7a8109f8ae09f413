//! Pure aggregation over transaction, budget and goal snapshots.
//!
//! Every function here operates on already-validated data handed in by the
//! services; nothing is re-validated and nothing is read from shared state.
//! A malformed record (say, a negative amount that bypassed the write
//! boundary) produces an arithmetically consistent but semantically wrong
//! result rather than an error.
//!
//! Amounts accumulate at full `Decimal` precision; rounding to display
//! precision happens in the presentation layer.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::analytics::analytics_model::{
    BudgetConsumption, BudgetStatusTier, CategorySpend, GoalProgress, GoalProgressStatus,
    MonthlySummary,
};
use crate::budgets::budgets_model::Budget;
use crate::errors::ValidationError;
use crate::goals::goals_model::Goal;
use crate::transactions::transactions_model::Transaction;
use crate::utils::MonthKey;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const NEAR_LIMIT_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Income, expense and net totals for the transactions falling in `month`.
pub fn monthly_summary(transactions: &[Transaction], month: MonthKey) -> MonthlySummary {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for transaction in transactions {
        if !month.contains(transaction.date) {
            continue;
        }
        if transaction.is_income() {
            income += transaction.amount;
        } else {
            expenses += transaction.amount;
        }
    }
    MonthlySummary {
        income,
        expenses,
        net: income - expenses,
    }
}

/// Per-category expense totals for `month`. Only expenses contribute, so the
/// amounts sum to the month's expense total. The result is unordered.
pub fn category_breakdown(transactions: &[Transaction], month: MonthKey) -> Vec<CategorySpend> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for transaction in transactions {
        if transaction.is_expense() && month.contains(transaction.date) {
            *totals.entry(transaction.category.as_str()).or_default() += transaction.amount;
        }
    }
    totals
        .into_iter()
        .map(|(category, amount)| CategorySpend {
            category: category.to_string(),
            amount,
        })
        .collect()
}

/// Expense total for one category name within a month.
pub fn spent_for_category(
    transactions: &[Transaction],
    month: MonthKey,
    category_name: &str,
) -> Decimal {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.is_expense()
                && month.contains(transaction.date)
                && transaction.category == category_name
        })
        .map(|transaction| transaction.amount)
        .sum()
}

/// Consumption of a budget against the expense transactions of its month.
/// `category_name` is the resolved name of the budget's linked category;
/// transactions reference categories by name, budgets by id.
pub fn budget_consumption(
    budget: &Budget,
    category_name: &str,
    transactions: &[Transaction],
) -> BudgetConsumption {
    let spent = spent_for_category(transactions, budget.month, category_name);
    let percent_used = percent_of(spent, budget.amount);
    BudgetConsumption {
        spent,
        percent_used,
        status: budget_status(percent_used),
    }
}

/// Tier for a consumption percentage: 100% or more is over budget, 80% or
/// more is nearing the limit.
pub fn budget_status(percent_used: Decimal) -> BudgetStatusTier {
    if percent_used >= ONE_HUNDRED {
        BudgetStatusTier::Over
    } else if percent_used >= NEAR_LIMIT_PERCENT {
        BudgetStatusTier::NearLimit
    } else {
        BudgetStatusTier::OnTrack
    }
}

/// Progress of a goal as of `today`.
pub fn goal_progress(goal: &Goal, today: NaiveDate) -> GoalProgress {
    let percent = percent_of(goal.current_amount, goal.target_amount).min(ONE_HUNDRED);
    let days_remaining = (goal.deadline - today).num_days();
    let status = if goal.current_amount >= goal.target_amount {
        GoalProgressStatus::Completed
    } else if days_remaining < 0 {
        GoalProgressStatus::Overdue
    } else {
        GoalProgressStatus::DaysLeft(days_remaining)
    };
    GoalProgress {
        percent,
        days_remaining,
        status,
    }
}

/// Returns the goal with `amount` added to its current amount and the
/// completion rule re-evaluated. Rejects non-positive contributions. The
/// caller is responsible for applying the result under per-goal isolation.
pub fn apply_contribution(goal: &Goal, amount: Decimal) -> Result<Goal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount("amount"));
    }
    let mut updated = goal.clone();
    updated.current_amount += amount;
    updated.reevaluate_completion();
    Ok(updated)
}

/// One summary per requested month, in the order the months are given.
/// Feeds the income/expense trend line.
pub fn trend(transactions: &[Transaction], months: &[MonthKey]) -> Vec<MonthlySummary> {
    months
        .iter()
        .map(|month| monthly_summary(transactions, *month))
        .collect()
}

/// Net savings as a percentage of income; zero when there is no income.
pub fn savings_rate(summary: &MonthlySummary) -> Decimal {
    percent_of(summary.net, summary.income)
}

/// Expenses as a percentage of income; zero when there is no income.
pub fn expense_ratio(summary: &MonthlySummary) -> Decimal {
    percent_of(summary.expenses, summary.income)
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * ONE_HUNDRED
    }
}
