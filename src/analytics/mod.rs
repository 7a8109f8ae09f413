pub mod analytics_model;
pub mod analytics_service;

pub use analytics_model::{
    BudgetConsumption, BudgetStatusTier, CategorySpend, GoalProgress, GoalProgressStatus,
    MonthlySummary,
};
pub use analytics_service::{
    apply_contribution, budget_consumption, budget_status, category_breakdown, expense_ratio,
    goal_progress, monthly_summary, savings_rate, spent_for_category, trend,
};
