pub mod views_model;
pub mod views_service;
pub mod views_traits;

pub use views_model::{
    BudgetView, Dashboard, GoalView, MonthBudgets, MonthlyReport, TransactionView, TrendPoint,
};
pub use views_service::ViewService;
pub use views_traits::ViewServiceTrait;
