use std::sync::Arc;

use rust_decimal_macros::dec;

use pennyworth_core::analytics::BudgetStatusTier;
use pennyworth_core::budgets::budgets_model::NewBudget;
use pennyworth_core::budgets::{BudgetService, BudgetServiceTrait};
use pennyworth_core::categories::{CategoryService, CategoryServiceTrait};
use pennyworth_core::goals::goals_model::{GoalStatus, NewGoal};
use pennyworth_core::goals::{GoalService, GoalServiceTrait};
use pennyworth_core::store::{Repositories, StoreConfig};
use pennyworth_core::transactions::transactions_model::{NewTransaction, TransactionKind};
use pennyworth_core::transactions::{TransactionService, TransactionServiceTrait};
use pennyworth_core::utils::MonthKey;
use pennyworth_core::views::{ViewService, ViewServiceTrait};
use pennyworth_core::Error;

struct App {
    transactions: TransactionService,
    categories: CategoryService,
    budgets: BudgetService,
    goals: GoalService,
    views: ViewService,
}

fn build_app() -> App {
    let repos = Repositories::from_config(StoreConfig::Memory).unwrap();

    App {
        transactions: TransactionService::new(Arc::clone(&repos.transactions)),
        categories: CategoryService::new(Arc::clone(&repos.categories)),
        budgets: BudgetService::new(Arc::clone(&repos.budgets)),
        goals: GoalService::new(Arc::clone(&repos.goals)),
        views: ViewService::new(
            repos.transactions,
            repos.categories,
            repos.budgets,
            repos.goals,
        ),
    }
}

fn transaction(amount: &str, kind: TransactionKind, category: &str, date: &str) -> NewTransaction {
    NewTransaction {
        amount: amount.parse().unwrap(),
        kind,
        category: category.to_string(),
        date: date.parse().unwrap(),
        notes: None,
    }
}

#[test]
fn month_of_activity_flows_through_budgets_goals_and_reports() {
    let app = build_app();
    let march: MonthKey = "2024-03".parse().unwrap();
    let today = "2024-03-20".parse().unwrap();

    // The default seed carries a Food category; look its id up by name.
    let categories = tokio_test::block_on(app.categories.get_categories()).unwrap();
    let food = categories.iter().find(|c| c.name == "Food").unwrap();

    tokio_test::block_on(app.transactions.create_transaction(transaction(
        "2500",
        TransactionKind::Income,
        "Salary",
        "2024-03-01",
    )))
    .unwrap();
    tokio_test::block_on(app.transactions.create_transaction(transaction(
        "180",
        TransactionKind::Expense,
        "Food",
        "2024-03-08",
    )))
    .unwrap();
    tokio_test::block_on(app.transactions.create_transaction(transaction(
        "75.50",
        TransactionKind::Expense,
        "Bills",
        "2024-03-12",
    )))
    .unwrap();
    // February activity must not leak into March.
    tokio_test::block_on(app.transactions.create_transaction(transaction(
        "60",
        TransactionKind::Expense,
        "Food",
        "2024-02-25",
    )))
    .unwrap();

    let budget = tokio_test::block_on(app.budgets.create_budget(NewBudget {
        category_id: food.id,
        month: march,
        amount: dec!(200),
    }))
    .unwrap();

    let goal = tokio_test::block_on(app.goals.create_goal(NewGoal {
        name: "Emergency fund".to_string(),
        target_amount: dec!(1000),
        current_amount: Some(dec!(900)),
        deadline: "2024-12-31".parse().unwrap(),
    }))
    .unwrap();

    // Budgets view: March food spend is 180 of 200.
    let month_budgets = tokio_test::block_on(app.views.month_budgets(march)).unwrap();
    assert_eq!(month_budgets.budgets.len(), 1);
    assert_eq!(month_budgets.budgets[0].spent, dec!(180));
    assert_eq!(month_budgets.budgets[0].percent_used, dec!(90));
    assert_eq!(month_budgets.budgets[0].status, BudgetStatusTier::NearLimit);

    // The cached spent field catches up on refresh.
    let refreshed = tokio_test::block_on(app.views.refresh_budget_spent(march)).unwrap();
    assert_eq!(refreshed[0].spent, dec!(180));
    let stored = tokio_test::block_on(app.budgets.get_budget(budget.id)).unwrap();
    assert_eq!(stored.spent, dec!(180));

    // A contribution pushes the goal over its target and completes it.
    let goal = tokio_test::block_on(app.goals.add_contribution(goal.id, dec!(150))).unwrap();
    assert_eq!(goal.current_amount, dec!(1050));
    assert_eq!(goal.status, GoalStatus::Completed);

    // The dashboard now shows no active goals and March's numbers.
    let dashboard = tokio_test::block_on(app.views.dashboard(march, today)).unwrap();
    assert!(dashboard.active_goals.is_empty());
    assert_eq!(dashboard.summary.income, dec!(2500));
    assert_eq!(dashboard.summary.expenses, dec!(255.50));
    assert_eq!(dashboard.summary.net, dec!(2244.50));

    // The report ranks Food above Bills and carries a six-month trend.
    let report = tokio_test::block_on(app.views.report(march, today)).unwrap();
    assert_eq!(report.breakdown[0].category, "Food");
    assert_eq!(report.breakdown[0].amount, dec!(180));
    assert_eq!(report.breakdown[1].category, "Bills");
    assert_eq!(report.trend.len(), 6);
    assert_eq!(report.trend[4].summary.expenses, dec!(60));
}

#[test]
fn write_boundary_rejections_leave_the_store_untouched() {
    let app = build_app();
    let march: MonthKey = "2024-03".parse().unwrap();

    let err = tokio_test::block_on(app.transactions.create_transaction(transaction(
        "0",
        TransactionKind::Expense,
        "Food",
        "2024-03-01",
    )))
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(tokio_test::block_on(app.transactions.get_transactions())
        .unwrap()
        .is_empty());

    // Seeded categories cannot be deleted.
    let categories = tokio_test::block_on(app.categories.get_categories()).unwrap();
    let seeded = &categories[0];
    let err = tokio_test::block_on(app.categories.delete_category(seeded.id)).unwrap_err();
    assert!(matches!(err, Error::Protected { .. }));

    // One budget per category and month.
    tokio_test::block_on(app.budgets.create_budget(NewBudget {
        category_id: 3,
        month: march,
        amount: dec!(100),
    }))
    .unwrap();
    let err = tokio_test::block_on(app.budgets.create_budget(NewBudget {
        category_id: 3,
        month: march,
        amount: dec!(150),
    }))
    .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
