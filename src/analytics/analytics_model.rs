use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income, expense and net totals for one calendar month.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Total expense amount for one category within a month. The sequence a
/// breakdown returns is unordered; ranking is the caller's concern.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: String,
    pub amount: Decimal,
}

/// How far a budget's allocation has been consumed.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConsumption {
    pub spent: Decimal,
    /// `spent / amount * 100`.
    pub percent_used: Decimal,
    pub status: BudgetStatusTier,
}

/// Budget status tier. The boundaries are inclusive at the lower edge:
/// exactly 100% used is already `Over`, exactly 80% is `NearLimit`.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatusTier {
    OnTrack,
    NearLimit,
    Over,
}

impl std::fmt::Display for BudgetStatusTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetStatusTier::OnTrack => f.write_str("on-track"),
            BudgetStatusTier::NearLimit => f.write_str("near-limit"),
            BudgetStatusTier::Over => f.write_str("over"),
        }
    }
}

/// Progress of a savings goal relative to its target and deadline.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// `current / target * 100`, capped at 100.
    pub percent: Decimal,
    /// Days until the deadline; negative when the deadline has passed.
    pub days_remaining: i64,
    pub status: GoalProgressStatus,
}

/// Display status for a goal card.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(tag = "state", content = "days", rename_all = "kebab-case")]
pub enum GoalProgressStatus {
    Completed,
    Overdue,
    DaysLeft(i64),
}

impl std::fmt::Display for GoalProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalProgressStatus::Completed => f.write_str("completed"),
            GoalProgressStatus::Overdue => f.write_str("overdue"),
            GoalProgressStatus::DaysLeft(days) => write!(f, "days-left: {days}"),
        }
    }
}
