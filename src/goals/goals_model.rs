use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::store::Record;

/// A savings goal with a target amount and a deadline.
///
/// Completion is monotonic: every write that touches `current_amount`
/// re-evaluates `current_amount >= target_amount`, and once the goal is
/// completed it never automatically reverts to active.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    /// Immutable after creation.
    pub created_at: DateTime<Utc>,
    pub status: GoalStatus,
}

impl Goal {
    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Promotes the goal to completed when the target is reached. Never
    /// demotes a completed goal.
    pub fn reevaluate_completion(&mut self) {
        if self.current_amount >= self.target_amount {
            self.status = GoalStatus::Completed;
        }
    }
}

impl Record for Goal {
    const ENTITY: &'static str = "Goal";
    const COLLECTION: &'static str = "goals";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::Active => f.write_str("active"),
            GoalStatus::Completed => f.write_str("completed"),
        }
    }
}

/// Input for creating a goal. New goals start active; a starting amount that
/// already meets the target completes the goal on the first re-evaluation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Decimal>,
    pub deadline: NaiveDate,
}

impl NewGoal {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount("targetAmount"));
        }
        if let Some(current) = self.current_amount {
            if current < Decimal::ZERO {
                return Err(ValidationError::NegativeAmount("currentAmount"));
            }
        }
        Ok(())
    }

    pub fn into_record(self, id: i64, created_at: DateTime<Utc>) -> Goal {
        let mut goal = Goal {
            id,
            name: self.name,
            target_amount: self.target_amount,
            current_amount: self.current_amount.unwrap_or(Decimal::ZERO),
            deadline: self.deadline,
            created_at,
            status: GoalStatus::Active,
        };
        goal.reevaluate_completion();
        goal
    }
}

/// Partial update for a goal; the id and creation timestamp are immutable.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Derived by the service on writes that touch `current_amount`; never
    /// set from user input and never reverts a completed goal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("name"));
            }
        }
        if let Some(target) = self.target_amount {
            if target <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveAmount("targetAmount"));
            }
        }
        if let Some(current) = self.current_amount {
            if current < Decimal::ZERO {
                return Err(ValidationError::NegativeAmount("currentAmount"));
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, record: &mut Goal) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(target) = self.target_amount {
            record.target_amount = target;
        }
        if let Some(current) = self.current_amount {
            record.current_amount = current;
        }
        if let Some(deadline) = self.deadline {
            record.deadline = deadline;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        record.reevaluate_completion();
    }
}
