use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::store::Record;
use crate::utils::MonthKey;

/// A per-category spending cap for one calendar month.
///
/// `spent` is a cache, not a source of truth: it is always recomputable from
/// the month's expense transactions for the linked category, and the view
/// layer recomputes it on every read.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub month: MonthKey,
    pub amount: Decimal,
    pub spent: Decimal,
}

impl Record for Budget {
    const ENTITY: &'static str = "Budget";
    const COLLECTION: &'static str = "budgets";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Input for creating a budget. `spent` always starts at zero.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category_id: i64,
    pub month: MonthKey,
    pub amount: Decimal,
}

impl NewBudget {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount("amount"));
        }
        Ok(())
    }

    pub fn into_record(self, id: i64) -> Budget {
        Budget {
            id,
            category_id: self.category_id,
            month: self.month,
            amount: self.amount,
            spent: Decimal::ZERO,
        }
    }
}

/// Partial update for a budget. `spent` is only written back by the spend
/// recomputation, never set directly by user input.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<Decimal>,
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveAmount("amount"));
            }
        }
        if let Some(spent) = self.spent {
            if spent < Decimal::ZERO {
                return Err(ValidationError::NegativeAmount("spent"));
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, record: &mut Budget) {
        if let Some(category_id) = self.category_id {
            record.category_id = category_id;
        }
        if let Some(month) = self.month {
            record.month = month;
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(spent) = self.spent {
            record.spent = spent;
        }
    }
}
