use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::store::Record;

/// A single income or expense record.
///
/// `amount` is always a non-negative magnitude; the sign is derived from
/// `kind` at display time and never stored.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Category name reference (categories are looked up by name, not id).
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Immutable after creation.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Signed amount for display: expenses are negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl Record for Transaction {
    const ENTITY: &'static str = "Transaction";
    const COLLECTION: &'static str = "transactions";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => f.write_str("income"),
            TransactionKind::Expense => f.write_str("expense"),
        }
    }
}

/// Input for creating a transaction
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount("amount"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        Ok(())
    }

    pub fn into_record(self, id: i64, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
            notes: self.notes,
            created_at,
        }
    }
}

/// Partial update for a transaction; the id and creation timestamp are
/// immutable and never taken from the patch.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransactionUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveAmount("amount"));
            }
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(ValidationError::MissingField("category"));
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, record: &mut Transaction) {
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(category) = &self.category {
            record.category = category.clone();
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(notes) = &self.notes {
            record.notes = Some(notes.clone());
        }
    }
}
