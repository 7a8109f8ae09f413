use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON};
use crate::errors::ValidationError;
use crate::store::Record;
use crate::transactions::TransactionKind;

/// A named bucket that transactions reference by name.
///
/// Categories marked `is_default` ship with the application and cannot be
/// deleted.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Hex color used by charts and pills.
    pub color: String,
    /// Icon identifier understood by the presentation layer.
    pub icon: String,
    pub is_default: bool,
}

impl Category {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

impl Record for Category {
    const ENTITY: &'static str = "Category";
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Input for creating a category. User-created categories are never default.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }

    pub fn into_record(self, id: i64) -> Category {
        Category {
            id,
            name: self.name,
            kind: self.kind,
            color: self.color.unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            icon: self.icon.unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
            is_default: false,
        }
    }
}

/// Partial update for a category. The default flag is not patchable, so a
/// protected category can never be demoted and then deleted.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CategoryUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("name"));
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, record: &mut Category) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(color) = &self.color {
            record.color = color.clone();
        }
        if let Some(icon) = &self.icon {
            record.icon = icon.clone();
        }
    }
}
