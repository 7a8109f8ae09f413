use async_trait::async_trait;

use crate::categories::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;
use crate::transactions::TransactionKind;

/// Trait for category repository operations.
///
/// Deleting a default category fails with a protected-entity error and
/// leaves the collection unchanged.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>>;
    async fn get(&self, id: i64) -> Result<Category>;
    async fn list_by_kind(&self, kind: TransactionKind) -> Result<Vec<Category>>;
    async fn create(&self, new_category: NewCategory) -> Result<Category>;
    async fn update(&self, id: i64, update: CategoryUpdate) -> Result<Category>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn get_categories(&self) -> Result<Vec<Category>>;
    async fn get_category(&self, id: i64) -> Result<Category>;
    async fn get_categories_by_kind(&self, kind: TransactionKind) -> Result<Vec<Category>>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(&self, id: i64, update: CategoryUpdate) -> Result<Category>;
    async fn delete_category(&self, id: i64) -> Result<bool>;
}
