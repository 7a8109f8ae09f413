use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};

use crate::categories::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::TransactionKind;

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }

    fn degrade_on_store_failure(result: Result<Vec<Category>>) -> Result<Vec<Category>> {
        match result {
            Err(err @ Error::Store(_)) => {
                error!("category read failed, serving empty set: {err}");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Transactions reference categories by name, so a name must be unique
    /// within its kind. `exclude_id` skips the record being renamed.
    async fn ensure_unique_name(
        &self,
        name: &str,
        kind: TransactionKind,
        exclude_id: Option<i64>,
    ) -> Result<()> {
        let existing = self.repository.list_by_kind(kind).await?;
        let duplicate = existing
            .iter()
            .any(|category| category.name == name && Some(category.id) != exclude_id);
        if duplicate {
            Err(ValidationError::DuplicateCategory {
                name: name.to_string(),
                kind: kind.to_string(),
            }
            .into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn get_categories(&self) -> Result<Vec<Category>> {
        Self::degrade_on_store_failure(self.repository.list().await)
    }

    async fn get_category(&self, id: i64) -> Result<Category> {
        self.repository.get(id).await
    }

    async fn get_categories_by_kind(&self, kind: TransactionKind) -> Result<Vec<Category>> {
        Self::degrade_on_store_failure(self.repository.list_by_kind(kind).await)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        self.ensure_unique_name(&new_category.name, new_category.kind, None)
            .await?;
        let created = self.repository.create(new_category).await?;
        debug!("created category {} '{}'", created.id, created.name);
        Ok(created)
    }

    async fn update_category(&self, id: i64, update: CategoryUpdate) -> Result<Category> {
        update.validate()?;
        if let Some(name) = &update.name {
            // The kind is not patchable, so the current record's kind scopes
            // the uniqueness check.
            let current = self.repository.get(id).await?;
            self.ensure_unique_name(name, current.kind, Some(id)).await?;
        }
        self.repository.update(id, update).await
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::InMemoryCategoryRepository;
    use crate::store::MemoryBackend;

    fn service() -> CategoryService {
        let backend = Arc::new(MemoryBackend::new());
        CategoryService::new(Arc::new(InMemoryCategoryRepository::new(backend)))
    }

    #[tokio::test]
    async fn deleting_default_category_fails_and_keeps_collection() {
        let service = service();
        let before = service.get_categories().await.unwrap();
        let default = before.iter().find(|c| c.is_default).unwrap();

        let err = service.delete_category(default.id).await.unwrap_err();
        assert!(matches!(err, Error::Protected { entity: "Category", .. }));
        assert_eq!(service.get_categories().await.unwrap().len(), before.len());
    }

    #[tokio::test]
    async fn custom_categories_can_be_deleted() {
        let service = service();
        let created = service
            .create_category(NewCategory {
                name: "Pets".to_string(),
                kind: TransactionKind::Expense,
                color: None,
                icon: None,
            })
            .await
            .unwrap();
        assert!(!created.is_default);
        assert!(service.delete_category(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn kind_filter_partitions_the_seeded_set() {
        let service = service();
        let income = service
            .get_categories_by_kind(TransactionKind::Income)
            .await
            .unwrap();
        let expense = service
            .get_categories_by_kind(TransactionKind::Expense)
            .await
            .unwrap();
        let all = service.get_categories().await.unwrap();
        assert_eq!(income.len() + expense.len(), all.len());
        assert!(income.iter().all(|c| c.is_income()));
        assert!(expense.iter().all(|c| c.is_expense()));
    }

    #[tokio::test]
    async fn duplicate_name_within_kind_is_rejected() {
        let service = service();
        service
            .create_category(NewCategory {
                name: "Pets".to_string(),
                kind: TransactionKind::Expense,
                color: None,
                icon: None,
            })
            .await
            .unwrap();

        let err = service
            .create_category(NewCategory {
                name: "Pets".to_string(),
                kind: TransactionKind::Expense,
                color: None,
                icon: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateCategory { .. })
        ));

        // the same name under the other kind is a different bucket
        service
            .create_category(NewCategory {
                name: "Pets".to_string(),
                kind: TransactionKind::Income,
                color: None,
                icon: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rename_cannot_collide_with_existing_name() {
        let service = service();
        let created = service
            .create_category(NewCategory {
                name: "Pets".to_string(),
                kind: TransactionKind::Expense,
                color: None,
                icon: None,
            })
            .await
            .unwrap();

        // "Food" is seeded as an expense category
        let err = service
            .update_category(
                created.id,
                CategoryUpdate {
                    name: Some("Food".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateCategory { .. })
        ));

        // keeping its own name while recoloring is not a collision
        let updated = service
            .update_category(
                created.id,
                CategoryUpdate {
                    name: Some("Pets".to_string()),
                    color: Some("#b45309".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.color, "#b45309");
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let service = service();
        let err = service
            .create_category(NewCategory {
                name: "  ".to_string(),
                kind: TransactionKind::Expense,
                color: None,
                icon: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
