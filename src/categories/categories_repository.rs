use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::categories::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::constants::{DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON};
use crate::errors::{Error, Result};
use crate::store::{MemoryBackend, Record, RecordClient};
use crate::transactions::TransactionKind;

pub struct InMemoryCategoryRepository {
    backend: Arc<MemoryBackend>,
}

impl InMemoryCategoryRepository {
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        InMemoryCategoryRepository { backend }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.backend.categories.list().await)
    }

    async fn get(&self, id: i64) -> Result<Category> {
        self.backend.categories.get(id).await
    }

    async fn list_by_kind(&self, kind: TransactionKind) -> Result<Vec<Category>> {
        Ok(self
            .backend
            .categories
            .list()
            .await
            .into_iter()
            .filter(|category| category.kind == kind)
            .collect())
    }

    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        let created = self
            .backend
            .categories
            .insert(|id| new_category.into_record(id))
            .await;
        Ok(created)
    }

    async fn update(&self, id: i64, update: CategoryUpdate) -> Result<Category> {
        update.validate()?;
        self.backend
            .categories
            .update_with(id, |record| update.apply_to(record))
            .await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.backend
            .categories
            .remove_if(id, |category| {
                if category.is_default {
                    Err(Error::protected(Category::ENTITY, category.id))
                } else {
                    Ok(())
                }
            })
            .await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryCreateBody {
    name: String,
    #[serde(rename = "type")]
    kind: TransactionKind,
    color: String,
    icon: String,
    is_default: bool,
}

pub struct RemoteCategoryRepository {
    client: Arc<RecordClient>,
}

impl RemoteCategoryRepository {
    pub fn new(client: Arc<RecordClient>) -> Self {
        RemoteCategoryRepository { client }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for RemoteCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.client.list(Category::COLLECTION, &[]).await?)
    }

    async fn get(&self, id: i64) -> Result<Category> {
        self.client
            .get(Category::COLLECTION, id)
            .await?
            .ok_or_else(|| Error::not_found(Category::ENTITY, id))
    }

    async fn list_by_kind(&self, kind: TransactionKind) -> Result<Vec<Category>> {
        Ok(self
            .client
            .list(Category::COLLECTION, &[("type", kind.to_string())])
            .await?)
    }

    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        let body = CategoryCreateBody {
            name: new_category.name,
            kind: new_category.kind,
            color: new_category
                .color
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            icon: new_category
                .icon
                .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
            is_default: false,
        };
        Ok(self.client.create(Category::COLLECTION, &body).await?)
    }

    async fn update(&self, id: i64, update: CategoryUpdate) -> Result<Category> {
        update.validate()?;
        self.client
            .update(Category::COLLECTION, id, &update)
            .await?
            .ok_or_else(|| Error::not_found(Category::ENTITY, id))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        // The protected check needs the record; the store itself does not
        // enforce the default-category rule.
        let category = self.get(id).await?;
        if category.is_default {
            return Err(Error::protected(Category::ENTITY, id));
        }
        let deleted = self.client.delete(Category::COLLECTION, id).await?;
        if deleted {
            Ok(true)
        } else {
            Err(Error::not_found(Category::ENTITY, id))
        }
    }
}
