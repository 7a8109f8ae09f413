pub mod memory;
pub mod remote;

use std::sync::Arc;

use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::budgets::{InMemoryBudgetRepository, RemoteBudgetRepository};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::categories::{InMemoryCategoryRepository, RemoteCategoryRepository};
use crate::errors::StoreError;
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::goals::{InMemoryGoalRepository, RemoteGoalRepository};
use crate::transactions::transactions_traits::TransactionRepositoryTrait;
use crate::transactions::{InMemoryTransactionRepository, RemoteTransactionRepository};

pub use memory::{Collection, MemoryBackend};
pub use remote::RecordClient;

/// Where a session's records live. Chosen once at construction; nothing is
/// loaded implicitly.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// Volatile collections seeded with the default categories.
    Memory,
    /// Hosted record-store API at the given base URL.
    Remote { base_url: String },
}

/// The four entity repositories for one configured backend, ready to inject
/// into services.
pub struct Repositories {
    pub transactions: Arc<dyn TransactionRepositoryTrait>,
    pub categories: Arc<dyn CategoryRepositoryTrait>,
    pub budgets: Arc<dyn BudgetRepositoryTrait>,
    pub goals: Arc<dyn GoalRepositoryTrait>,
}

impl Repositories {
    pub fn from_config(config: StoreConfig) -> Result<Self, StoreError> {
        match config {
            StoreConfig::Memory => {
                let backend = Arc::new(MemoryBackend::new());
                Ok(Repositories {
                    transactions: Arc::new(InMemoryTransactionRepository::new(Arc::clone(
                        &backend,
                    ))),
                    categories: Arc::new(InMemoryCategoryRepository::new(Arc::clone(&backend))),
                    budgets: Arc::new(InMemoryBudgetRepository::new(Arc::clone(&backend))),
                    goals: Arc::new(InMemoryGoalRepository::new(backend)),
                })
            }
            StoreConfig::Remote { base_url } => {
                let client = Arc::new(RecordClient::new(base_url)?);
                Ok(Repositories {
                    transactions: Arc::new(RemoteTransactionRepository::new(Arc::clone(&client))),
                    categories: Arc::new(RemoteCategoryRepository::new(Arc::clone(&client))),
                    budgets: Arc::new(RemoteBudgetRepository::new(Arc::clone(&client))),
                    goals: Arc::new(RemoteGoalRepository::new(client)),
                })
            }
        }
    }
}

/// A persisted record in one of the four entity collections.
///
/// Ids are positive integers assigned by the backend at creation time as
/// `max(existing ids) + 1`, starting at 1 for an empty collection.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in error messages.
    const ENTITY: &'static str;
    /// Collection name on the record-store wire.
    const COLLECTION: &'static str;

    fn id(&self) -> i64;
}
