pub mod transactions_model;
pub mod transactions_repository;
pub mod transactions_service;
pub mod transactions_traits;

pub use transactions_model::{NewTransaction, Transaction, TransactionKind, TransactionUpdate};
pub use transactions_repository::{InMemoryTransactionRepository, RemoteTransactionRepository};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
