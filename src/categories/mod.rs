pub mod categories_model;
pub mod categories_repository;
pub mod categories_service;
pub mod categories_traits;

pub use categories_model::{Category, CategoryUpdate, NewCategory};
pub use categories_repository::{InMemoryCategoryRepository, RemoteCategoryRepository};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
