pub mod store;

pub mod budgets;
pub mod categories;
pub mod goals;
pub mod transactions;

pub mod analytics;
pub mod constants;
pub mod errors;
pub mod utils;
pub mod views;

pub use errors::{Error, Result};
pub use views::*;
