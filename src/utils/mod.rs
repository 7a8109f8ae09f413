pub mod time_utils;

pub use time_utils::{last_n_months, MonthKey};
